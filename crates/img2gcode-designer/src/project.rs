//! Named projects in the key-value store.
//!
//! All projects live in one JSON map under `img2gcode.projects`, keyed by
//! project name. The name of the project last saved or loaded is kept under
//! `img2gcode.currentProject`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use img2gcode_core::constants::{MAX_PROJECT_BYTES, MAX_PROJECT_NAME_LEN};
use img2gcode_core::storage::{read_json, storage_keys, write_json, SharedStore};
use img2gcode_core::{Error, ValidationError};
use serde::{Deserialize, Serialize};

use crate::object::CanvasObject;
use crate::workspace::WorkspaceSize;

/// UI settings captured with a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    pub selected_font: String,
    pub grayscale: bool,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            selected_font: "Arial".to_string(),
            grayscale: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub objects: Vec<CanvasObject>,
    pub viewport_transform: [f64; 6],
    pub zoom: f64,
    #[serde(default)]
    pub settings: ProjectSettings,
    #[serde(default)]
    pub workspace: Option<WorkspaceSize>,
}

/// One row of the project list.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub object_count: usize,
}

/// Trims `name` and checks it can key a project.
pub fn validate_project_name(name: &str) -> Result<String, ValidationError> {
    const FIELD: &str = "Project name";
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field: FIELD });
    }
    if trimmed.chars().count() > MAX_PROJECT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: FIELD,
            max: MAX_PROJECT_NAME_LEN,
        });
    }
    if let Some(character) = trimmed
        .chars()
        .find(|c| !(c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.')))
    {
        return Err(ValidationError::InvalidCharacter {
            field: FIELD,
            character,
        });
    }
    Ok(trimmed.to_string())
}

type ProjectMap = BTreeMap<String, Project>;

pub struct ProjectStore {
    store: SharedStore,
}

impl ProjectStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    fn read_map(&self) -> Result<ProjectMap, Error> {
        let store = self.store.borrow();
        Ok(read_json(&*store, storage_keys::PROJECTS)?.unwrap_or_default())
    }

    fn write_map(&self, map: &ProjectMap) -> Result<(), Error> {
        let mut store = self.store.borrow_mut();
        write_json(&mut *store, storage_keys::PROJECTS, map)?;
        Ok(())
    }

    /// Projects, newest first.
    pub fn list(&self) -> Result<Vec<ProjectSummary>, Error> {
        let mut summaries: Vec<_> = self
            .read_map()?
            .into_values()
            .map(|p| ProjectSummary {
                object_count: p.objects.len(),
                name: p.name,
                timestamp: p.timestamp,
            })
            .collect();
        summaries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.name.cmp(&b.name)));
        Ok(summaries)
    }

    pub fn get(&self, name: &str) -> Result<Option<Project>, Error> {
        Ok(self.read_map()?.remove(name.trim()))
    }

    pub fn exists(&self, name: &str) -> Result<bool, Error> {
        Ok(self.read_map()?.contains_key(name.trim()))
    }

    /// Stores `project` under its name, replacing any previous version, and
    /// makes it the current project. Nothing changes on failure.
    pub fn save(&self, project: &Project) -> Result<(), Error> {
        let name = validate_project_name(&project.name)?;
        let size = serde_json::to_vec(project)
            .map_err(img2gcode_core::StorageError::from)?
            .len();
        if size > MAX_PROJECT_BYTES {
            return Err(ValidationError::TooLarge {
                field: "Project",
                size,
                max: MAX_PROJECT_BYTES,
            }
            .into());
        }

        let mut map = self.read_map()?;
        let mut stored = project.clone();
        stored.name = name.clone();
        map.insert(name.clone(), stored);
        self.write_map(&map)?;
        self.set_current(Some(&name))?;
        tracing::info!("Saved project '{}' ({} bytes)", name, size);
        Ok(())
    }

    /// Removes a project. Clears the current pointer when it named it.
    pub fn delete(&self, name: &str) -> Result<(), Error> {
        let name = name.trim();
        let mut map = self.read_map()?;
        if map.remove(name).is_none() {
            return Err(Error::not_found("Project", name));
        }
        self.write_map(&map)?;
        if self.current()?.as_deref() == Some(name) {
            self.set_current(None)?;
        }
        tracing::info!("Deleted project '{}'", name);
        Ok(())
    }

    /// Copies `from` to a new project `to` with a fresh timestamp.
    pub fn duplicate(&self, from: &str, to: &str) -> Result<Project, Error> {
        let to = validate_project_name(to)?;
        let mut map = self.read_map()?;
        if map.contains_key(&to) {
            return Err(Error::AlreadyExists {
                kind: "Project",
                name: to,
            });
        }
        let mut copy = map
            .get(from.trim())
            .cloned()
            .ok_or_else(|| Error::not_found("Project", from.trim()))?;
        copy.name = to.clone();
        copy.timestamp = Utc::now();
        map.insert(to, copy.clone());
        self.write_map(&map)?;
        Ok(copy)
    }

    pub fn current(&self) -> Result<Option<String>, Error> {
        Ok(self
            .store
            .borrow()
            .get(storage_keys::CURRENT_PROJECT)?
            .filter(|name| !name.is_empty()))
    }

    pub fn set_current(&self, name: Option<&str>) -> Result<(), Error> {
        let mut store = self.store.borrow_mut();
        match name {
            Some(name) => store.set(storage_keys::CURRENT_PROJECT, name)?,
            None => store.remove(storage_keys::CURRENT_PROJECT)?,
        }
        Ok(())
    }
}

impl std::fmt::Debug for ProjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectStore").finish_non_exhaustive()
    }
}
