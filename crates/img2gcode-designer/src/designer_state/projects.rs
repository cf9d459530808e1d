//! Project persistence for designer state.

use chrono::Utc;
use img2gcode_core::constants::DEFAULT_PROJECT_NAME;
use img2gcode_core::{AppEvent, Error, ProjectEvent};

use super::DesignerState;
use crate::error::DesignerResult;
use crate::project::{validate_project_name, Project, ProjectSummary};
use crate::viewport::Viewport;

impl DesignerState {
    /// Captures the current design as a project named `name`. Overlays are
    /// left out.
    pub fn snapshot(&self, name: &str) -> Project {
        Project {
            name: name.to_string(),
            timestamp: Utc::now(),
            objects: self.canvas.design_objects().cloned().collect(),
            viewport_transform: self.viewport.transform(),
            zoom: self.viewport.zoom(),
            settings: self.settings.clone(),
            workspace: Some(self.workspace.size()),
        }
    }

    /// Saves the design under `name` and makes it the current project.
    pub fn save_project(&mut self, name: &str) -> DesignerResult<()> {
        let result = self.save_as(name, false);
        if let Err(e) = &result {
            self.prompt.notify(&e.user_message());
        }
        self.report("save project", result)
    }

    pub(crate) fn save_as(&mut self, name: &str, auto: bool) -> DesignerResult<()> {
        let name = validate_project_name(name)?;
        let project = self.snapshot(&name);
        self.projects.save(&project)?;
        self.project_name = name.clone();
        self.is_modified = false;
        self.publish(AppEvent::Project(ProjectEvent::Saved { name, auto }));
        Ok(())
    }

    /// Replaces the design with the stored project `name`. An unknown name
    /// or a failed current-project write is an error and leaves the state
    /// untouched.
    pub fn load_project(&mut self, name: &str) -> DesignerResult<()> {
        let result = self.load_inner(name);
        self.report("load project", result)
    }

    fn load_inner(&mut self, name: &str) -> DesignerResult<()> {
        let project = self
            .projects
            .get(name)?
            .ok_or_else(|| Error::not_found("Project", name.trim()))?;
        self.projects.set_current(Some(&project.name))?;

        self.animator.cancel();
        self.canvas.clear_design();
        for obj in project.objects.into_iter().filter(|o| !o.is_overlay()) {
            self.canvas.insert_object(obj);
        }
        self.canvas.deselect_all();

        let mut viewport = Viewport::from_transform(project.viewport_transform);
        viewport.set_zoom(project.zoom);
        self.viewport = viewport;
        self.settings = project.settings;
        if let Some(size) = project.workspace {
            if let Err(e) = self.workspace.set_size(size.width_mm, size.height_mm) {
                tracing::warn!("Ignoring stored workspace size of '{}': {}", project.name, e);
            }
        }
        self.rebuild_overlays();
        self.refresh_dimensions();

        self.project_name = project.name.clone();
        self.is_modified = false;
        tracing::info!("Loaded project '{}'", project.name);
        self.publish(AppEvent::Project(ProjectEvent::Loaded { name: project.name }));
        Ok(())
    }

    /// Deletes a stored project after confirmation. Returns false when the
    /// user declined.
    pub fn delete_project(&mut self, name: &str) -> DesignerResult<bool> {
        let name = name.trim().to_string();
        if !self
            .prompt
            .confirm(&format!("Delete project '{}'? This cannot be undone.", name))
        {
            return Ok(false);
        }
        let result: DesignerResult<()> = self.projects.delete(&name).map_err(Into::into);
        if result.is_ok() {
            if self.project_name == name {
                self.project_name = DEFAULT_PROJECT_NAME.to_string();
            }
            self.publish(AppEvent::Project(ProjectEvent::Deleted { name }));
        }
        self.report("delete project", result).map(|_| true)
    }

    pub fn duplicate_project(&mut self, from: &str, to: &str) -> DesignerResult<Project> {
        let result: DesignerResult<Project> = self.projects.duplicate(from, to).map_err(Into::into);
        if let Ok(copy) = &result {
            self.publish(AppEvent::Project(ProjectEvent::Duplicated {
                from: from.trim().to_string(),
                to: copy.name.clone(),
            }));
        }
        self.report("duplicate project", result)
    }

    pub fn list_projects(&mut self) -> DesignerResult<Vec<ProjectSummary>> {
        let result = self.projects.list().map_err(Into::into);
        self.report("list projects", result)
    }

    /// Starts an empty "Untitled" design, asking first when there are
    /// unsaved changes.
    pub fn new_project(&mut self) -> bool {
        if self.is_modified && !self.prompt.confirm("Discard unsaved changes?") {
            return false;
        }
        self.canvas.clear_design();
        self.project_name = DEFAULT_PROJECT_NAME.to_string();
        self.is_modified = false;
        self.refresh_dimensions();
        true
    }
}
