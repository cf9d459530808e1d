//! Designer state: everything one editing session owns.
//!
//! Split into submodules:
//! - `objects`: create, select, move, delete, duplicate
//! - `view`: zoom, pan, workspace size, overlays, animation
//! - `projects`: save, load, delete, duplicate
//! - `images`: image insertion
//! - `autosave`: periodic saving of the current project
//! - `prompt`: confirmation and notification dialogs

mod autosave;
mod images;
mod objects;
mod projects;
mod prompt;
mod view;

pub use autosave::{AutoSave, AutoSaveOutcome};
pub use prompt::{AutoConfirm, UserPrompt};

use std::sync::Arc;

use img2gcode_core::constants::{
    DEFAULT_AUTO_SAVE_SECS, DEFAULT_GRID_SPACING_MM, DEFAULT_PROJECT_NAME,
};
use img2gcode_core::{AppEvent, ErrorLog, EventBus, MeasurementSystem, SharedStore};

use crate::animation::Animator;
use crate::canvas::Canvas;
use crate::dimensions::{refresh_indicators, SelectionDimensions};
use crate::error::DesignerResult;
use crate::font_manager::FontManager;
use crate::project::{ProjectSettings, ProjectStore};
use crate::viewport::Viewport;
use crate::workspace::WorkspaceConfig;

/// Editor toggles that are not part of a project.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorOptions {
    pub grid_enabled: bool,
    pub grid_spacing_mm: f64,
    pub snap_to_grid: bool,
    pub show_dimensions: bool,
    pub measurement_system: MeasurementSystem,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            grid_enabled: true,
            grid_spacing_mm: DEFAULT_GRID_SPACING_MM,
            snap_to_grid: false,
            show_dimensions: true,
            measurement_system: MeasurementSystem::Metric,
        }
    }
}

pub struct DesignerState {
    pub canvas: Canvas,
    pub workspace: WorkspaceConfig,
    pub viewport: Viewport,
    pub animator: Animator,
    pub options: EditorOptions,
    pub settings: ProjectSettings,
    pub fonts: FontManager,
    pub error_log: ErrorLog,
    pub project_name: String,
    pub is_modified: bool,
    pub auto_save: AutoSave,
    projects: ProjectStore,
    events: Arc<EventBus>,
    prompt: Box<dyn UserPrompt>,
}

impl DesignerState {
    /// Creates a state persisting into `store`. Dialogs are answered by
    /// `prompt`.
    pub fn new(store: SharedStore, events: Arc<EventBus>, prompt: Box<dyn UserPrompt>) -> Self {
        let mut state = Self {
            canvas: Canvas::new(),
            workspace: WorkspaceConfig::default(),
            viewport: Viewport::new(),
            animator: Animator::new(),
            options: EditorOptions::default(),
            settings: ProjectSettings::default(),
            fonts: FontManager::new(),
            error_log: ErrorLog::new(),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            is_modified: false,
            auto_save: AutoSave::new(std::time::Duration::from_secs(DEFAULT_AUTO_SAVE_SECS)),
            projects: ProjectStore::new(store),
            events,
            prompt,
        };
        state.rebuild_overlays();
        state
    }

    pub fn projects(&self) -> &ProjectStore {
        &self.projects
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    pub fn set_prompt(&mut self, prompt: Box<dyn UserPrompt>) {
        self.prompt = prompt;
    }

    pub(crate) fn publish(&self, event: AppEvent) {
        self.events.publish(event);
    }

    /// Logs a failed operation, publishes an error event and hands the
    /// result back unchanged.
    pub(crate) fn report<T>(&mut self, context: &str, result: DesignerResult<T>) -> DesignerResult<T> {
        if let Err(e) = &result {
            let message = e.user_message();
            self.error_log.record(context, message.clone());
            self.publish(AppEvent::Error {
                context: context.to_string(),
                message,
            });
        }
        result
    }

    /// Called after every change to the design.
    pub(crate) fn mark_modified(&mut self) {
        self.is_modified = true;
        self.refresh_dimensions();
    }

    /// Recomputes the selection readout and its indicator overlays.
    pub fn refresh_dimensions(&mut self) -> Option<SelectionDimensions> {
        refresh_indicators(
            &mut self.canvas,
            self.options.show_dimensions,
            self.options.measurement_system,
        )
    }

    pub fn selection_dimensions(&self) -> Option<SelectionDimensions> {
        SelectionDimensions::of_selection(&self.canvas)
    }
}

impl std::fmt::Debug for DesignerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesignerState")
            .field("project_name", &self.project_name)
            .field("objects", &self.canvas.design_count())
            .field("workspace", &self.workspace.size())
            .field("viewport", &self.viewport)
            .field("is_modified", &self.is_modified)
            .finish_non_exhaustive()
    }
}
