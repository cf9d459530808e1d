//! # img2gcode
//!
//! Vector design editor for laser engraving. Text, shapes, freehand paths
//! and images are composed on a millimetre workspace, saved as named
//! projects in a key-value store and exported as SVG.
//!
//! ## Architecture
//!
//! The workspace is split into crates:
//!
//! 1. **img2gcode-core** - Errors, key-value storage, event bus, error log
//! 2. **img2gcode-designer** - Workspace mapping, viewport, objects, projects, SVG export
//! 3. **img2gcode-settings** - User preferences and their persistence
//! 4. **img2gcode-devicedb** - Machine and laser profiles
//! 5. **img2gcode-cache** - Offline request cache
//! 6. **img2gcode** - This binary: logging setup and the command line

pub mod cli;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

pub use img2gcode_cache as cache;
pub use img2gcode_core::{
    shared_store, AppEvent, Error, EventBus, FileStore, KeyValueStore, MemoryStore, Result,
    SharedStore,
};
pub use img2gcode_designer::{
    AutoConfirm, DesignerError, DesignerResult, DesignerState, Project, ProjectStore, UserPrompt,
};
pub use img2gcode_devicedb::{LaserSettings, MachineProfile, ProfileManager};
pub use img2gcode_settings::Preferences;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
///
/// Logs go to stderr so command output on stdout stays parseable.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("failed to install the tracing subscriber")?;

    Ok(())
}

/// Opens the file-backed store at `path`, or at the default data location.
pub fn open_store(path: Option<&Path>) -> anyhow::Result<SharedStore> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => img2gcode_settings::default_store_path()
            .context("could not determine the data directory")?,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let store = FileStore::open(&path).with_context(|| format!("opening store {}", path.display()))?;
    tracing::debug!("Using store {}", path.display());
    Ok(shared_store(store))
}

/// Copies the stored user preferences onto a fresh designer session.
pub fn apply_preferences(state: &mut DesignerState, prefs: &Preferences) -> DesignerResult<()> {
    state.options.measurement_system = prefs.measurement_system;
    state.set_snap_to_grid(prefs.snap_to_grid);
    state.set_show_dimensions(prefs.show_dimensions);
    state.set_grid(prefs.grid_enabled, prefs.grid_spacing_mm)?;
    state.set_workspace_size(prefs.workspace_width_mm, prefs.workspace_height_mm)?;
    state.settings.selected_font = prefs.selected_font.clone();
    state.settings.grayscale = prefs.grayscale;
    state
        .auto_save
        .set_interval(Duration::from_secs(prefs.auto_save_interval_secs));
    state.is_modified = false;
    Ok(())
}

/// A designer session over `store` with the stored preferences applied.
pub fn open_session(store: SharedStore, prompt: Box<dyn UserPrompt>) -> anyhow::Result<DesignerState> {
    let prefs = img2gcode_settings::load_preferences(&*store.borrow())
        .context("reading preferences")?;
    let mut state = DesignerState::new(store, Arc::new(EventBus::new()), prompt);
    apply_preferences(&mut state, &prefs).map_err(|e| anyhow::anyhow!(e.user_message()))?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_preferences() {
        let mut state = DesignerState::new(
            shared_store(MemoryStore::new()),
            Arc::new(EventBus::new()),
            Box::new(AutoConfirm::default()),
        );
        let prefs = Preferences {
            workspace_width_mm: 300.0,
            workspace_height_mm: 200.0,
            snap_to_grid: true,
            grayscale: true,
            auto_save_interval_secs: 0,
            ..Default::default()
        };
        apply_preferences(&mut state, &prefs).unwrap();
        assert_eq!(state.workspace.width_mm(), 300.0);
        assert_eq!(state.workspace.height_mm(), 200.0);
        assert!(state.options.snap_to_grid);
        assert!(state.settings.grayscale);
        assert!(!state.auto_save.is_enabled());
        assert!(!state.is_modified);
    }
}
