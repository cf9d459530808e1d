//! Preferences
//!
//! Everything the user can change that is not part of a project. Missing
//! fields take their defaults so older documents keep loading.

use img2gcode_core::constants::{
    DEFAULT_AUTO_SAVE_SECS, DEFAULT_GRID_SPACING_MM, DEFAULT_WORKSPACE_HEIGHT_MM,
    DEFAULT_WORKSPACE_WIDTH_MM, MAX_WORKSPACE_MM, MIN_GRID_SPACING_MM, MIN_WORKSPACE_MM,
};
use img2gcode_core::MeasurementSystem;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SettingsError, SettingsResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Workspace width in mm
    pub workspace_width_mm: f64,
    /// Workspace height in mm
    pub workspace_height_mm: f64,
    pub grid_enabled: bool,
    pub grid_spacing_mm: f64,
    pub snap_to_grid: bool,
    pub show_dimensions: bool,
    pub measurement_system: MeasurementSystem,
    pub selected_font: String,
    /// Convert inserted images to grayscale
    pub grayscale: bool,
    /// Zero turns auto-save off
    pub auto_save_interval_secs: u64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            workspace_width_mm: DEFAULT_WORKSPACE_WIDTH_MM,
            workspace_height_mm: DEFAULT_WORKSPACE_HEIGHT_MM,
            grid_enabled: true,
            grid_spacing_mm: DEFAULT_GRID_SPACING_MM,
            snap_to_grid: false,
            show_dimensions: true,
            measurement_system: MeasurementSystem::Metric,
            selected_font: "Arial".to_string(),
            grayscale: false,
            auto_save_interval_secs: DEFAULT_AUTO_SAVE_SECS,
        }
    }
}

enum FileFormat {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<FileFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(FileFormat::Json),
        Some("toml") => Ok(FileFormat::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("(none)").to_string(),
        )),
    }
}

impl Preferences {
    pub fn validate(&self) -> SettingsResult<()> {
        for (key, value) in [
            ("workspace_width_mm", self.workspace_width_mm),
            ("workspace_height_mm", self.workspace_height_mm),
        ] {
            if !(MIN_WORKSPACE_MM..=MAX_WORKSPACE_MM).contains(&value) {
                return Err(SettingsError::invalid(
                    key,
                    format!(
                        "must be between {} and {} mm, got {}",
                        MIN_WORKSPACE_MM, MAX_WORKSPACE_MM, value
                    ),
                ));
            }
        }
        if !(self.grid_spacing_mm.is_finite() && self.grid_spacing_mm >= MIN_GRID_SPACING_MM) {
            return Err(SettingsError::invalid(
                "grid_spacing_mm",
                format!("must be at least {} mm", MIN_GRID_SPACING_MM),
            ));
        }
        if self.selected_font.trim().is_empty() {
            return Err(SettingsError::invalid("selected_font", "must not be empty"));
        }
        Ok(())
    }

    /// Load preferences from a .json or .toml file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let prefs: Self = match format_of(path)? {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };
        prefs.validate()?;
        Ok(prefs)
    }

    /// Save preferences to a .json or .toml file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match format_of(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
