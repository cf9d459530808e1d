//! Preferences in the key-value store, and where that store lives on disk.

use img2gcode_core::storage::{read_json, storage_keys, write_json};
use img2gcode_core::KeyValueStore;
use std::path::PathBuf;

use crate::config::Preferences;
use crate::error::{SettingsError, SettingsResult};

const APP_DIR: &str = "img2gcode";
const STORE_FILE: &str = "store.json";

/// Platform data directory for img2gcode.
pub fn default_data_dir() -> SettingsResult<PathBuf> {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .map(|d| d.join(APP_DIR))
        .ok_or_else(|| SettingsError::ConfigDirectory("no data or home directory".to_string()))
}

/// Default path of the file-backed store.
pub fn default_store_path() -> SettingsResult<PathBuf> {
    Ok(default_data_dir()?.join(STORE_FILE))
}

/// Reads stored preferences. Missing or invalid documents yield the
/// defaults; an unreadable store is an error.
pub fn load_preferences(store: &dyn KeyValueStore) -> SettingsResult<Preferences> {
    let prefs = match read_json::<Preferences>(store, storage_keys::PREFERENCES) {
        Ok(Some(prefs)) => prefs,
        Ok(None) => return Ok(Preferences::default()),
        Err(img2gcode_core::StorageError::Corrupt { reason, .. }) => {
            tracing::warn!("Stored preferences unreadable, using defaults: {}", reason);
            return Ok(Preferences::default());
        }
        Err(e) => return Err(e.into()),
    };
    if let Err(e) = prefs.validate() {
        tracing::warn!("Stored preferences invalid, using defaults: {}", e);
        return Ok(Preferences::default());
    }
    Ok(prefs)
}

pub fn save_preferences(store: &mut dyn KeyValueStore, prefs: &Preferences) -> SettingsResult<()> {
    prefs.validate()?;
    write_json(store, storage_keys::PREFERENCES, prefs)?;
    tracing::debug!("Preferences saved");
    Ok(())
}
