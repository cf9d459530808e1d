//! img2gcode Settings Crate
//!
//! User preferences, their persistence in the key-value store or in a
//! config file, and the default location of the file-backed store.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::Preferences;
pub use error::{SettingsError, SettingsResult};
pub use persistence::{default_data_dir, default_store_path, load_preferences, save_preferences};
