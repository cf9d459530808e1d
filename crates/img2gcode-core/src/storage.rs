//! Key-value persistence.
//!
//! Projects, machine profiles and preferences are stored as JSON strings
//! under fixed keys, the same shape browser local storage gives a web
//! front end. [`MemoryStore`] is the volatile implementation used by tests
//! and embedders; [`FileStore`] keeps the whole map in one JSON file.
//! Both enforce a byte quota over the sum of key and value lengths.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::constants::DEFAULT_STORAGE_QUOTA_BYTES;
use crate::error::StorageError;

/// Well-known storage keys.
pub mod storage_keys {
    pub const PROJECTS: &str = "img2gcode.projects";
    pub const CURRENT_PROJECT: &str = "img2gcode.currentProject";
    pub const MACHINE_PROFILES: &str = "img2gcode.machineProfiles";
    pub const ACTIVE_PROFILE: &str = "img2gcode.activeProfile";
    pub const PREFERENCES: &str = "img2gcode.preferences";
}

/// String-keyed, string-valued store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Fails with [`StorageError::QuotaExceeded`] without modifying the
    /// store when the write does not fit.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    fn keys(&self) -> Vec<String>;

    /// Bytes currently held.
    fn used_bytes(&self) -> usize;
}

/// Reads and decodes a JSON document.
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}

/// Encodes and writes a JSON document.
pub fn write_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// A store shared by the project, profile and preference layers of one
/// session.
pub type SharedStore = Rc<RefCell<dyn KeyValueStore>>;

pub fn shared_store<S: KeyValueStore + 'static>(store: S) -> SharedStore {
    Rc::new(RefCell::new(store))
}

fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

fn check_quota(
    entries: &BTreeMap<String, String>,
    key: &str,
    value: &str,
    quota: usize,
) -> Result<(), StorageError> {
    let current: usize = entries.iter().map(|(k, v)| entry_size(k, v)).sum();
    let replaced = entries.get(key).map(|v| entry_size(key, v)).unwrap_or(0);
    let required = current - replaced + entry_size(key, value);
    if required > quota {
        return Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            required,
            quota,
        });
    }
    Ok(())
}

/// Volatile store.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    quota: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_quota(DEFAULT_STORAGE_QUOTA_BYTES)
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        check_quota(&self.entries, key, value, self.quota)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| entry_size(k, v)).sum()
    }
}

/// Store persisted as a single JSON object on disk.
///
/// Every mutation rewrites the file through a temporary sibling and a
/// rename, so a crash never leaves a half-written document behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    quota: usize,
}

impl FileStore {
    /// Opens the store at `path`, starting empty when the file is missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::open_with_quota(path, DEFAULT_STORAGE_QUOTA_BYTES)
    }

    pub fn open_with_quota(path: impl AsRef<Path>, quota: usize) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| StorageError::Corrupt {
                    key: path.display().to_string(),
                    reason: e.to_string(),
                })?
            }
        } else {
            BTreeMap::new()
        };
        tracing::debug!("Opened store {} ({} keys)", path.display(), entries.len());
        Ok(Self {
            path,
            entries,
            quota,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        check_quota(&self.entries, key, value, self.quota)?;
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| entry_size(k, v)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        count: u32,
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.remove("a").unwrap();
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_quota_rejects_without_mutation() {
        let mut store = MemoryStore::with_quota(16);
        store.set("key", "0123456789").unwrap();
        let err = store.set("other", "0123456789").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
        assert_eq!(store.keys(), vec!["key".to_string()]);

        // Replacing an existing value only counts the new size
        store.set("key", "abcdefghijkl").unwrap();
        assert_eq!(store.used_bytes(), 15);
    }

    #[test]
    fn test_json_helpers() {
        let mut store = MemoryStore::new();
        let doc = Doc {
            name: "laser".to_string(),
            count: 3,
        };
        write_json(&mut store, "doc", &doc).unwrap();
        let loaded: Option<Doc> = read_json(&store, "doc").unwrap();
        assert_eq!(loaded, Some(doc));

        store.set("broken", "{not json").unwrap();
        let err = read_json::<Doc>(&store, "broken").unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        {
            let mut store = FileStore::open(&path).unwrap();
            store.set(storage_keys::PREFERENCES, "{\"grid\":true}").unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(
            store.get(storage_keys::PREFERENCES).unwrap().as_deref(),
            Some("{\"grid\":true}")
        );
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(
            FileStore::open(&path),
            Err(StorageError::Corrupt { .. })
        ));
    }
}
