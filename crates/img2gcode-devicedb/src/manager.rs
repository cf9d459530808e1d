//! Profile storage.
//!
//! Profiles live in one JSON map under `img2gcode.machineProfiles`, keyed
//! by their sanitized key. The active profile key is stored separately so
//! projects never depend on it.

use std::collections::BTreeMap;

use chrono::Utc;
use img2gcode_core::storage::{read_json, storage_keys, write_json, SharedStore};

use crate::error::{ProfileError, ProfileResult};
use crate::model::{sanitize_key, LaserSettings, MachineProfile};

type ProfileMap = BTreeMap<String, MachineProfile>;

pub struct ProfileManager {
    store: SharedStore,
}

impl ProfileManager {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    fn read_map(&self) -> ProfileResult<ProfileMap> {
        let store = self.store.borrow();
        Ok(read_json(&*store, storage_keys::MACHINE_PROFILES)?.unwrap_or_default())
    }

    fn write_map(&self, map: &ProfileMap) -> ProfileResult<()> {
        let mut store = self.store.borrow_mut();
        write_json(&mut *store, storage_keys::MACHINE_PROFILES, map)?;
        Ok(())
    }

    /// Profiles sorted by name.
    pub fn list(&self) -> ProfileResult<Vec<MachineProfile>> {
        let mut profiles: Vec<_> = self.read_map()?.into_values().collect();
        profiles.sort_by_key(|p| p.name.to_lowercase());
        Ok(profiles)
    }

    /// Looks a profile up by name or key.
    pub fn get(&self, name_or_key: &str) -> ProfileResult<Option<MachineProfile>> {
        Ok(self.read_map()?.remove(&sanitize_key(name_or_key)))
    }

    /// Creates or updates the profile called `name`. Updating keeps the
    /// original creation time.
    pub fn save(&self, name: &str, settings: LaserSettings) -> ProfileResult<MachineProfile> {
        let mut profile = MachineProfile::new(name, settings)?;
        let mut map = self.read_map()?;
        if let Some(existing) = map.get(&profile.key) {
            profile.created = existing.created;
            profile.modified = Utc::now();
        }
        map.insert(profile.key.clone(), profile.clone());
        self.write_map(&map)?;
        tracing::info!("Saved machine profile '{}' ({})", profile.name, profile.key);
        Ok(profile)
    }

    /// Removes a profile; clears the active pointer when it pointed there.
    pub fn delete(&self, name_or_key: &str) -> ProfileResult<MachineProfile> {
        let key = sanitize_key(name_or_key);
        let mut map = self.read_map()?;
        let removed = map
            .remove(&key)
            .ok_or_else(|| ProfileError::NotFound(name_or_key.to_string()))?;
        self.write_map(&map)?;
        if self.active_key()?.as_deref() == Some(key.as_str()) {
            self.store.borrow_mut().remove(storage_keys::ACTIVE_PROFILE)?;
        }
        Ok(removed)
    }

    pub fn active_key(&self) -> ProfileResult<Option<String>> {
        Ok(self.store.borrow().get(storage_keys::ACTIVE_PROFILE)?)
    }

    /// The active profile, if one is set and still exists.
    pub fn active(&self) -> ProfileResult<Option<MachineProfile>> {
        match self.active_key()? {
            Some(key) => self.get(&key),
            None => Ok(None),
        }
    }

    pub fn set_active(&self, name_or_key: &str) -> ProfileResult<MachineProfile> {
        let profile = self
            .get(name_or_key)?
            .ok_or_else(|| ProfileError::NotFound(name_or_key.to_string()))?;
        self.store
            .borrow_mut()
            .set(storage_keys::ACTIVE_PROFILE, &profile.key)?;
        Ok(profile)
    }

    /// All profiles as a pretty-printed JSON array.
    pub fn export_json(&self) -> ProfileResult<String> {
        Ok(serde_json::to_string_pretty(&self.list()?)?)
    }

    /// Adds the profiles of a JSON array, replacing same-keyed ones; a later
    /// entry wins over an earlier one with the same key. Returns how many
    /// distinct profiles were written.
    pub fn import_json(&self, json: &str) -> ProfileResult<usize> {
        let incoming: Vec<MachineProfile> = serde_json::from_str(json)?;
        let mut imported = ProfileMap::new();
        for mut profile in incoming {
            profile.settings.validate()?;
            profile.key = sanitize_key(&profile.name);
            if profile.key.is_empty() {
                return Err(ProfileError::InvalidName(profile.name));
            }
            imported.insert(profile.key.clone(), profile);
        }
        let count = imported.len();
        let mut map = self.read_map()?;
        map.extend(imported);
        self.write_map(&map)?;
        Ok(count)
    }
}

impl std::fmt::Debug for ProfileManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileManager").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use img2gcode_core::{shared_store, FileStore, MemoryStore};

    fn manager() -> ProfileManager {
        ProfileManager::new(shared_store(MemoryStore::new()))
    }

    #[test]
    fn test_save_update_keeps_created() {
        let profiles = manager();
        let first = profiles.save("Diode 10W", LaserSettings::default()).unwrap();
        let faster = LaserSettings {
            speed: 3000.0,
            ..Default::default()
        };
        let second = profiles.save("diode 10w", faster).unwrap();
        assert_eq!(second.key, first.key);
        assert_eq!(second.created, first.created);
        assert!(second.modified >= first.modified);
        assert_eq!(profiles.list().unwrap().len(), 1);
        assert_eq!(profiles.get("Diode 10W").unwrap().unwrap().settings.speed, 3000.0);
    }

    #[test]
    fn test_delete_active_clears_pointer() {
        let profiles = manager();
        profiles.save("CO2", LaserSettings::default()).unwrap();
        profiles.set_active("CO2").unwrap();
        assert_eq!(profiles.active().unwrap().unwrap().key, "co2");
        profiles.delete("CO2").unwrap();
        assert_eq!(profiles.active_key().unwrap(), None);
        assert!(matches!(profiles.delete("CO2"), Err(ProfileError::NotFound(_))));
    }

    #[test]
    fn test_set_active_unknown() {
        assert!(matches!(manager().set_active("nope"), Err(ProfileError::NotFound(_))));
    }

    #[test]
    fn test_export_import() {
        let source = manager();
        source.save("A", LaserSettings::default()).unwrap();
        source.save("B", LaserSettings::default()).unwrap();
        let json = source.export_json().unwrap();

        let target = manager();
        assert_eq!(target.import_json(&json).unwrap(), 2);
        assert_eq!(target.list().unwrap(), source.list().unwrap());
        assert!(target.import_json("not json").is_err());
    }

    #[test]
    fn test_import_counts_distinct_keys() {
        let source = manager();
        source.save("Diode", LaserSettings::default()).unwrap();
        let mut entries = source.list().unwrap();
        let mut renamed = entries[0].clone();
        renamed.name = "DIODE".to_string();
        renamed.settings.power = 20.0;
        entries.push(renamed);
        let json = serde_json::to_string(&entries).unwrap();

        let target = manager();
        assert_eq!(target.import_json(&json).unwrap(), 1);
        let stored = target.list().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].settings.power, 20.0);
    }

    #[test]
    fn test_profiles_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        ProfileManager::new(shared_store(FileStore::open(&path).unwrap()))
            .save("Engraver", LaserSettings::default())
            .unwrap();
        let reopened = ProfileManager::new(shared_store(FileStore::open(&path).unwrap()));
        assert!(reopened.get("engraver").unwrap().is_some());
    }
}
