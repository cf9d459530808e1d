use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use img2gcode_core::storage::storage_keys;
use img2gcode_core::{
    shared_store, EventBus, FileStore, KeyValueStore, MemoryStore, SharedStore, StorageError,
};
use img2gcode_designer::model::DesignerShape;
use img2gcode_designer::{AutoConfirm, DesignerError, DesignerState, Shape};

fn state_with(store: SharedStore) -> DesignerState {
    DesignerState::new(store, Arc::new(EventBus::new()), Box::new(AutoConfirm(true)))
}

#[test]
fn test_thirty_by_twenty_rectangle_survives_save_and_load() {
    let store = shared_store(MemoryStore::new());
    let mut state = state_with(store.clone());

    state.add_rectangle();
    state.resize_selected(30.0, 20.0).unwrap();
    state.set_selection_position(25.0, 40.0).unwrap();
    state.save_project("P1").unwrap();

    let mut fresh = state_with(store);
    fresh.load_project("P1").unwrap();
    let objects: Vec<_> = fresh.canvas.design_objects().collect();
    assert_eq!(objects.len(), 1);
    let b = objects[0].shape.bounds();
    assert!((b.width() - 30.0).abs() < 0.1);
    assert!((b.height() - 20.0).abs() < 0.1);
    assert!((b.min_x - 25.0).abs() < 0.1);
    assert!((b.min_y - 40.0).abs() < 0.1);
    assert!(matches!(objects[0].shape, Shape::Rectangle(_)));
    assert_eq!(fresh.project_name, "P1");
    assert_eq!(fresh.projects().current().unwrap().as_deref(), Some("P1"));
}

#[test]
fn test_round_trip_restores_view_and_settings() {
    let store = shared_store(MemoryStore::new());
    let mut state = state_with(store.clone());
    state.add_text();
    state.add_circle();
    state.zoom_in();
    state.pan_by(12.0, -3.0);
    state.settings.selected_font = "Georgia".to_string();
    state.set_grayscale(true);
    state.set_workspace_size(300.0, 200.0).unwrap();
    state.save_project("Round").unwrap();
    assert!(!state.is_modified);

    let mut fresh = state_with(store);
    fresh.load_project("Round").unwrap();
    let (a, b) = (fresh.viewport.transform(), state.viewport.transform());
    for (x, y) in a.iter().zip(b.iter()) {
        assert!((x - y).abs() < 1e-9);
    }
    assert_eq!(fresh.settings, state.settings);
    assert_eq!(fresh.workspace.size(), state.workspace.size());
    let before: Vec<_> = state.canvas.design_objects().map(|o| o.shape.clone()).collect();
    let after: Vec<_> = fresh.canvas.design_objects().map(|o| o.shape.clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn test_saved_project_excludes_overlays() {
    let store = shared_store(MemoryStore::new());
    let mut state = state_with(store.clone());
    state.add_rectangle();
    state.save_project("Clean").unwrap();
    let raw = store.borrow().get(storage_keys::PROJECTS).unwrap().unwrap();
    assert!(!raw.contains("\"overlay\""));
    assert!(raw.contains("\"type\":\"rect\""));
}

#[test]
fn test_load_missing_leaves_state_untouched() {
    let mut state = state_with(shared_store(MemoryStore::new()));
    let id = state.add_rectangle();
    let err = state.load_project("Nope").unwrap_err();
    assert!(matches!(
        err,
        DesignerError::Core(img2gcode_core::Error::NotFound { .. })
    ));
    assert_eq!(state.canvas.design_count(), 1);
    assert!(state.canvas.get(id).is_some());
    assert_eq!(state.project_name, "Untitled");
    assert_eq!(state.error_log.len(), 1);
}

/// Memory store whose current-project writes can be made to fail.
struct PointerFailingStore {
    inner: MemoryStore,
    fail_pointer: Rc<Cell<bool>>,
}

impl KeyValueStore for PointerFailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == storage_keys::CURRENT_PROJECT && self.fail_pointer.get() {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                required: value.len(),
                quota: 0,
            });
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }

    fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }

    fn used_bytes(&self) -> usize {
        self.inner.used_bytes()
    }
}

#[test]
fn test_failed_pointer_write_keeps_unsaved_design() {
    let fail_pointer = Rc::new(Cell::new(false));
    let store = shared_store(PointerFailingStore {
        inner: MemoryStore::new(),
        fail_pointer: fail_pointer.clone(),
    });
    let mut saved = state_with(store.clone());
    saved.add_circle();
    saved.add_circle();
    saved.save_project("Two").unwrap();

    let mut state = state_with(store);
    let id = state.add_rectangle();
    fail_pointer.set(true);
    let err = state.load_project("Two").unwrap_err();
    assert!(matches!(
        err,
        DesignerError::Core(img2gcode_core::Error::Storage(StorageError::QuotaExceeded { .. }))
    ));
    assert_eq!(state.canvas.design_count(), 1);
    assert!(state.canvas.get(id).is_some());
    assert_eq!(state.project_name, "Untitled");
    assert!(state.is_modified);
}

#[test]
fn test_delete_current_clears_pointer() {
    let mut state = state_with(shared_store(MemoryStore::new()));
    state.add_rectangle();
    state.save_project("Gone").unwrap();
    assert!(state.delete_project("Gone").unwrap());
    assert_eq!(state.projects().current().unwrap(), None);
    assert_eq!(state.project_name, "Untitled");
}

#[test]
fn test_delete_declined_keeps_project() {
    let mut state = state_with(shared_store(MemoryStore::new()));
    state.save_project("Keep").unwrap();
    state.set_prompt(Box::new(AutoConfirm(false)));
    assert!(!state.delete_project("Keep").unwrap());
    assert!(state.projects().exists("Keep").unwrap());
}

#[test]
fn test_invalid_name_rejected_before_writing() {
    let store = shared_store(MemoryStore::new());
    let mut state = state_with(store.clone());
    assert!(state.save_project("bad/name").unwrap_err().is_validation_error());
    assert!(store.borrow().get(storage_keys::PROJECTS).unwrap().is_none());
}

#[test]
fn test_quota_exceeded_surfaces_user_message() {
    let store = shared_store(MemoryStore::with_quota(300));
    let mut state = state_with(store);
    for _ in 0..5 {
        state.add_text();
    }
    let err = state.save_project("Big").unwrap_err();
    assert!(err.user_message().starts_with("Storage is full"));
}

#[test]
fn test_duplicate_and_list() {
    let mut state = state_with(shared_store(MemoryStore::new()));
    state.add_rectangle();
    state.save_project("Base").unwrap();
    state.duplicate_project("Base", "Base 2").unwrap();
    assert!(state.duplicate_project("Base", "Base 2").is_err());
    let list = state.list_projects().unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|p| p.object_count == 1));
}

#[test]
fn test_projects_persist_in_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    {
        let mut state = state_with(shared_store(FileStore::open(&path).unwrap()));
        state.add_line();
        state.save_project("OnDisk").unwrap();
    }
    let mut state = state_with(shared_store(FileStore::open(&path).unwrap()));
    state.load_project("OnDisk").unwrap();
    assert_eq!(state.canvas.design_count(), 1);
}
