//! # img2gcode Core
//!
//! Core types, traits, and utilities for img2gcode.
//! Provides the storage abstraction that stands in for browser local
//! storage, the unified error types, display units, the rolling error log
//! and the application event bus.

pub mod constants;
pub mod error;
pub mod error_log;
pub mod event_bus;
pub mod storage;
pub mod units;

pub use error::{Error, Result, StorageError, ValidationError};
pub use error_log::{ErrorLog, ErrorLogEntry};

// Re-export event bus for convenience
pub use event_bus::{
    AppEvent, EventBus, EventBusConfig, EventCategory, EventFilter, ObjectEvent, ProjectEvent,
    SubscriptionId, ViewEvent,
};

pub use storage::{shared_store, storage_keys, FileStore, KeyValueStore, MemoryStore, SharedStore};
pub use units::MeasurementSystem;
