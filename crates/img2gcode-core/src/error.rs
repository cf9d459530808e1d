//! Error handling for img2gcode
//!
//! Provides the error types shared by every layer of the application:
//! - Validation errors (project names, selections, workspace limits)
//! - Storage errors (quota, corrupt documents, file access)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Validation error type
///
/// Raised before any state is mutated; the caller surfaces the message to
/// the user through a dialog or inline status text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A name was empty after trimming
    #[error("{field} must not be empty")]
    Empty {
        /// The field that was empty.
        field: &'static str,
    },

    /// A name exceeded the maximum length
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// The field that was too long.
        field: &'static str,
        /// The maximum number of characters.
        max: usize,
    },

    /// A name contained a character outside the accepted set
    #[error("{field} contains an invalid character: '{character}'")]
    InvalidCharacter {
        /// The field that contained the character.
        field: &'static str,
        /// The offending character.
        character: char,
    },

    /// An operation required a selection but nothing was selected
    #[error("No object selected")]
    NoSelection,

    /// A numeric value was outside its accepted range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// The field name.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Lower bound (inclusive).
        min: f64,
        /// Upper bound (inclusive).
        max: f64,
    },

    /// A serialized document exceeded its size limit
    #[error("{field} is too large: {size} bytes (limit {max})")]
    TooLarge {
        /// What was being serialized.
        field: &'static str,
        /// Actual size in bytes.
        size: usize,
        /// Limit in bytes.
        max: usize,
    },

    /// A file had an unsupported extension
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
}

/// Storage error type
///
/// Represents failures of the key-value store that backs projects,
/// machine profiles and preferences.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Writing the value would exceed the store quota
    #[error("Storage quota exceeded writing '{key}': {required} bytes needed, {quota} available")]
    QuotaExceeded {
        /// The key being written.
        key: String,
        /// Total bytes the store would hold after the write.
        required: usize,
        /// The store quota in bytes.
        quota: usize,
    },

    /// A stored document could not be decoded
    #[error("Corrupt data under '{key}': {reason}")]
    Corrupt {
        /// The key holding the corrupt value.
        key: String,
        /// The decode failure.
        reason: String,
    },

    /// A value could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backing file I/O failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main error type for img2gcode
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Validation error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage error
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A named item (project, profile, object) does not exist
    #[error("{kind} not found: {name}")]
    NotFound {
        /// What kind of item was looked up.
        kind: &'static str,
        /// The requested name or id.
        name: String,
    },

    /// A named item already exists
    #[error("{kind} already exists: {name}")]
    AlreadyExists {
        /// What kind of item collided.
        kind: &'static str,
        /// The conflicting name.
        name: String,
    },

    /// The user declined a confirmation prompt
    #[error("Cancelled by user")]
    Cancelled,

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Create a not-found error
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Check if this is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if the store ran out of space
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Error::Storage(StorageError::QuotaExceeded { .. }))
    }

    /// Message suitable for showing in a dialog
    pub fn user_message(&self) -> String {
        match self {
            Error::Storage(StorageError::QuotaExceeded { .. }) => {
                "Storage is full. Delete some projects or images and try again.".to_string()
            }
            Error::Storage(StorageError::Corrupt { key, .. }) => {
                format!("Saved data under '{}' is damaged and could not be read.", key)
            }
            other => other.to_string(),
        }
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
