//! Error types for the profile database crate.

use thiserror::Error;

/// Errors that can occur during profile management operations.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The requested profile was not found.
    #[error("Profile not found: {0}")]
    NotFound(String),

    /// A required field is missing or empty.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A laser parameter is outside its valid range.
    #[error("Invalid {field}: {value} (expected {expected})")]
    InvalidParameter {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    /// The profile name reduces to an empty key.
    #[error("Profile name '{0}' has no usable characters")]
    InvalidName(String),

    /// Imported or stored data could not be decoded.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The key-value store failed.
    #[error(transparent)]
    Storage(#[from] img2gcode_core::StorageError),
}

impl From<ProfileError> for img2gcode_core::Error {
    fn from(e: ProfileError) -> Self {
        match e {
            ProfileError::NotFound(key) => img2gcode_core::Error::not_found("Profile", key),
            ProfileError::Storage(s) => img2gcode_core::Error::Storage(s),
            other => img2gcode_core::Error::other(other.to_string()),
        }
    }
}

/// Result type alias for profile operations.
pub type ProfileResult<T> = Result<T, ProfileError>;
