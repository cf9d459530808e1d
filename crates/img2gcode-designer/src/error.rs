//! Designer error type.

use thiserror::Error;

/// Errors raised by designer operations.
#[derive(Error, Debug)]
pub enum DesignerError {
    #[error(transparent)]
    Core(#[from] img2gcode_core::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("Font error: {0}")]
    Font(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Export failed: {0}")]
    Export(String),
}

impl DesignerError {
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        DesignerError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Message suitable for showing in a dialog.
    pub fn user_message(&self) -> String {
        match self {
            DesignerError::Core(e) => e.user_message(),
            DesignerError::Image(_) | DesignerError::InvalidDataUrl(_) => {
                format!("The image could not be loaded ({}).", self)
            }
            other => other.to_string(),
        }
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(self, DesignerError::Core(e) if e.is_validation_error())
    }
}

impl From<img2gcode_core::ValidationError> for DesignerError {
    fn from(e: img2gcode_core::ValidationError) -> Self {
        DesignerError::Core(e.into())
    }
}

impl From<img2gcode_core::StorageError> for DesignerError {
    fn from(e: img2gcode_core::StorageError) -> Self {
        DesignerError::Core(e.into())
    }
}

pub type DesignerResult<T> = Result<T, DesignerError>;
