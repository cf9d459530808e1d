use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    /// The network request failed before a response arrived
    #[error("Network request for {url} failed: {reason}")]
    Network { url: String, reason: String },

    /// A route pattern did not compile
    #[error("Invalid route pattern: {0}")]
    InvalidRoute(#[from] regex::Error),
}

impl CacheError {
    pub fn network(url: impl Into<String>, reason: impl Into<String>) -> Self {
        CacheError::Network {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

impl From<CacheError> for img2gcode_core::Error {
    fn from(e: CacheError) -> Self {
        img2gcode_core::Error::other(e.to_string())
    }
}

pub type CacheResult<T> = Result<T, CacheError>;
