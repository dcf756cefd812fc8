use thiserror::Error;

/// Unified error type for release-tagger operations
#[derive(Error, Debug)]
pub enum ReleaseTaggerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("GitHub API error: {0}")]
    Api(String),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] Box<ureq::Error>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-tagger
pub type Result<T> = std::result::Result<T, ReleaseTaggerError>;

impl ReleaseTaggerError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseTaggerError::Config(msg.into())
    }

    /// Create a validation error with context
    pub fn validation(msg: impl Into<String>) -> Self {
        ReleaseTaggerError::Validation(msg.into())
    }

    /// Create an API error with context
    pub fn api(msg: impl Into<String>) -> Self {
        ReleaseTaggerError::Api(msg.into())
    }
}
