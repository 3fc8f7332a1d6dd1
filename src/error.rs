use crate::domain::Scheme;
use thiserror::Error;

/// Unified error type for version-scanner operations
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("unsupported versioning scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid {scheme} version: '{value}'")]
    InvalidVersion { scheme: Scheme, value: String },

    #[error("no valid {scheme} tags found after filtering")]
    NoValidTags { scheme: Scheme },

    #[error("no tags found in repository")]
    NoTags,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in version-scanner
pub type Result<T> = std::result::Result<T, ScanError>;

impl ScanError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ScanError::Config(msg.into())
    }

    /// Create an authentication error with context
    pub fn auth(msg: impl Into<String>) -> Self {
        ScanError::Auth(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        ScanError::Remote(msg.into())
    }

    /// Create a version parse error for the given scheme
    pub fn invalid_version(scheme: Scheme, value: impl Into<String>) -> Self {
        ScanError::InvalidVersion {
            scheme,
            value: value.into(),
        }
    }
}
