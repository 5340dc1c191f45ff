//! FieldGuard error types

use thiserror::Error;

/// FieldGuard error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (invalid pattern, bad rule table, double install)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested pattern name is not registered
    #[error("Pattern not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parse error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Whether this error means an unknown pattern name was requested
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

/// Result type alias for FieldGuard operations
pub type Result<T> = std::result::Result<T, Error>;
