use std::path::PathBuf;
use thiserror::Error;

/// Domain-level errors for skyline-keys operations
///
/// The import pipeline itself reports through [`super::ImportResult`]; these
/// errors cover everything around it.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid key type: {0}")]
    InvalidKeyType(String),

    #[error("Not a recognized key file: {}", .path.display())]
    UnrecognizedKeyFile {
        path: PathBuf,
    },

    #[error("Key store unavailable at {}: {source}", .path.display())]
    KeyStoreUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<config::ConfigError> for DomainError {
    fn from(err: config::ConfigError) -> Self {
        DomainError::Config(err.to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
