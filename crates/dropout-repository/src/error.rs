//! Error types for the repository layer

use dropout_runtime::RuntimeError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors that can occur while loading artifacts
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Artifact file does not exist
    #[error("Artifact not found: {path}")]
    NotFound { path: String },

    /// Repository root does not exist
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Artifact exists but could not be parsed or validated
    #[error("Invalid artifact {path}: {source}")]
    Artifact {
        path: String,
        #[source]
        source: RuntimeError,
    },

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Repository configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("Repository error: {0}")]
    Other(String),
}
