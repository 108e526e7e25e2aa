//! SDK error types

use dropout_repository::RepositoryError;
use dropout_runtime::RuntimeError;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Service cannot be built from the configured artifacts
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Submitted input is unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A required field is missing and has no default
    #[error("Schema mismatch: field '{field}' is missing and has no {policy} default")]
    SchemaMismatch { field: String, policy: &'static str },

    /// Transform or classifier failed on valid input
    #[error("Inference error: {0}")]
    InferenceError(RuntimeError),

    /// Artifact repository error
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

impl SdkError {
    /// True when the same request may succeed if retried
    pub fn is_retryable(&self) -> bool {
        matches!(self, SdkError::InferenceError(_))
    }
}

impl From<RuntimeError> for SdkError {
    fn from(err: RuntimeError) -> Self {
        match err {
            RuntimeError::SchemaMismatch { field, policy } => {
                SdkError::SchemaMismatch { field, policy }
            }
            RuntimeError::UnknownField(field) => {
                SdkError::InvalidInput(format!("unknown field '{}'", field))
            }
            err @ (RuntimeError::InvalidValue { .. } | RuntimeError::UnknownCategory { .. }) => {
                SdkError::InvalidInput(err.to_string())
            }
            other => SdkError::InferenceError(other),
        }
    }
}

impl From<dropout_core::CoreError> for SdkError {
    fn from(err: dropout_core::CoreError) -> Self {
        SdkError::InvalidInput(err.to_string())
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
