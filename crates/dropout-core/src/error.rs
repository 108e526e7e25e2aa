//! Error types for Dropout Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Duplicate field in schema: {0}")]
    DuplicateField(String),

    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Invalid value for field '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Unknown choice '{value}' for {kind}")]
    UnknownChoice { kind: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
