//! Runtime error types

use dropout_core::CoreError;
use thiserror::Error;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A schema field is absent from the input and no default can be produced
    #[error("Schema mismatch: no value or default available for field '{field}' (fill policy: {policy})")]
    SchemaMismatch { field: String, policy: &'static str },

    /// Input names a field the schema does not know
    #[error("Unknown input field: {0}")]
    UnknownField(String),

    /// Input value is unusable
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// Categorical value outside the fitted categories
    #[error("Unknown category {value} for column '{column}'")]
    UnknownCategory { column: String, value: f64 },

    /// Record does not line up with what a stage expects
    #[error("Feature width mismatch: expected {expected}, got {actual}")]
    FeatureWidthMismatch { expected: usize, actual: usize },

    /// Record columns are not in the order a stage expects
    #[error("Column order mismatch at position {position}: expected '{expected}', got '{actual}'")]
    ColumnOrderMismatch {
        position: usize,
        expected: String,
        actual: String,
    },

    /// Artifact content is malformed or inconsistent
    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    /// Model objective this runtime cannot evaluate
    #[error("Unsupported model objective: {0}")]
    UnsupportedObjective(String),

    /// Classifier produced something other than a usable distribution
    #[error("Invalid model output: {0}")]
    InvalidModelOutput(String),

    /// Reference dataset could not be parsed
    #[error("Reference data error at line {line}: {reason}")]
    ReferenceData { line: usize, reason: String },

    /// JSON artifact parse error
    #[error("Failed to parse JSON artifact: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Core type error
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl RuntimeError {
    /// True for errors caused by what the user submitted rather than by the artifacts
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            RuntimeError::SchemaMismatch { .. }
                | RuntimeError::UnknownField(_)
                | RuntimeError::InvalidValue { .. }
                | RuntimeError::UnknownCategory { .. }
        )
    }
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_message() {
        let err = RuntimeError::SchemaMismatch {
            field: "Application_mode".to_string(),
            policy: "median",
        };
        let msg = err.to_string();
        assert!(msg.contains("Schema mismatch"));
        assert!(msg.contains("Application_mode"));
        assert!(msg.contains("median"));
        assert!(err.is_user_error());
    }

    #[test]
    fn test_artifact_errors_are_not_user_errors() {
        assert!(!RuntimeError::InvalidArtifact("bad tree".to_string()).is_user_error());
        assert!(!RuntimeError::InvalidModelOutput("nan".to_string()).is_user_error());
    }

    #[test]
    fn test_core_error_conversion() {
        let err: RuntimeError = CoreError::FieldNotFound("Course".to_string()).into();
        assert_eq!(err.to_string(), "Field not found: Course");
    }
}
