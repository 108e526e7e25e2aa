//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dropout_sdk::SdkError;
use serde_json::json;
use std::fmt;

/// Server error type
#[derive(Debug)]
pub enum ServerError {
    /// Request body or field values are unusable
    InvalidRequest(String),

    /// A required field is missing and has no default
    SchemaMismatch(String),

    /// Transform or classifier failed; the service stays usable
    InferenceError(String),

    /// Internal server error
    InternalError(String),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::SchemaMismatch(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::InferenceError(_) | ServerError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, ServerError::InferenceError(_))
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ServerError::SchemaMismatch(msg) => write!(f, "Schema mismatch: {}", msg),
            ServerError::InferenceError(msg) => write!(f, "Inference error: {}", msg),
            ServerError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let retryable = self.is_retryable();
        let error_message = match self {
            ServerError::InvalidRequest(msg)
            | ServerError::SchemaMismatch(msg)
            | ServerError::InferenceError(msg)
            | ServerError::InternalError(msg) => msg,
        };

        let mut body = json!({
            "error": error_message,
            "status": status.as_u16(),
        });
        if retryable {
            body["retryable"] = json!(true);
        }

        (status, Json(body)).into_response()
    }
}

impl From<SdkError> for ServerError {
    fn from(err: SdkError) -> Self {
        match err {
            SdkError::InvalidInput(msg) => ServerError::InvalidRequest(msg),
            err @ SdkError::SchemaMismatch { .. } => ServerError::SchemaMismatch(err.to_string()),
            SdkError::InferenceError(e) => ServerError::InferenceError(e.to_string()),
            other => ServerError::InternalError(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::InternalError(err.to_string())
    }
}
