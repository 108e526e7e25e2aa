//! Custom extractors
//!
//! Provides a JSON extractor whose rejections match the server's error body.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde_json::json;

/// JSON extractor for prediction requests
///
/// Every rejection, including bodies that parse but do not fit the request
/// shape (unknown form fields, unrecognised selector labels), is reported as
/// 400 with the offending path in the message.
pub struct JsonExtractor<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonExtractor<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => {
                let error_message = match rejection {
                    JsonRejection::JsonDataError(err) => {
                        format!("Invalid prediction request: {}", err.body_text())
                    }
                    JsonRejection::JsonSyntaxError(err) => {
                        format!("Malformed prediction request JSON: {}", err.body_text())
                    }
                    JsonRejection::MissingJsonContentType(_) => {
                        "Prediction requests require 'Content-Type: application/json'".to_string()
                    }
                    _ => format!("Unreadable prediction request body: {}", rejection),
                };

                Err((
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": error_message,
                        "status": 400,
                    })),
                ))
            }
        }
    }
}
