//! API endpoint handlers

use super::extractors::JsonExtractor;
use super::types::*;
use crate::error::ServerError;
use axum::{extract::State, Json};
use dropout_sdk::{FormDescriptor, PredictionRequest, PredictionResponse, ServiceStatus};
use tracing::{info, warn};

/// Health check endpoint
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Form descriptor for the front end
pub(super) async fn form(State(state): State<AppState>) -> Json<FormDescriptor> {
    Json(state.service.form())
}

/// Loaded artifact summary
pub(super) async fn model_status(State(state): State<AppState>) -> Json<ServiceStatus> {
    Json(state.service.status())
}

/// Prediction endpoint, called once per submitted form
#[axum::debug_handler]
pub(super) async fn predict(
    State(state): State<AppState>,
    JsonExtractor(request): JsonExtractor<PredictionRequest>,
) -> Result<Json<PredictionResponse>, ServerError> {
    info!(
        "Received prediction request: form={}, {} raw features",
        request.student.is_some(),
        request.features.len()
    );

    let response = state.service.assess(request).map_err(|e| {
        let e = ServerError::from(e);
        warn!("Prediction rejected: {}", e);
        e
    })?;

    info!(
        "request_id={} label={} risk={} in {}ms",
        response.request_id,
        response.prediction.label,
        response.dropout_risk_display,
        response.processing_time_ms
    );

    Ok(Json(response))
}
