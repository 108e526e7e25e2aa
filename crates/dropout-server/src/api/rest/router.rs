//! Router creation and configuration

use super::handlers::*;
use super::types::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use dropout_sdk::PredictionService;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create REST API router
pub fn create_router(service: Arc<PredictionService>) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/health", get(health))
        .route("/v1/form", get(form))
        .route("/v1/model", get(model_status))
        .route("/v1/predict", post(predict))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
