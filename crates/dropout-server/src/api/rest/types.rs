//! REST API type definitions
//!
//! The prediction payloads are the SDK's own request and response types;
//! only server-specific shapes live here.

use dropout_sdk::PredictionService;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
