//! Dropout early-warning HTTP server
//!
//! Loads the model artifacts once and serves predictions over REST.

use anyhow::{Context, Result};
use dropout_sdk::PredictionServiceBuilder;
use dropout_server::api;
use dropout_server::config::{LogFormat, ServerConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Initialize tracing
    init_tracing(config.log_format)?;
    info!("Loaded configuration: {:?}", config);

    // Artifacts that fail to load or disagree with each other stop startup here
    let service = PredictionServiceBuilder::new()
        .with_repository(config.repository.clone())
        .with_config(config.service.clone())
        .build()
        .await
        .with_context(|| {
            format!(
                "Failed to build prediction service from '{}'",
                config.repository.base_path
            )
        })?;
    info!("Prediction service initialized");

    let app = api::create_router(Arc::new(service));

    // Start server
    let addr = config.addr();
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("✓ Server listening on http://{}", addr);
    info!("  Health check: http://{}/health", addr);
    info!("  Form descriptor: http://{}/v1/form", addr);
    info!("  Model status: http://{}/v1/model", addr);
    info!("  Prediction API: POST http://{}/v1/predict", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "dropout_server=info,dropout_sdk=info,dropout_runtime=info,tower_http=debug".into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
