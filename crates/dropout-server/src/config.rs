//! Server configuration

use dropout_sdk::{RepositoryConfig, ServiceConfig};
use serde::{Deserialize, Serialize};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    pub log_format: LogFormat,

    /// Where the model artifacts are loaded from
    pub repository: RepositoryConfig,

    /// Default-fill behaviour of the prediction service
    pub service: ServiceConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_format: LogFormat::default(),
            repository: RepositoryConfig::default(),
            service: ServiceConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config file
    ///
    /// Nested keys use a double underscore, e.g.
    /// `DROPOUT_REPOSITORY__BASE_PATH=/srv/models`.
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/server").required(false))
            .add_source(
                config::Environment::with_prefix("DROPOUT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build();

        match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e)),
            Err(e) => {
                eprintln!("Unreadable config file ({}), using default configuration", e);
                Ok(Self::default())
            }
        }
    }

    /// Socket address to bind
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
