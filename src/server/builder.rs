//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function for automatic configuration loading.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{CrmError, Result};
use tracing::info;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/leadflow.yaml";

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| CrmError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with automatic configuration loading
pub async fn run_server(config_path: Option<&str>) -> Result<()> {
    let config_path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);

    let config = match Config::from_file(config_path).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Configuration file {} not usable ({}), using default config",
                config_path, e
            );
            Config::default()
        }
    };

    // A second init (tests installing their own subscriber) is a no-op
    let _ = crate::utils::logging::init_logging(config.logging());

    info!("Starting leadflow CRM core");
    info!("Configuration loaded from: {}", config_path);

    let server = HttpServer::new(&config).await?;
    info!(
        "Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /v1/identity/me - Authenticated identity");
    info!("   POST /v1/navigate - Navigation pre-flight");
    info!("   GET  /v1/pipeline/{{team}}/board - Stage board");
    info!("   POST /v1/pipeline/{{team}}/leads/{{id}}/stage - Stage change");

    server.start().await
}
