//! Main CRM core configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Main CRM core configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CrmConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// REST backend configuration
    #[serde(default)]
    pub backend: BackendConfig,
    /// Session boundary configuration
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CrmConfig {
    /// Build a configuration from environment variables
    pub fn from_env() -> crate::utils::error::Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("LEADFLOW_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("LEADFLOW_PORT") {
            config.server.port = port.parse().map_err(|_| {
                crate::utils::error::CrmError::config(format!("Invalid LEADFLOW_PORT: {}", port))
            })?;
        }
        if let Ok(url) = std::env::var("LEADFLOW_BACKEND_URL") {
            config.backend.base_url = url;
        }
        if let Ok(token) = std::env::var("LEADFLOW_BACKEND_TOKEN") {
            config.backend.bearer_token = Some(token);
        }
        if let Ok(level) = std::env::var("LEADFLOW_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.backend = self.backend.merge(other.backend);
        self.session = self.session.merge(other.session);
        self.logging = self.logging.merge(other.logging);
        self
    }
}
