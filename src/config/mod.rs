//! Configuration management for the CRM core
//!
//! This module handles loading, validation, and management of all configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{CrmError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the CRM core
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// CRM configuration
    pub crm: CrmConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CrmError::Config(format!("Failed to read config file: {}", e)))?;

        let crm: CrmConfig = serde_yaml::from_str(&content)
            .map_err(|e| CrmError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { crm };

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let crm = CrmConfig::from_env()?;
        let config = Self { crm };

        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.crm.server
    }

    /// Get backend configuration
    pub fn backend(&self) -> &BackendConfig {
        &self.crm.backend
    }

    /// Get session configuration
    pub fn session(&self) -> &SessionConfig {
        &self.crm.session
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.crm.logging
    }
}
