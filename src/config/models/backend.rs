//! REST backend client configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Configuration for the black-box REST backend this core talks to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend API
    #[serde(default = "default_backend_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Bearer token forwarded to the backend, if any
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            timeout: default_timeout(),
            bearer_token: None,
        }
    }
}

impl BackendConfig {
    /// Merge backend configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.base_url != default_backend_url() {
            self.base_url = other.base_url;
        }
        if other.timeout != default_timeout() {
            self.timeout = other.timeout;
        }
        if other.bearer_token.is_some() {
            self.bearer_token = other.bearer_token;
        }
        self
    }

    /// Validate backend configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("Backend base URL cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("Backend base URL must use http:// or https://".to_string());
        }

        if self.timeout == 0 {
            return Err("Backend timeout cannot be 0".to_string());
        }

        Ok(())
    }
}
