//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.

use super::Config;
use crate::utils::error::{CrmError, Result};
use tracing::debug;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for Config {
    fn validate(&self) -> Result<()> {
        debug!("Validating CRM configuration");

        self.crm.server.validate().map_err(CrmError::Config)?;
        self.crm.backend.validate().map_err(CrmError::Config)?;
        self.crm.session.validate().map_err(CrmError::Config)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = Config::default();
        config.crm.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backend_url_scheme_enforced() {
        let mut config = Config::default();
        config.crm.backend.base_url = "ftp://backend".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_session_key_rejected() {
        let mut config = Config::default();
        config.crm.session.token_key = String::new();
        assert!(config.validate().is_err());
    }
}
