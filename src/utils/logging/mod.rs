//! Logging setup
//!
//! Tracing subscriber initialization driven by `LoggingConfig`.

use crate::config::LoggingConfig;
use crate::utils::error::{CrmError, Result};
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// The filter resolves in order: `RUST_LOG` if set, otherwise the
/// configured level. Calling this twice returns an error rather than
/// panicking, so tests can install their own subscribers.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| CrmError::config(format!("Failed to initialize logging: {}", e)))
}
