//! Configuration data models
//!
//! This module defines all configuration structures used throughout the core.

pub mod backend;
pub mod crm;
pub mod logging;
pub mod server;
pub mod session;

// Re-export all configuration types
pub use backend::*;
pub use crm::*;
pub use logging::*;
pub use server::*;
pub use session::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default backend base URL
pub fn default_backend_url() -> String {
    "http://localhost:9000/api".to_string()
}
