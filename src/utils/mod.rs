//! Utility modules for the CRM core
//!
//! - **error**: error handling and the crate-wide result alias
//! - **logging**: tracing subscriber setup

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{CrmError, Result};

use uuid::Uuid;

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
