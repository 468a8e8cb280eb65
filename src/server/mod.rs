//! HTTP server implementation
//!
//! This module provides the HTTP server and routing functionality.

// Submodules
pub mod middleware;
pub mod routes;

pub mod builder;
pub mod server;
pub mod state;

// Re-export commonly used types
pub use builder::{ServerBuilder, run_server};
pub use server::HttpServer;
pub use state::AppState;
