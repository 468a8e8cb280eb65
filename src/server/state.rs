//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::pipeline::{HttpLeadBackend, PipelineService};
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for efficient sharing across threads.
#[derive(Clone)]
pub struct AppState {
    /// Core configuration (shared read-only)
    pub config: Arc<Config>,
    /// Per-team board and engine registry
    pub pipeline: Arc<PipelineService<HttpLeadBackend>>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, pipeline: PipelineService<HttpLeadBackend>) -> Self {
        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
        }
    }

    /// Get core configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
