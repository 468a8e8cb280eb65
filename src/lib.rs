//! # leadflow-rs
//!
//! Access and pipeline control core for a lead-management CRM.
//!
//! ## Features
//!
//! - **Team resolution**: canonical team slugs derived from free-form
//!   department/role text via an ordered, typo-tolerant cascade
//! - **Session reading**: explicit session snapshots with an unverified
//!   bearer-payload fallback (read-only UX convenience, never a security
//!   boundary)
//! - **Route guards**: composable gate predicates evaluated short-circuit,
//!   with a fixed default-landing table
//! - **Pipeline engine**: Kanban stage boards with an asymmetric
//!   confirmation policy (forward moves are free, regressions confirm) and
//!   optimistic mutations that roll back exactly on backend rejection
//! - **HTTP facade**: actix-web server exposing navigation decisions and
//!   board transitions over JSON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use leadflow_rs::{Config, Leadflow};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/leadflow.yaml").await?;
//!     let app = Leadflow::new(config).await?;
//!     app.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Library use
//!
//! The access core is framework-independent: build a [`Session`], read an
//! [`Identity`] out of it, and evaluate gate chains directly.
//!
//! ```rust
//! use leadflow_rs::auth::{Gate, GateContext, Session, evaluate_chain};
//! use leadflow_rs::config::SessionConfig;
//!
//! let session = Session::default();
//! let config = SessionConfig::default();
//! let ctx = GateContext { session: &session, identity: None, config: &config };
//! let result = evaluate_chain(&[Gate::Authenticated], &ctx);
//! assert!(!result.is_allow());
//! ```

#![warn(clippy::all)]

// Public module exports
pub mod auth;
pub mod config;
pub mod pipeline;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{CrmError, Result};

// Export the access core
pub use auth::{
    Gate, GateContext, GateResult, Identity, Session, SessionStore, TeamSlug, default_landing,
    evaluate_chain, normalize, resolve_team_slug,
};

// Export the pipeline core
pub use pipeline::{
    AssignmentSlot, BatchOutcome, Board, BoardController, Lead, LeadBackend, LeadId,
    MarketingStage, MoveCommand, PipelineStage, StageEngine,
};

use tracing::info;

/// A minimal application facade over configuration and the HTTP server
pub struct Leadflow {
    config: Config,
    server: server::HttpServer,
}

impl Leadflow {
    /// Create a new application instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new leadflow instance");

        let server = server::HttpServer::new(&config).await?;

        Ok(Self { config, server })
    }

    /// Run the HTTP server
    pub async fn run(self) -> Result<()> {
        info!("Starting leadflow CRM core");
        info!("Configuration: {:#?}", self.config);

        self.server.start().await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
