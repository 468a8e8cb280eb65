//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::pipeline::{HttpLeadBackend, PipelineService};
use crate::server::middleware::{GuardMiddleware, RequestIdMiddleware};
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{CrmError, Result};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, web};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let backend = HttpLeadBackend::new(config.backend())?;
        let pipeline = PipelineService::new(Arc::new(backend));
        let state = AppState::new(config.clone(), pipeline);

        Ok(Self {
            config: config.server().clone(),
            state,
        })
    }

    fn cors(state: &AppState) -> Cors {
        let cors_config = &state.config.server().cors;
        let mut cors = Cors::default()
            .allowed_methods(["GET", "POST"])
            .allow_any_header();

        if cors_config.enabled {
            if cors_config.allows_all_origins() {
                cors = cors.allow_any_origin();
                if let Err(e) = cors_config.validate() {
                    warn!(error = %e, "CORS configuration warning");
                }
            } else {
                for origin in &cors_config.allowed_origins {
                    cors = cors.allowed_origin(origin);
                }
            }

            if cors_config.allow_credentials {
                cors = cors.supports_credentials();
            }
        }

        cors
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let address = self.config.address();
        let state = web::Data::new(self.state);
        let workers = self.config.workers;

        info!("Binding HTTP server to {}", address);

        let mut server = ActixHttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(Self::cors(&state))
                .wrap(GuardMiddleware)
                .wrap(RequestIdMiddleware)
                .wrap(TracingLogger::default())
                .configure(routes::health::configure_routes)
                .configure(routes::identity::configure_routes)
                .configure(routes::pipeline::configure_routes)
        })
        .bind(&address)
        .map_err(|e| CrmError::Config(format!("Failed to bind {}: {}", address, e)))?;

        if let Some(workers) = workers {
            server = server.workers(workers);
        }

        server.run().await.map_err(CrmError::Io)
    }
}
