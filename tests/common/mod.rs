//! Shared test infrastructure

pub mod fixtures;

use leadflow_rs::Config;
use leadflow_rs::pipeline::{HttpLeadBackend, PipelineService};
use leadflow_rs::server::AppState;
use actix_web::web;
use std::sync::Arc;

/// Application state wired against a backend at `base_url`
pub fn app_state(base_url: &str) -> web::Data<AppState> {
    let mut config = Config::default();
    config.crm.backend.base_url = base_url.to_string();
    config.crm.backend.timeout = 5;

    let backend = HttpLeadBackend::new(config.backend()).expect("backend client");
    let pipeline = PipelineService::new(Arc::new(backend));
    web::Data::new(AppState::new(config, pipeline))
}
