//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the ledger session and the receipt parser it ingests with
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and extraction helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::config::ApiConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> Router {
    let services = Arc::new(services::AppServices::from_config(config));
    router_with_services(services, config.max_upload_bytes)
}

/// Router over an existing session (tests inject their own services).
///
/// `max_upload_bytes` caps the whole multipart body of a receipt upload.
pub fn router_with_services(services: Arc<services::AppServices>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router(max_upload_bytes))
        .layer(Extension(services))
}
