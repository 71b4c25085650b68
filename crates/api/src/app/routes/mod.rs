use axum::Router;

pub mod supplies;
pub mod system;

/// Router for all ledger endpoints.
pub fn router(max_upload_bytes: usize) -> Router {
    Router::new().nest("/supplies", supplies::router(max_upload_bytes))
}
