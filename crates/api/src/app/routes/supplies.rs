use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension, Multipart, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router(max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(list_supplies).post(add_supply))
        .route("/summary", get(supply_summary))
        .route(
            "/uploads",
            post(upload_receipts).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/:id", get(get_supply).delete(delete_supply))
}

pub async fn list_supplies(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    Json(services.list()).into_response()
}

pub async fn add_supply(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateSupplyRequest>,
) -> axum::response::Response {
    let item = services.add(body);
    (StatusCode::CREATED, Json(item)).into_response()
}

pub async fn get_supply(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_line_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.get(id) {
        Ok(item) => Json(item).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Deleting an unknown id still answers 204; the line is gone either way.
pub async fn delete_supply(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_line_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    services.delete(id);
    StatusCode::NO_CONTENT.into_response()
}

pub async fn upload_receipts(
    Extension(services): Extension<Arc<AppServices>>,
    multipart: Multipart,
) -> axum::response::Response {
    let files = match dto::read_uploaded_files(multipart).await {
        Ok(files) => files,
        Err(resp) => return resp,
    };

    match services.ingest(&files) {
        Ok(Some(item)) => (StatusCode::CREATED, Json(item)).into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::ingest_error_to_response(e),
    }
}

pub async fn supply_summary(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    Json(services.summary()).into_response()
}
