use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;

use wickbiz_core::LineItemId;
use wickbiz_receipts::UploadedFile;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /supplies`: the add-item form, fields as typed.
pub type CreateSupplyRequest = wickbiz_supplies::LineItemCandidate;

// -------------------------
// Extraction helpers
// -------------------------

pub fn parse_line_item_id(raw: &str) -> Result<LineItemId, axum::response::Response> {
    raw.parse::<LineItemId>()
        .map_err(errors::domain_error_to_response)
}

fn multipart_error_to_response(err: MultipartError) -> axum::response::Response {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        errors::json_error(
            StatusCode::PAYLOAD_TOO_LARGE,
            "upload_too_large",
            "upload exceeds the configured size limit",
        )
    } else {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_multipart", err.body_text())
    }
}

/// Collect every file part of a multipart upload.
///
/// Plain text parts are skipped, as is the nameless, empty part a browser file
/// input sends when nothing was selected.
pub async fn read_uploaded_files(
    mut multipart: Multipart,
) -> Result<Vec<UploadedFile>, axum::response::Response> {
    let mut files = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(multipart_error_to_response(e)),
        };

        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error_to_response)?;

        if file_name.trim().is_empty() && bytes.is_empty() {
            continue;
        }

        files.push(UploadedFile::new(file_name, content_type, bytes.to_vec()));
    }

    Ok(files)
}
