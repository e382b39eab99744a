//! Request handlers for the upload endpoint.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};
use tracing::{error, info};

use crate::models::{ErrorResponse, UploadRequestBody, UploadResponse};
use crate::services::{TemplateParser, UNKNOWN_SOURCE};

use super::AppState;

type HandlerError = (StatusCode, Json<ErrorResponse>);

/// `POST /api/upload`: parse the submitted document and upsert every
/// template it contains.
pub(super) async fn upload(
    State(state): State<AppState>,
    body: Result<Json<UploadRequestBody>, JsonRejection>,
) -> Result<Json<UploadResponse>, HandlerError> {
    let Json(body) = body.map_err(|rejection| bad_request(rejection.body_text()))?;

    let text = extract_content(&body)?;
    let templates = TemplateParser::new().parse(&text);
    if templates.is_empty() {
        return Err(bad_request("No templates found"));
    }

    info!(
        templates = templates.len(),
        source = body.file_name.as_deref().unwrap_or(UNKNOWN_SOURCE),
        "upload request"
    );

    let report = state
        .uploader
        .upload(&templates, body.file_name.as_deref())
        .await
        .map_err(|e| {
            error!(error = %e, "upload failed");
            internal_error(e.to_string())
        })?;

    Ok(Json(UploadResponse::from_report(report)))
}

/// Plain `OPTIONS /api/upload` outside of a CORS preflight.
pub(super) async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any other method on `/api/upload`.
pub(super) async fn method_not_allowed() -> HandlerError {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("Method not allowed")),
    )
}

/// `GET /health`: liveness probe with the configured backends.
pub(super) async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "index": state.uploader.index_name(),
        "model": state.uploader.model(),
    }))
}

/// Pull the document text out of the request, enforcing that exactly
/// one of the two content fields is set.
fn extract_content(body: &UploadRequestBody) -> Result<String, HandlerError> {
    match (&body.file_content, &body.file_base64) {
        (Some(_), Some(_)) => Err(bad_request(
            "Provide either fileContent or fileBase64, not both",
        )),
        (Some(content), None) => Ok(content.clone()),
        (None, Some(encoded)) => {
            let bytes = BASE64
                .decode(encoded.trim())
                .map_err(|_| bad_request("Invalid base64 in fileBase64"))?;
            String::from_utf8(bytes)
                .map_err(|_| bad_request("fileBase64 does not decode to UTF-8 text"))
        }
        (None, None) => Err(bad_request("No content provided")),
    }
}

fn bad_request(message: impl Into<String>) -> HandlerError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

fn internal_error(message: impl Into<String>) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(message)),
    )
}
