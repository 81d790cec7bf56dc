//! # Response Mapping Middleware
//!
//! Keeps error bodies uniform. Handler errors already render as
//! `{ "error", "code" }` through `AppError`; responses produced elsewhere
//! (axum's method-not-allowed, an unsupported media type, a failed WebSocket
//! upgrade) arrive as plain text and are rewritten into the same shape here.

use axum::{
    body::Body,
    extract::Request,
    http::{header::CONTENT_TYPE, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

pub async fn map_res(req: Request, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();

    if status.is_server_error() {
        error!("[RESPONSE] Server error: {}", status);
    }

    if !(status.is_client_error() || status.is_server_error()) || is_json(&res) {
        return res;
    }

    let message = status.canonical_reason().unwrap_or("Request failed");
    (status, Json(json!({ "error": message, "code": code_for(status) }))).into_response()
}

fn is_json(res: &Response<Body>) -> bool {
    res.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

fn code_for(status: StatusCode) -> &'static str {
    match status {
        StatusCode::NOT_FOUND => "NotFound",
        StatusCode::UNAUTHORIZED => "Unauthorized",
        s if s.is_client_error() => "InvalidInput",
        _ => "Internal",
    }
}
