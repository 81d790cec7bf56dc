//! # Handler Tests
//!
//! Every test drives the real router (all middleware included) with
//! `tower::ServiceExt::oneshot`.

mod routing;
mod telemedicine;
mod users;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use lib_core::Config;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crate::ai::provider::scripted::ScriptedProvider;
use crate::ai::{AiGateway, CompletionProvider, GatewaySettings};
use crate::server::{create_router, AppState};

pub fn test_config() -> Config {
    Config {
        jwt_secret: "test-secret-key-must-be-at-least-32-characters-long!".to_string(),
        jwt_expiration_hours: 24,
        openai_api_key: None,
        ai_model: "test-model".to_string(),
        ai_timeout_secs: 5,
        ai_max_tokens: 500,
        ai_temperature: 0.7,
    }
}

/// State whose gateway replays `provider`'s scripted replies.
pub fn test_state(provider: Arc<ScriptedProvider>) -> AppState {
    let provider: Arc<dyn CompletionProvider> = provider;
    AppState::new(test_config()).with_ai(AiGateway::new(provider, GatewaySettings::default()))
}

pub fn test_app(state: AppState) -> Router {
    create_router(state, &[])
}

pub fn app() -> Router {
    test_app(test_state(Arc::new(ScriptedProvider::new())))
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_with_headers(app, method, uri, body, &[]).await
}

pub async fn send_with_headers(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    headers: &[(&str, &str)],
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

/// POST raw text as a JSON body.
pub async fn send_raw(app: &Router, method: &str, uri: &str, raw: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}
