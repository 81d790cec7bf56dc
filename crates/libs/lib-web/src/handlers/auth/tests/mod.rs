//! # Auth Handler Tests
//!
//! Signup, login and the token-protected profile route.

mod login;

use crate::handlers::tests::{app, send, send_with_headers};
use axum::http::StatusCode;
use axum::Router;
use serde_json::{json, Value};

pub async fn signup_as(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/api/auth/signup",
        Some(json!({ "email": email, "password": password, "name": "Test User", "role": "patient" })),
    )
    .await
}

pub async fn profile_with(app: &Router, authorization: &str) -> (StatusCode, Value) {
    send_with_headers(app, "GET", "/api/auth/profile", None, &[("authorization", authorization)]).await
}
