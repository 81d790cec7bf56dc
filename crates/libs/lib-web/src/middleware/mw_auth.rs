//! # Authentication Middleware
//!
//! Validates `Authorization: Bearer <token>` through the configured
//! [`IdentityProvider`] and injects the resolved [`VerifiedIdentity`] into the
//! request extensions.
//!
//! ```rust,ignore
//! let profile = Router::new()
//!     .route("/api/auth/profile", get(profile))
//!     .route_layer(from_fn_with_state(identity, require_auth));
//! ```
//!
//! Handlers read the identity with `Extension<VerifiedIdentity>`.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use lib_auth::IdentityProvider;
use lib_core::AppError;
use std::sync::Arc;
use tracing::{debug, warn};

pub async fn require_auth(
    State(identity): State<Arc<dyn IdentityProvider>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            warn!("[AUTH] Missing Authorization header");
            AppError::Unauthorized("Missing bearer token".to_string())
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .ok_or_else(|| {
            warn!("[AUTH] Invalid Authorization header format");
            AppError::Unauthorized("Missing bearer token".to_string())
        })?;

    let verified = identity.verify_token(&token).await.map_err(|e| {
        warn!("[AUTH] Token validation failed: {}", e);
        AppError::Unauthorized("Invalid or expired token".to_string())
    })?;

    debug!("[AUTH] Authenticated uid={}", verified.uid);
    req.extensions_mut().insert(verified);

    Ok(next.run(req).await)
}
