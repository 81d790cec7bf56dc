//! # Authentication Handlers
//!
//! Account creation and sign-in through the configured [`IdentityProvider`],
//! plus the profile document kept in the [`DocumentStore`].
//!
//! - `POST /api/auth/signup` - `201` with `{token, uid}`
//! - `POST /api/auth/login` - `200` with `{token, uid}`
//! - `GET /api/auth/profile` - bearer token required
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/api/auth/signup", post(signup))
//!     .route("/api/auth/login", post(login));
//! ```

use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
};
use lib_auth::{AuthError, IdentityProvider, VerifiedIdentity};
use lib_core::dto::{AuthResponse, LoginRequest, ProfileDoc, SignupRequest};
use lib_core::model::documents::USERS_COLLECTION;
use lib_core::{AppError, DocumentStore, Result};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::extract::ValidatedJson;

/// Map identity failures onto the HTTP taxonomy.
fn auth_error(err: AuthError) -> AppError {
    match err {
        AuthError::WeakPassword(_) => AppError::validation("password", err.to_string()),
        AuthError::EmailTaken => AppError::validation("email", err.to_string()),
        AuthError::InvalidCredentials | AuthError::InvalidToken(_) => {
            AppError::Unauthorized(err.to_string())
        }
        AuthError::Provider(reason) => {
            error!("[AUTH] Identity provider failure: {}", reason);
            AppError::Upstream("Authentication service unavailable".to_string())
        }
    }
}

/// Create an account and store its profile document at `users/{uid}`.
///
/// **Route**: `POST /api/auth/signup`
///
/// # Errors
///
/// - `400` - bad email, password under 8 characters, blank name, or email taken
#[instrument(skip_all, fields(email = %req.email))]
pub async fn signup(
    State(identity): State<Arc<dyn IdentityProvider>>,
    State(documents): State<Arc<dyn DocumentStore>>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    info!("[SIGNUP] New signup request");

    let uid = identity
        .sign_up(&req.email, &req.password)
        .await
        .map_err(|e| {
            warn!("[SIGNUP] Rejected: {}", e);
            auth_error(e)
        })?;

    let profile = ProfileDoc {
        email: req.email,
        name: req.name,
        role: req.role,
    };
    let doc = serde_json::to_value(&profile).map_err(|e| AppError::Internal(e.to_string()))?;
    documents.set(USERS_COLLECTION, &uid, doc).await?;
    debug!("[SIGNUP] Profile stored for uid={}", uid);

    let token = identity.issue_token(&uid).await.map_err(auth_error)?;

    info!("[SIGNUP] Account created uid={}", uid);
    Ok((StatusCode::CREATED, Json(AuthResponse { token, uid })))
}

/// **Route**: `POST /api/auth/login`
///
/// Unknown email and wrong password both answer `401` with the same message.
#[instrument(skip_all, fields(email = %req.email))]
pub async fn login(
    State(identity): State<Arc<dyn IdentityProvider>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let token = identity
        .sign_in(&req.email, &req.password)
        .await
        .map_err(|e| {
            warn!("[LOGIN] Rejected: {}", e);
            auth_error(e)
        })?;
    let verified = identity.verify_token(&token).await.map_err(auth_error)?;

    info!("[LOGIN] Signed in uid={}", verified.uid);
    Ok(Json(AuthResponse {
        token,
        uid: verified.uid,
    }))
}

/// Profile of the caller, as stored at signup.
///
/// **Route**: `GET /api/auth/profile` (behind `require_auth`)
#[instrument(skip_all, fields(uid = %caller.uid))]
pub async fn profile(
    State(documents): State<Arc<dyn DocumentStore>>,
    Extension(caller): Extension<VerifiedIdentity>,
) -> Result<Json<ProfileDoc>> {
    let doc = documents
        .get(USERS_COLLECTION, &caller.uid)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    let profile: ProfileDoc = serde_json::from_value(doc).map_err(|e| {
        error!("[AUTH] Stored profile for uid={} is malformed: {}", caller.uid, e);
        AppError::Internal(e.to_string())
    })?;
    Ok(Json(profile))
}

#[cfg(test)]
mod tests;
