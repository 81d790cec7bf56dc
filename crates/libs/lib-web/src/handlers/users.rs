//! # User Handlers
//!
//! - `POST /api/users` - create a user record
//! - `GET /api/users/{id}` - fetch one user

use axum::extract::{Json, Path, State};
use lib_core::dto::CreateUserRequest;
use lib_core::model::store::models::User;
use lib_core::{AppError, RecordStore, Result};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::extract::ValidatedJson;

/// Create a user. Emails are unique, compared case-insensitively.
///
/// **Route**: `POST /api/users`
///
/// # Errors
///
/// - `400` - schema failure or email already registered
#[instrument(skip_all)]
pub async fn create_user(
    State(store): State<Arc<RecordStore>>,
    ValidatedJson(input): ValidatedJson<CreateUserRequest>,
) -> Result<Json<User>> {
    let user = store.create_user(input).await?;
    info!("[USERS] created id={} role={}", user.id, user.role);
    Ok(Json(user))
}

/// **Route**: `GET /api/users/{id}`
#[instrument(skip(store))]
pub async fn get_user(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    store
        .get_user(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}
