//! # Telemedicine Handlers
//!
//! Video sessions and their persisted chat history. Live delivery of chat
//! messages goes over the relay (`/ws`); these endpoints store and replay them.
//!
//! - `POST /api/telemedicine/session`
//! - `GET|PATCH /api/telemedicine/session/{id}`
//! - `POST /api/chat/messages`
//! - `GET /api/chat/session/{id}` - oldest first

use axum::extract::{Json, Path, State};
use lib_core::dto::{CreateChatMessageRequest, CreateSessionRequest, UpdateSessionRequest};
use lib_core::model::store::models::{ChatMessage, TelemedicineSession};
use lib_core::{AppError, RecordStore, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::extract::ValidatedJson;

/// Open a session for an appointment. A room id is generated when absent.
///
/// **Route**: `POST /api/telemedicine/session`
#[instrument(skip_all)]
pub async fn create_session(
    State(store): State<Arc<RecordStore>>,
    ValidatedJson(input): ValidatedJson<CreateSessionRequest>,
) -> Result<Json<TelemedicineSession>> {
    let session = store.create_session(input).await?;
    info!(
        "[TELEMED] session created id={} appointment={} room={}",
        session.id, session.appointment_id, session.room_id
    );
    Ok(Json(session))
}

/// **Route**: `GET /api/telemedicine/session/{id}`
#[instrument(skip(store))]
pub async fn get_session(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> Result<Json<TelemedicineSession>> {
    store
        .get_session(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Telemedicine session not found".to_string()))
}

/// Move a session forward: `waiting` -> `active` -> `ended`.
///
/// **Route**: `PATCH /api/telemedicine/session/{id}`
///
/// # Errors
///
/// - `400` - unknown status value or a backwards transition
/// - `404` - unknown session
#[instrument(skip(store, patch))]
pub async fn update_session(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<UpdateSessionRequest>,
) -> Result<Json<TelemedicineSession>> {
    let session = store.update_session(&id, patch).await?;
    info!("[TELEMED] session id={} now {:?}", session.id, session.status);
    Ok(Json(session))
}

/// **Route**: `POST /api/chat/messages`
#[instrument(skip_all)]
pub async fn create_chat_message(
    State(store): State<Arc<RecordStore>>,
    ValidatedJson(input): ValidatedJson<CreateChatMessageRequest>,
) -> Result<Json<ChatMessage>> {
    let message = store.create_chat_message(input).await?;
    debug!(
        "[CHAT] stored id={} session={:?} sender={}",
        message.id, message.session_id, message.sender_id
    );
    Ok(Json(message))
}

/// **Route**: `GET /api/chat/session/{id}`
#[instrument(skip(store))]
pub async fn chat_messages_by_session(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> Json<Vec<ChatMessage>> {
    Json(store.chat_messages_by_session(&id).await)
}
