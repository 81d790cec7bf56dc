//! # AI Assistant Handlers
//!
//! Thin wrappers over [`AiGateway`]. Every provider failure reaches the
//! caller as a 500 with the message `AI response failed`; the cause is only
//! logged.
//!
//! - `POST /api/ai/chat` - `{message, history}` -> `{message}`
//! - `POST /api/ai/sentiment` - `{text}` -> `{rating, confidence}`
//! - `POST /api/ai/summarize` - `{text}` -> `{summary}`
//! - `POST /api/ai/conversations`, `GET /api/ai/conversations/user/{id}`

use axum::extract::{Json, Path, State};
use lib_core::dto::{
    AiChatRequest, AiChatResponse, CreateAiConversationRequest, SentimentResponse, SummaryResponse,
    TextRequest,
};
use lib_core::model::store::models::AiConversation;
use lib_core::{RecordStore, Result};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ai::AiGateway;
use crate::extract::ValidatedJson;

/// **Route**: `POST /api/ai/chat`
///
/// Only the five most recent history turns are forwarded to the provider.
#[instrument(skip_all)]
pub async fn chat(
    State(ai): State<Arc<AiGateway>>,
    ValidatedJson(prompt): ValidatedJson<AiChatRequest>,
) -> Result<Json<AiChatResponse>> {
    let message = ai.chat(&prompt.message, &prompt.history).await?;
    Ok(Json(AiChatResponse { message }))
}

/// **Route**: `POST /api/ai/sentiment`
#[instrument(skip_all)]
pub async fn analyze_sentiment(
    State(ai): State<Arc<AiGateway>>,
    ValidatedJson(text): ValidatedJson<TextRequest>,
) -> Result<Json<SentimentResponse>> {
    Ok(Json(ai.analyze_sentiment(&text).await?))
}

/// **Route**: `POST /api/ai/summarize`
#[instrument(skip_all)]
pub async fn summarize(
    State(ai): State<Arc<AiGateway>>,
    ValidatedJson(text): ValidatedJson<TextRequest>,
) -> Result<Json<SummaryResponse>> {
    let summary = ai.summarize(&text).await?;
    Ok(Json(SummaryResponse { summary }))
}

/// Save an assistant transcript.
///
/// **Route**: `POST /api/ai/conversations`
#[instrument(skip_all)]
pub async fn create_conversation(
    State(store): State<Arc<RecordStore>>,
    ValidatedJson(input): ValidatedJson<CreateAiConversationRequest>,
) -> Result<Json<AiConversation>> {
    let conversation = store.create_ai_conversation(input).await?;
    info!(
        "[AI] saved conversation id={} user={} turns={}",
        conversation.id,
        conversation.user_id,
        conversation.messages.len()
    );
    Ok(Json(conversation))
}

/// Newest first.
///
/// **Route**: `GET /api/ai/conversations/user/{id}`
#[instrument(skip(store))]
pub async fn conversations_by_user(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> Json<Vec<AiConversation>> {
    Json(store.ai_conversations_by_user(&id).await)
}
