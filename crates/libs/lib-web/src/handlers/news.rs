//! # News Handlers

use axum::extract::{Json, State};
use lib_core::dto::CreateNewsRequest;
use lib_core::model::store::models::MedicalNews;
use lib_core::{RecordStore, Result};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::extract::ValidatedJson;

/// Newest first.
///
/// **Route**: `GET /api/news`
#[instrument(skip_all)]
pub async fn list_news(State(store): State<Arc<RecordStore>>) -> Json<Vec<MedicalNews>> {
    Json(store.list_news().await)
}

/// **Route**: `POST /api/news`
#[instrument(skip_all)]
pub async fn create_news(
    State(store): State<Arc<RecordStore>>,
    ValidatedJson(input): ValidatedJson<CreateNewsRequest>,
) -> Result<Json<MedicalNews>> {
    let news = store.create_news(input).await?;
    info!("[NEWS] published id={} title={}", news.id, news.title);
    Ok(Json(news))
}
