//! # Validated JSON Extractor
//!
//! `ValidatedJson<T>` parses the body as `T`, runs `T`'s schema check and
//! hands the handler the validated store input. A body that fails either step
//! never reaches the handler.

use axum::extract::{FromRequest, Json, Request};
use lib_core::dto::Validate;
use lib_core::AppError;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Extractor yielding `T::Output` for a body of type `T`.
pub struct ValidatedJson<T: Validate>(pub T::Output);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
    T::Output: Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            debug!("[VALIDATION] Body rejected: {}", rejection.body_text());
            AppError::InvalidInput(rejection.body_text())
        })?;

        let output = body.validate().map_err(|err| {
            debug!("[VALIDATION] {}", err);
            AppError::from(err)
        })?;

        Ok(ValidatedJson(output))
    }
}
