//! Extractors whose rejections use the JSON error envelope of [`AppError`].

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;

/// JSON body extractor that only accepts objects.
///
/// Entity records default every field, so serde would otherwise accept an
/// array such as `[]` as an empty record.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        if !value.is_object() {
            return Err(AppError::BadRequest("Request body must be a JSON object".to_string()));
        }
        let inner = serde_json::from_value(value).map_err(|e| {
            tracing::debug!("Rejected JSON body: {}", e);
            AppError::BadRequest(format!("Failed to deserialize the JSON body into the target type: {}", e))
        })?;
        Ok(AppJson(inner))
    }
}

/// `Path<T>` that rejects unparsable segments with a 400 `AppError`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
