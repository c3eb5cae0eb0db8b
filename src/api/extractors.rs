//! Request extractors whose rejections use the API's error envelope.
//!
//! Axum's stock `Json` and `Path` reject with plain-text bodies. These
//! wrappers turn the rejection into [`CacheError::InvalidRequest`] so every
//! failed request answers with `{ok: false, error, code}`.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::CacheError;

/// JSON body extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for CacheJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = CacheError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| CacheError::InvalidRequest(rejection.body_text()))?;
        Ok(CacheJson(value))
    }
}

/// Path parameter extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct CachePath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for CachePath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = CacheError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| CacheError::InvalidRequest(rejection.body_text()))?;
        Ok(CachePath(value))
    }
}
