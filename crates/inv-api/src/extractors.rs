//! Axum extractors for API handlers
//!
//! Framework rejections are turned into [`ApiError`] so malformed input gets
//! the same error envelope as everything else.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use inv_services::Services;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::error::ApiError;
use crate::resource::ResourceKey;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
}

impl AppState {
    pub fn new(services: Services) -> Self {
        Self {
            services: Arc::new(services),
        }
    }
}

/// JSON request body
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
        }
    }
}

/// Lookup key taken from the last path segment
pub struct Key<K>(pub K);

#[async_trait]
impl<S, K> FromRequestParts<S> for Key<K>
where
    S: Send + Sync,
    K: ResourceKey,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

        K::parse(&raw)
            .map(Key)
            .ok_or_else(|| ApiError::bad_request(format!("'{}' is not a valid key", raw)))
    }
}
