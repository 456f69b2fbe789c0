//! Generic CRUD handlers
//!
//! - `GET /`      all rows, 404 when there are none
//! - `GET /:key`  one row by key, 404 when absent
//! - `POST /`     create, 409 when the key exists; returns the refreshed list
//! - `PUT /`      update, 404 when the key is absent; returns the refreshed list
//! - `DELETE /`   delete, 404 when the key is absent; returns the refreshed list

use axum::{extract::State, Json};
use inv_db::{params, Params};
use inv_services::Services;

use crate::error::{ApiError, ApiResult, DbResultExt};
use crate::extractors::{AppState, JsonBody, Key};
use crate::resource::Resource;

/// List all rows
///
/// GET /api/<resource>
pub async fn list<R: Resource>(State(state): State<AppState>) -> ApiResult<Json<Vec<R>>> {
    let rows = all::<R>(&state.services).await?;

    if rows.is_empty() {
        return Err(ApiError::not_found(format!("No {} are registered", R::PLURAL)));
    }

    Ok(Json(rows))
}

/// Get a single row
///
/// GET /api/<resource>/:key
pub async fn get<R: Resource>(
    State(state): State<AppState>,
    Key(key): Key<R::Key>,
) -> ApiResult<Json<R>> {
    let row = find::<R>(&state.services, &key)
        .await?
        .ok_or_else(|| not_registered::<R>(&key))?;

    let mut rows = [row];
    R::hydrate(&state.services, &mut rows)
        .await
        .or_internal(&format!("loading {} '{}'", R::TYPE_NAME, key))?;
    let [row] = rows;

    Ok(Json(row))
}

/// Create a row
///
/// POST /api/<resource>
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    JsonBody(record): JsonBody<R>,
) -> ApiResult<Json<Vec<R>>> {
    record.validate()?;
    let key = record.key();

    if find::<R>(&state.services, &key).await?.is_some() {
        return Err(ApiError::conflict(format!(
            "{} '{}' is already registered",
            R::TYPE_NAME,
            key
        )));
    }
    record.check_new()?;

    record
        .create(&state.services)
        .await
        .or_internal(&format!("creating {} '{}'", R::TYPE_NAME, key))?;
    tracing::info!(resource = R::PATH, key = %key, "created");

    Ok(Json(all::<R>(&state.services).await?))
}

/// Update a row
///
/// PUT /api/<resource>
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    JsonBody(record): JsonBody<R>,
) -> ApiResult<Json<Vec<R>>> {
    record.validate()?;
    let key = record.key();

    if find::<R>(&state.services, &key).await?.is_none() {
        return Err(not_registered::<R>(&key));
    }

    record
        .modify(&state.services)
        .await
        .or_internal(&format!("updating {} '{}'", R::TYPE_NAME, key))?;
    tracing::info!(resource = R::PATH, key = %key, "updated");

    Ok(Json(all::<R>(&state.services).await?))
}

/// Delete a row
///
/// DELETE /api/<resource>
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    JsonBody(record): JsonBody<R>,
) -> ApiResult<Json<Vec<R>>> {
    let key = record.key();

    if find::<R>(&state.services, &key).await?.is_none() {
        return Err(not_registered::<R>(&key));
    }

    record
        .remove(&state.services)
        .await
        .or_internal(&format!("deleting {} '{}'", R::TYPE_NAME, key))?;
    tracing::info!(resource = R::PATH, key = %key, "deleted");

    Ok(Json(all::<R>(&state.services).await?))
}

async fn all<R: Resource>(services: &Services) -> ApiResult<Vec<R>> {
    let action = format!("listing {}", R::PLURAL);

    let mut rows = R::service(services)
        .query(R::SELECT_ALL, params![])
        .await
        .or_internal(&action)?;
    R::hydrate(services, &mut rows).await.or_internal(&action)?;

    Ok(rows)
}

/// The row with `key`, without its parents
async fn find<R: Resource>(services: &Services, key: &R::Key) -> ApiResult<Option<R>> {
    let rows = R::service(services)
        .query(R::SELECT_BY_KEY, Params::new().with(key.clone()))
        .await
        .or_internal(&format!("looking up {} '{}'", R::TYPE_NAME, key))?;

    Ok(rows.into_iter().next())
}

fn not_registered<R: Resource>(key: &R::Key) -> ApiError {
    ApiError::not_found(format!("{} '{}' is not registered", R::TYPE_NAME, key))
}
