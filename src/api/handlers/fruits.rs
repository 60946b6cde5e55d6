//! Fruit handlers
//!
//! Every route here sits behind the auth gate, so an [`AuthUser`] is always
//! present in request extensions. Reads go through the cache-aside layer;
//! writes leave cached lists alone and rely on their TTL.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::info;

use crate::api::AppState;
use crate::auth::AuthUser;
use crate::catalog::{fruit_cache_key, Fruit, FruitQuery};
use crate::error::{AppError, Result};
use crate::models::{sanitize_query, sanitize_text, DeleteResponse, FruitRequest};

fn fruit_not_found() -> AppError {
    AppError::NotFound("Fruit not found.".to_string())
}

/// Handler for GET /api/fruits
pub async fn list_fruits_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<FruitQuery>,
) -> Result<Json<Vec<Fruit>>> {
    let query = sanitize_query(query);
    let key = query.cache_key();

    let fruits = state
        .cache
        .read(&key, state.config.list_cache_ttl, || async {
            info!(email = %user.email, ?query, "Search");
            state
                .catalog
                .search_fruits(&query)
                .await
                .map_err(AppError::from)
        })
        .await?;

    Ok(Json(fruits))
}

/// Handler for POST /api/fruits
pub async fn create_fruit_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<FruitRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Fruit>)> {
    let Json(req) = payload?;
    let input = req.validate().map_err(AppError::InvalidRequest)?;

    info!(email = %user.email, name = %input.name, "Fruit added");
    let fruit = state.catalog.insert_fruit(input).await?;

    Ok((StatusCode::CREATED, Json(fruit)))
}

/// Handler for GET /api/fruits/:id
///
/// A missing fruit is reported as 404 and is not cached.
pub async fn get_fruit_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Fruit>> {
    let id = sanitize_text(&id);

    let fruit = state
        .cache
        .read(&fruit_cache_key(&id), state.config.item_cache_ttl, || async {
            state
                .catalog
                .find_fruit_by_id(&id)
                .await
                .map_err(AppError::from)
                .and_then(|found| found.ok_or_else(fruit_not_found))
        })
        .await?;

    Ok(Json(fruit))
}

/// Handler for PUT /api/fruits/:id
pub async fn update_fruit_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<FruitRequest>, JsonRejection>,
) -> Result<Json<Fruit>> {
    let Json(req) = payload?;
    let id = sanitize_text(&id);
    let input = req.validate().map_err(AppError::InvalidRequest)?;

    info!(email = %user.email, %id, "Fruit updated");
    let fruit = state
        .catalog
        .update_fruit(&id, input)
        .await?
        .ok_or_else(fruit_not_found)?;

    Ok(Json(fruit))
}

/// Handler for DELETE /api/fruits/:id
pub async fn delete_fruit_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = sanitize_text(&id);

    info!(email = %user.email, %id, "Fruit deleted");
    if !state.catalog.delete_fruit(&id).await? {
        return Err(fruit_not_found());
    }

    Ok(Json(DeleteResponse::new(id)))
}
