//! Health handler

use axum::{extract::State, Json};

use crate::api::AppState;
use crate::models::HealthResponse;

/// Handler for GET /api/health
///
/// Unauthenticated. Reports response cache counters and blacklist size.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache_stats = state.cache.store().read().await.stats();
    let blacklisted = state.gate.blacklist().len().await;

    Json(HealthResponse::ok(cache_stats, blacklisted))
}
