use axum::extract::State;
use axum::Json;

use super::AppState;
use crate::cache::{CacheKey, CacheScope, CacheStore};
use crate::error::AppError;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Ready once the cache store answers a read.
pub async fn ready(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let key = CacheKey::new(CacheScope::RegistryParameters, "ready-check", None);
    state.cache_store.get(&key).await?;
    Ok(Json(serde_json::json!({"status": "ready"})))
}
