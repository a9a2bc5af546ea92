use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use super::AppState;
use crate::domain::{Address, ItemId};
use crate::engine::ItemView;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct ItemQuery {
    /// Number of units in humanized countdowns.
    pub units: Option<usize>,
}

pub async fn get_item(
    Path((registry, item_key)): Path<(String, String)>,
    Query(query): Query<ItemQuery>,
    State(state): State<AppState>,
) -> Result<Json<ItemView>, AppError> {
    let id = parse_item_id(&registry, &item_key)?;
    let view = state.resolver.resolve_item(&id, query.units).await?;
    Ok(Json(view))
}

fn parse_item_id(registry: &str, item_key: &str) -> Result<ItemId, AppError> {
    let registry = registry
        .parse::<Address>()
        .map_err(|e| AppError::BadRequest(format!("Invalid registry address: {}", e)))?;
    let key = item_key.trim();
    if key.is_empty() {
        return Err(AppError::BadRequest("Item key must not be empty".to_string()));
    }
    Ok(ItemId::new(registry, key))
}
