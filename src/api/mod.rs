pub mod health;
pub mod items;

use crate::cache::CacheStore;
use crate::orchestration::ItemResolver;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<ItemResolver>,
    /// Read by `/ready`.
    pub cache_store: Arc<dyn CacheStore>,
}

impl AppState {
    pub fn new(resolver: Arc<ItemResolver>, cache_store: Arc<dyn CacheStore>) -> Self {
        Self {
            resolver,
            cache_store,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route(
            "/v1/registries/:registry/items/:item_key",
            get(items::get_item),
        )
        .layer(cors)
        .with_state(state)
}
