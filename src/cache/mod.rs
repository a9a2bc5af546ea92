//! Typed caches over an injected key-value store.
//!
//! This module provides:
//! - `CacheStore`, the storage seam (in-memory here, SQLite in `db`)
//! - `AppealCostCache`, keyed by dispute and round count
//! - `ParameterCache`, keyed by registry with a staleness window

use crate::domain::TimeMs;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tokio::sync::RwLock;

pub mod appeal_cost;
pub mod parameters;

pub use appeal_cost::AppealCostCache;
pub use parameters::{CacheLookup, ParameterCache};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CacheScope {
    AppealCost,
    RegistryParameters,
}

impl CacheScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheScope::AppealCost => "appeal_cost",
            CacheScope::RegistryParameters => "registry_parameters",
        }
    }
}

/// Typed cache key. `round_count` is only set for round-scoped values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    pub scope: CacheScope,
    pub id: String,
    pub round_count: Option<u32>,
}

impl CacheKey {
    pub fn new(scope: CacheScope, id: impl Into<String>, round_count: Option<u32>) -> Self {
        Self {
            scope,
            id: id.into(),
            round_count,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.round_count {
            Some(round) => write!(f, "{}:{}#{}", self.scope.as_str(), self.id, round),
            None => write!(f, "{}:{}", self.scope.as_str(), self.id),
        }
    }
}

/// Stored value: a JSON payload and the time it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub payload: String,
    pub stored_at: TimeMs,
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),
    #[error("cache payload error: {0}")]
    Codec(#[from] serde_json::Error),
}

impl From<sqlx::Error> for CacheError {
    fn from(err: sqlx::Error) -> Self {
        CacheError::Backend(err.to_string())
    }
}

/// Key-value store behind the typed caches.
///
/// Writes are last-writer-wins per key.
#[async_trait]
pub trait CacheStore: Send + Sync + fmt::Debug {
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheError>;

    async fn put(&self, key: CacheKey, entry: CacheEntry) -> Result<(), CacheError>;

    /// Remove every entry for `(scope, id)` whatever its round count.
    ///
    /// Returns the number of removed entries.
    async fn invalidate(&self, scope: CacheScope, id: &str) -> Result<usize, CacheError>;
}

/// In-process store, used in tests and when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: CacheKey, entry: CacheEntry) -> Result<(), CacheError> {
        self.entries.write().await.insert(key, entry);
        Ok(())
    }

    async fn invalidate(&self, scope: CacheScope, id: &str) -> Result<usize, CacheError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !(key.scope == scope && key.id == id));
        Ok(before - entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(payload: &str) -> CacheEntry {
        CacheEntry {
            payload: payload.to_string(),
            stored_at: TimeMs::new(1),
        }
    }

    #[test]
    fn test_cache_key_display() {
        let key = CacheKey::new(CacheScope::AppealCost, "0xabc/7", Some(2));
        assert_eq!(key.to_string(), "appeal_cost:0xabc/7#2");
        let key = CacheKey::new(CacheScope::RegistryParameters, "0xabc", None);
        assert_eq!(key.to_string(), "registry_parameters:0xabc");
    }

    #[tokio::test]
    async fn test_memory_store_last_writer_wins() {
        let store = MemoryCacheStore::new();
        let key = CacheKey::new(CacheScope::RegistryParameters, "r", None);
        store.put(key.clone(), entry("a")).await.unwrap();
        store.put(key.clone(), entry("b")).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), Some(entry("b")));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_store_invalidate_scope_and_id() {
        let store = MemoryCacheStore::new();
        store
            .put(CacheKey::new(CacheScope::AppealCost, "d", Some(1)), entry("1"))
            .await
            .unwrap();
        store
            .put(CacheKey::new(CacheScope::AppealCost, "d", Some(2)), entry("2"))
            .await
            .unwrap();
        store
            .put(CacheKey::new(CacheScope::AppealCost, "other", Some(1)), entry("3"))
            .await
            .unwrap();

        let removed = store.invalidate(CacheScope::AppealCost, "d").await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.len().await, 1);
    }
}
