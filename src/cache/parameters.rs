//! Registry parameter cache with a bounded staleness window.

use std::sync::Arc;

use tracing::warn;

use super::{CacheEntry, CacheKey, CacheScope, CacheStore};
use crate::domain::{Address, RegistryParameters, TimeMs};

/// Outcome of a parameter lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup<T> {
    /// Within the staleness window; no read needed.
    Fresh(T),
    /// Older than the window; refresh, but usable if the refresh fails.
    Stale(T),
    Miss,
}

#[derive(Debug, Clone)]
pub struct ParameterCache {
    store: Arc<dyn CacheStore>,
    ttl_ms: i64,
}

impl ParameterCache {
    pub fn new(store: Arc<dyn CacheStore>, ttl_ms: i64) -> Self {
        Self { store, ttl_ms }
    }

    fn key(registry: &Address) -> CacheKey {
        CacheKey::new(CacheScope::RegistryParameters, registry.to_string(), None)
    }

    pub async fn get(&self, registry: &Address, now: TimeMs) -> CacheLookup<RegistryParameters> {
        let key = Self::key(registry);
        let entry = match self.store.get(&key).await {
            Ok(Some(entry)) => entry,
            Ok(None) => return CacheLookup::Miss,
            Err(e) => {
                warn!("Parameter cache read failed for {}: {}", key, e);
                return CacheLookup::Miss;
            }
        };

        let params = match serde_json::from_str::<RegistryParameters>(&entry.payload) {
            Ok(params) => params,
            Err(e) => {
                warn!("Discarding corrupt parameter entry {}: {}", key, e);
                return CacheLookup::Miss;
            }
        };

        let age = now.as_ms().saturating_sub(entry.stored_at.as_ms());
        if age <= self.ttl_ms {
            CacheLookup::Fresh(params)
        } else {
            CacheLookup::Stale(params)
        }
    }

    pub async fn store(&self, registry: &Address, params: &RegistryParameters, now: TimeMs) {
        let payload = match serde_json::to_string(params) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Could not encode parameters for {}: {}", registry, e);
                return;
            }
        };
        let entry = CacheEntry {
            payload,
            stored_at: now,
        };
        if let Err(e) = self.store.put(Self::key(registry), entry).await {
            warn!("Parameter cache write failed for {}: {}", registry, e);
        }
    }
}
