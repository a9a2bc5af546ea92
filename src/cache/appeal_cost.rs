//! Appeal cost cache keyed by `(dispute, round count)`.
//!
//! The arbitrator's cost grows with every round, so an entry is only valid
//! for the exact round count it was read at. Storing a cost for a new round
//! drops the dispute's entries for every other round. There is no time-based
//! expiry.

use std::sync::Arc;

use tracing::warn;

use super::{CacheEntry, CacheKey, CacheScope, CacheStore};
use crate::domain::{Address, DisputeId, TimeMs, Wei};

#[derive(Debug, Clone)]
pub struct AppealCostCache {
    store: Arc<dyn CacheStore>,
}

impl AppealCostCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Dispute ids are only unique per arbitrator.
    fn dispute_key(arbitrator: &Address, dispute_id: DisputeId) -> String {
        format!("{}/{}", arbitrator, dispute_id)
    }

    /// Cached cost for exactly `round_count`, if any. Store errors count as a miss.
    pub async fn get(
        &self,
        arbitrator: &Address,
        dispute_id: DisputeId,
        round_count: u32,
    ) -> Option<Wei> {
        let key = CacheKey::new(
            CacheScope::AppealCost,
            Self::dispute_key(arbitrator, dispute_id),
            Some(round_count),
        );
        let entry = match self.store.get(&key).await {
            Ok(entry) => entry?,
            Err(e) => {
                warn!("Appeal cost cache read failed for {}: {}", key, e);
                return None;
            }
        };

        match entry.payload.parse::<Wei>() {
            Ok(cost) => Some(cost),
            Err(e) => {
                warn!("Discarding corrupt appeal cost entry {}: {}", key, e);
                None
            }
        }
    }

    /// Record the cost for `round_count`, evicting the dispute's other rounds.
    pub async fn store(
        &self,
        arbitrator: &Address,
        dispute_id: DisputeId,
        round_count: u32,
        cost: Wei,
        now: TimeMs,
    ) {
        let id = Self::dispute_key(arbitrator, dispute_id);
        if let Err(e) = self.store.invalidate(CacheScope::AppealCost, &id).await {
            warn!("Appeal cost invalidation failed for {}: {}", id, e);
        }

        let key = CacheKey::new(CacheScope::AppealCost, id, Some(round_count));
        let entry = CacheEntry {
            payload: cost.to_string(),
            stored_at: now,
        };
        if let Err(e) = self.store.put(key, entry).await {
            warn!("Appeal cost cache write failed: {}", e);
        }
    }
}
