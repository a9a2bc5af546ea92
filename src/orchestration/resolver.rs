use crate::cache::{AppealCostCache, CacheLookup, ParameterCache};
use crate::datasource::{ChainReader, DataSourceError, SubgraphSource};
use crate::domain::{normalize_item, Address, ItemId, RegistryItem, RegistryParameters, TimeMs, Wei};
use crate::engine::{build_item_view, Clock, ItemView, ViewInputs};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Accepted range for the number of humanized countdown units.
pub const HUMANIZE_UNITS_RANGE: std::ops::RangeInclusive<usize> = 1..=4;

/// Fetches an item and its parameters, then renders its view.
///
/// Parameter and appeal-cost reads go through the caches. A failed chain
/// read degrades the view (loading state, no deposits) rather than failing
/// the request; only the indexed source is required.
#[derive(Debug, Clone)]
pub struct ItemResolver {
    subgraph: Arc<dyn SubgraphSource>,
    chain: Arc<dyn ChainReader>,
    parameters: ParameterCache,
    appeal_costs: AppealCostCache,
    clock: Arc<dyn Clock>,
    humanize_units: usize,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("item {0} not found")]
    NotFound(ItemId),
    #[error("indexed source unavailable: {0}")]
    Source(#[from] DataSourceError),
}

impl ItemResolver {
    pub fn new(
        subgraph: Arc<dyn SubgraphSource>,
        chain: Arc<dyn ChainReader>,
        parameters: ParameterCache,
        appeal_costs: AppealCostCache,
        clock: Arc<dyn Clock>,
        humanize_units: usize,
    ) -> Self {
        Self {
            subgraph,
            chain,
            parameters,
            appeal_costs,
            clock,
            humanize_units,
        }
    }

    /// Build the current view of `id`.
    ///
    /// `units` overrides the configured countdown precision and is clamped to
    /// [`HUMANIZE_UNITS_RANGE`].
    pub async fn resolve_item(
        &self,
        id: &ItemId,
        units: Option<usize>,
    ) -> Result<ItemView, ResolveError> {
        let now = self.clock.now();

        let (raw, parameters) = futures::join!(
            self.subgraph.fetch_item(id),
            self.registry_parameters(&id.registry, now),
        );
        let raw = raw?.ok_or_else(|| ResolveError::NotFound(id.clone()))?;
        let item = normalize_item(id.clone(), raw);

        let appeal_cost = self.appeal_cost(&item, parameters.as_ref(), now).await;

        let humanize_units = units
            .unwrap_or(self.humanize_units)
            .clamp(*HUMANIZE_UNITS_RANGE.start(), *HUMANIZE_UNITS_RANGE.end());

        let view = build_item_view(ViewInputs {
            item: &item,
            parameters: parameters.as_ref(),
            appeal_cost,
            now,
            humanize_units,
        });

        if !view.diagnostics.is_empty() {
            warn!("Item {} has diagnostics: {:?}", id, view.diagnostics);
        }
        Ok(view)
    }

    /// Cached parameters within the staleness window, else a fresh read.
    ///
    /// A failed read falls back to a stale entry when one exists.
    async fn registry_parameters(
        &self,
        registry: &Address,
        now: TimeMs,
    ) -> Option<RegistryParameters> {
        let stale = match self.parameters.get(registry, now).await {
            CacheLookup::Fresh(params) => return Some(params),
            CacheLookup::Stale(params) => Some(params),
            CacheLookup::Miss => None,
        };

        match self.chain.fetch_registry_parameters(registry).await {
            Ok(params) => {
                self.parameters.store(registry, &params, now).await;
                Some(params)
            }
            Err(e) => {
                warn!(
                    "Failed to read parameters for {} (stale fallback: {}): {}",
                    registry,
                    stale.is_some(),
                    e
                );
                stale
            }
        }
    }

    /// Arbitrator cost for the live dispute's current round, if any.
    async fn appeal_cost(
        &self,
        item: &RegistryItem,
        parameters: Option<&RegistryParameters>,
        now: TimeMs,
    ) -> Option<Wei> {
        let request = item.latest_request()?;
        if !request.disputed || request.resolved {
            return None;
        }
        let dispute_id = request.dispute_id?;
        let round_count = request.round_count();
        if round_count == 0 {
            return None;
        }

        let arbitrator = request
            .arbitrator
            .as_ref()
            .or(parameters.map(|p| &p.arbitrator))?;
        let extra_data: &[u8] = match (request.arbitrator_extra_data.is_empty(), parameters) {
            (false, _) => &request.arbitrator_extra_data,
            (true, Some(params)) => &params.arbitrator_extra_data,
            (true, None) => &[],
        };

        if let Some(cost) = self.appeal_costs.get(arbitrator, dispute_id, round_count).await {
            debug!("Appeal cost cache hit for dispute {} round {}", dispute_id, round_count);
            return Some(cost);
        }

        match self
            .chain
            .fetch_arbitration_cost(arbitrator, Some(dispute_id), extra_data)
            .await
        {
            Ok(cost) => {
                self.appeal_costs
                    .store(arbitrator, dispute_id, round_count, cost, now)
                    .await;
                Some(cost)
            }
            Err(e) => {
                warn!("Failed to read appeal cost for dispute {}: {}", dispute_id, e);
                None
            }
        }
    }
}
