//! Mock data sources for testing without network calls.

use super::{ChainReader, DataSourceError, SubgraphSource};
use crate::domain::{Address, DisputeId, ItemId, RawItem, RegistryParameters, Wei};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Mock contract reader returning predefined values.
///
/// Values can be swapped at runtime and failures toggled, so tests can
/// exercise cache fallback paths.
#[derive(Debug, Default)]
pub struct MockChainReader {
    parameters: RwLock<HashMap<Address, RegistryParameters>>,
    cost: RwLock<Option<Wei>>,
    failing: AtomicBool,
    parameter_calls: AtomicUsize,
    cost_calls: AtomicUsize,
}

impl MockChainReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parameters returned for `registry`.
    pub fn with_parameters(mut self, registry: Address, params: RegistryParameters) -> Self {
        self.parameters.get_mut().insert(registry, params);
        self
    }

    /// Set the arbitration cost returned for every dispute.
    pub fn with_cost(mut self, cost: Wei) -> Self {
        *self.cost.get_mut() = Some(cost);
        self
    }

    pub async fn set_parameters(&self, registry: Address, params: RegistryParameters) {
        self.parameters.write().await.insert(registry, params);
    }

    pub async fn set_cost(&self, cost: Wei) {
        *self.cost.write().await = Some(cost);
    }

    /// Make every subsequent read fail with a network error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn parameter_calls(&self) -> usize {
        self.parameter_calls.load(Ordering::SeqCst)
    }

    pub fn cost_calls(&self) -> usize {
        self.cost_calls.load(Ordering::SeqCst)
    }

    fn check_failing(&self) -> Result<(), DataSourceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DataSourceError::NetworkError("mock failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ChainReader for MockChainReader {
    async fn fetch_arbitration_cost(
        &self,
        _arbitrator: &Address,
        _dispute_id: Option<DisputeId>,
        _extra_data: &[u8],
    ) -> Result<Wei, DataSourceError> {
        self.cost_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        self.cost
            .read()
            .await
            .ok_or_else(|| DataSourceError::Other("no cost configured".to_string()))
    }

    async fn fetch_registry_parameters(
        &self,
        registry: &Address,
    ) -> Result<RegistryParameters, DataSourceError> {
        self.parameter_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        self.parameters
            .read()
            .await
            .get(registry)
            .cloned()
            .ok_or_else(|| DataSourceError::Other(format!("no parameters for {}", registry)))
    }

    async fn fetch_challenge_period_duration(
        &self,
        registry: &Address,
    ) -> Result<u64, DataSourceError> {
        self.fetch_registry_parameters(registry)
            .await
            .map(|p| p.challenge_period_duration)
    }
}

/// Mock indexed source holding items in memory.
#[derive(Debug, Default)]
pub struct MockSubgraph {
    items: RwLock<HashMap<ItemId, RawItem>>,
    failing: AtomicBool,
}

impl MockSubgraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, id: ItemId, item: RawItem) -> Self {
        self.items.get_mut().insert(id, item);
        self
    }

    pub async fn set_item(&self, id: ItemId, item: RawItem) {
        self.items.write().await.insert(id, item);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl SubgraphSource for MockSubgraph {
    async fn fetch_item(&self, id: &ItemId) -> Result<Option<RawItem>, DataSourceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DataSourceError::NetworkError("mock failure".to_string()));
        }
        Ok(self.items.read().await.get(id).cloned())
    }
}
