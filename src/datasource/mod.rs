//! External read interfaces: on-chain contract reads and the indexed item source.

use crate::domain::{Address, DisputeId, ItemId, RawItem, RegistryParameters, Wei};
use async_trait::async_trait;
use std::fmt;

pub mod http;
pub mod mock;
pub mod rpc;
pub mod subgraph;

pub use mock::{MockChainReader, MockSubgraph};
pub use rpc::RpcChainReader;
pub use subgraph::GraphqlSubgraph;

/// Read-only contract calls.
///
/// Implementations retry transient failures with backoff. All reads are
/// idempotent.
#[async_trait]
pub trait ChainReader: Send + Sync + fmt::Debug {
    /// Cost reported by the arbitrator for the dispute's current round.
    ///
    /// # Arguments
    /// * `arbitrator` - Arbitrator contract address
    /// * `dispute_id` - Dispute number; `None` asks for the cost of a new dispute
    /// * `extra_data` - Arbitrator extra data configured on the registry
    async fn fetch_arbitration_cost(
        &self,
        arbitrator: &Address,
        dispute_id: Option<DisputeId>,
        extra_data: &[u8],
    ) -> Result<Wei, DataSourceError>;

    /// Stake multipliers, deposits, arbitrator settings and challenge period.
    async fn fetch_registry_parameters(
        &self,
        registry: &Address,
    ) -> Result<RegistryParameters, DataSourceError>;

    /// Challenge period in seconds.
    async fn fetch_challenge_period_duration(
        &self,
        registry: &Address,
    ) -> Result<u64, DataSourceError>;
}

/// Indexed item graphs, newest request and round first.
#[async_trait]
pub trait SubgraphSource: Send + Sync + fmt::Debug {
    /// Fetch one item, or `None` if the index does not know it.
    async fn fetch_item(&self, id: &ItemId) -> Result<Option<RawItem>, DataSourceError>;
}

/// Error type for data source operations.
#[derive(Debug, Clone)]
pub enum DataSourceError {
    /// Network error (e.g., connection timeout, DNS failure)
    NetworkError(String),
    /// HTTP error (e.g., 429 rate limit, 5xx server error)
    HttpError { status: u16, message: String },
    /// JSON-RPC or GraphQL level error reported by the server
    UpstreamError(String),
    /// Parsing error (invalid JSON, malformed ABI return data)
    ParseError(String),
    /// Rate limit exceeded
    RateLimited,
    /// Other error
    Other(String),
}

impl fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DataSourceError::HttpError { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            DataSourceError::UpstreamError(msg) => write!(f, "Upstream error: {}", msg),
            DataSourceError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            DataSourceError::RateLimited => write!(f, "Rate limited"),
            DataSourceError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for DataSourceError {}
