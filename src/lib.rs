pub mod api;
pub mod cache;
pub mod config;
pub mod datasource;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;

pub use cache::{AppealCostCache, CacheStore, MemoryCacheStore, ParameterCache};
pub use config::Config;
pub use datasource::{
    ChainReader, DataSourceError, GraphqlSubgraph, MockChainReader, MockSubgraph, RpcChainReader,
    SubgraphSource,
};
pub use db::{init_db, SqliteCacheStore};
pub use domain::{Address, ItemId, RegistryItem, RegistryParameters, TimeMs, UnixSeconds, Wei};
pub use engine::{build_item_view, ItemView, ViewInputs};
pub use error::AppError;
pub use orchestration::{ItemResolver, ResolveError};
