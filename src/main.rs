use anyhow::Context;
use curate_lifecycle::engine::{Clock, SystemClock};
use curate_lifecycle::{
    api, config::Config, db::init_db, AppealCostCache, CacheStore, ChainReader, GraphqlSubgraph,
    ItemResolver, ParameterCache, RpcChainReader, SqliteCacheStore, SubgraphSource,
};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = Config::from_env().context("Configuration error")?;

    let pool = init_db(&config.database_path)
        .await
        .context("Failed to initialize cache database")?;
    let cache_store: Arc<dyn CacheStore> = Arc::new(SqliteCacheStore::new(pool));

    let chain: Arc<dyn ChainReader> = Arc::new(RpcChainReader::new(
        config.rpc_url.clone(),
        config.retry_max_elapsed,
    ));
    let subgraph: Arc<dyn SubgraphSource> = Arc::new(GraphqlSubgraph::new(
        config.subgraph_url.clone(),
        config.retry_max_elapsed,
    ));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let resolver = Arc::new(ItemResolver::new(
        subgraph,
        chain,
        ParameterCache::new(cache_store.clone(), config.parameters_ttl_ms),
        AppealCostCache::new(cache_store.clone()),
        clock,
        config.countdown_units,
    ));

    let app = api::create_router(api::AppState::new(resolver, cache_store));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
