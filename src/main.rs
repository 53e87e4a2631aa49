//! dex-registry-scraper entry point.
//!
//! Runs every configured exchange against an in-memory network and logs
//! what was registered.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use dex_registry_scraper::config::ScraperConfig;
use dex_registry_scraper::domain::PoolType;
use dex_registry_scraper::exchange::{Exchange, OsmosisDex};
use dex_registry_scraper::registry::InMemoryNetwork;
use dex_registry_scraper::source::{HttpJsonSource, JsonSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = ScraperConfig::from_env().context("loading configuration")?;
    tracing::info!(network = %config.network_id, "starting dex-registry-scraper");

    let metadata = match &config.asset_metadata_path {
        Some(path) => load_asset_metadata(path)?,
        None => HashMap::new(),
    };
    tracing::info!(assets = metadata.len(), "native asset metadata loaded");

    let network = InMemoryNetwork::new(config.network_id.clone()).with_native_assets(metadata);
    let source: Arc<dyn JsonSource> = Arc::new(HttpJsonSource::new(config.http_timeout));

    let exchanges: Vec<Box<dyn Exchange>> = vec![Box::new(OsmosisDex::new(
        config.osmosis_options(),
        Arc::clone(&source),
    ))];

    for exchange in &exchanges {
        let name = exchange.name();

        let assets = exchange
            .register_assets(&network)
            .await
            .with_context(|| format!("registering {name} assets"))?;
        tracing::info!(dex = name, %assets, "assets registered");

        exchange
            .register_contracts(&network)
            .await
            .with_context(|| format!("registering {name} contracts"))?;

        let pools = exchange
            .register_pools(&network)
            .await
            .with_context(|| format!("registering {name} pools"))?;
        tracing::info!(dex = name, %pools, dropped = ?pools.dropped_ids, "pools registered");
    }

    tracing::info!(
        network = %config.network_id,
        assets = network.assets().len().await,
        pools = network.pools().len().await,
        pending = network.pools().pending_len().await,
        contracts = network.contracts().len().await,
        "registry totals"
    );
    for pool_type in [
        PoolType::ConstantProduct,
        PoolType::Weighted,
        PoolType::LiquidityBootstrap,
    ] {
        let pools = network.pools().list(Some(pool_type)).await;
        tracing::info!(%pool_type, pools = pools.len(), "committed pools by type");
    }

    Ok(())
}

/// Reads a JSON object mapping denominations to asset names.
fn load_asset_metadata(path: &Path) -> anyhow::Result<HashMap<String, String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading asset metadata from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parsing asset metadata from {}", path.display()))
}
