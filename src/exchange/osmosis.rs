//! Osmosis backend.
//!
//! Pools come from the chain's gamm pool listing; the optional volume
//! document switches ranking from total weight to trailing volume. The
//! ranked list is fetched once per [`OsmosisDex`] and reused by both
//! entry points.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use super::Exchange;
use crate::domain::{
    AssetName, ContractEntry, PoolId, RawPool, RawPoolList, RawVolumeList, naming,
};
use crate::error::Result;
use crate::pipeline::{
    AssetRegistrationReport, AssetResolver, ContractFailurePolicy, IngestionReport, PoolIngestor,
    PoolRanker, RankedPoolList, VolumeCap,
};
use crate::registry::NetworkContext;
use crate::source::{JsonSource, fetch_document};

/// Display name of the Osmosis dex.
pub const OSMOSIS: &str = "Osmosis";

/// Where and how to fetch Osmosis pools.
#[derive(Debug, Clone)]
pub struct OsmosisOptions {
    /// URL of the gamm pool listing.
    pub pool_url: String,
    /// URL of the pool volume document. `None` ranks by total weight.
    pub volume_url: Option<String>,
    /// Pools kept by volume ranking.
    pub volume_cap: VolumeCap,
    /// What to do when a staking contract is rejected.
    pub contract_failure: ContractFailurePolicy,
}

impl OsmosisOptions {
    /// Options ranking by weight, with default cap and contract policy.
    #[must_use]
    pub fn new(pool_url: impl Into<String>) -> Self {
        Self {
            pool_url: pool_url.into(),
            volume_url: None,
            volume_cap: VolumeCap::default(),
            contract_failure: ContractFailurePolicy::default(),
        }
    }

    /// Ranks by the volume document at `volume_url`.
    #[must_use]
    pub fn with_volume_url(mut self, volume_url: impl Into<String>) -> Self {
        self.volume_url = Some(volume_url.into());
        self
    }

    /// Sets the volume ranking cap.
    #[must_use]
    pub fn with_volume_cap(mut self, volume_cap: VolumeCap) -> Self {
        self.volume_cap = volume_cap;
        self
    }

    /// Sets the contract failure policy.
    #[must_use]
    pub fn with_contract_failure(mut self, policy: ContractFailurePolicy) -> Self {
        self.contract_failure = policy;
        self
    }
}

/// Osmosis implementation of [`Exchange`].
#[derive(Debug)]
pub struct OsmosisDex {
    options: OsmosisOptions,
    source: Arc<dyn JsonSource>,
    pool_list: OnceCell<RankedPoolList>,
}

impl OsmosisDex {
    /// Creates the backend. Nothing is fetched until an entry point runs.
    #[must_use]
    pub fn new(options: OsmosisOptions, source: Arc<dyn JsonSource>) -> Self {
        Self {
            options,
            source,
            pool_list: OnceCell::new(),
        }
    }

    /// Returns the ranked pool list, fetching it on first use.
    ///
    /// The first successful result is kept for the lifetime of this
    /// instance. A failed fetch leaves nothing cached.
    ///
    /// # Errors
    ///
    /// Returns a transport or decode error from either document.
    pub async fn pool_list(&self) -> Result<&RankedPoolList> {
        self.pool_list
            .get_or_try_init(|| self.fetch_pool_list())
            .await
    }

    async fn fetch_pool_list(&self) -> Result<RankedPoolList> {
        let source = self.source.as_ref();
        let pool_list: RawPoolList = fetch_document(source, &self.options.pool_url).await?;

        let volumes = match &self.options.volume_url {
            Some(url) => Some(fetch_document::<RawVolumeList>(source, url).await?),
            None => None,
        };

        let fetched = pool_list.pools.len();
        let ranked =
            PoolRanker::new(self.options.volume_cap).rank(pool_list.pools, volumes.as_ref());
        tracing::info!(
            dex = OSMOSIS,
            fetched,
            kept = ranked.len(),
            strategy = ?ranked.strategy(),
            volume_updated = ?volumes.as_ref().and_then(RawVolumeList::last_updated),
            "pool list ranked"
        );
        Ok(ranked)
    }
}

#[async_trait]
impl Exchange for OsmosisDex {
    fn name(&self) -> &str {
        OSMOSIS
    }

    async fn register_assets(
        &self,
        network: &dyn NetworkContext,
    ) -> Result<AssetRegistrationReport> {
        let ranked = self.pool_list().await?;
        let denoms = ranked.pools().iter().flat_map(RawPool::denoms);

        let report = AssetResolver::new(network).register_all(denoms).await;
        tracing::info!(
            dex = OSMOSIS,
            network = %network.network_id(),
            denoms = report.total(),
            registered = report.registered,
            already_known = report.already_known,
            failed = report.failed,
            "asset registration finished"
        );
        Ok(report)
    }

    async fn register_pools(&self, network: &dyn NetworkContext) -> Result<IngestionReport> {
        let ranked = self.pool_list().await?;
        tracing::info!(
            dex = OSMOSIS,
            network = %network.network_id(),
            pools = ranked.len(),
            "retrieved pools"
        );

        PoolIngestor::new(OSMOSIS)
            .with_contract_failure_policy(self.options.contract_failure)
            .ingest(ranked, network, |pool_id, assets| {
                self.staking_contract_entry(pool_id, assets)
            })
            .await
    }

    fn staking_contract_entry(
        &self,
        pool_id: &PoolId,
        assets: &[AssetName],
    ) -> Option<ContractEntry> {
        let lp_token = self.lp_token_name(assets);
        Some(ContractEntry::new(
            OSMOSIS.to_lowercase(),
            naming::staking_contract(&lp_token),
            pool_id.to_string(),
        ))
    }
}
