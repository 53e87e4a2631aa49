//! Pool ingestion: classify, resolve and commit or defer each ranked pool.
//!
//! Per pool the pass ends in exactly one [`PoolOutcome`]:
//!
//! ```text
//! classify ──None──────────────────────────────► Skipped
//!    │
//! resolve ──Missing──► pending bucket ─────────► Pending
//!    │
//! Resolved ──id already committed──────────────► Duplicate
//!    │
//! contract ──rejected──────────────────────────► ContractFailed
//!    │
//! commit ──duplicate id────────────────────────► Duplicate
//!    └─────────────────────────────────────────► Committed
//! ```
//!
//! The id check runs before the staking contract is written, so a pool
//! dropped as a duplicate never leaves a contract behind.
//!
//! Item-scoped failures never abort the pass; anything else propagates.

use crate::domain::{AssetName, ContractEntry, PoolEntry, PoolId, PoolType, RawPool};
use crate::error::{Result, ScraperError};
use crate::pipeline::classifier::classify;
use crate::pipeline::ranker::RankedPoolList;
use crate::pipeline::report::{IngestionReport, PoolOutcome};
use crate::pipeline::resolver::{AssetResolver, Resolution};
use crate::registry::NetworkContext;

/// What to do when a pool's staking contract is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContractFailurePolicy {
    /// Log a warning, skip the pool and continue.
    #[default]
    DropPool,
    /// Abort the pass with the contract error.
    Abort,
}

/// Commits ranked pools of one dex into a network's registries.
#[derive(Debug, Clone)]
pub struct PoolIngestor {
    dex: String,
    contract_failure: ContractFailurePolicy,
}

impl PoolIngestor {
    /// Creates an ingestor for `dex`. The name is lowercased as it appears
    /// in registry entries.
    #[must_use]
    pub fn new(dex: &str) -> Self {
        Self {
            dex: dex.to_lowercase(),
            contract_failure: ContractFailurePolicy::default(),
        }
    }

    /// Sets the contract failure policy.
    #[must_use]
    pub fn with_contract_failure_policy(mut self, policy: ContractFailurePolicy) -> Self {
        self.contract_failure = policy;
        self
    }

    /// Dex name written into pool entries.
    #[must_use]
    pub fn dex(&self) -> &str {
        &self.dex
    }

    /// Runs every ranked pool through the pipeline, in order.
    ///
    /// `staking_contract` returns the contract to register alongside a
    /// resolved pool, if the exchange has one.
    ///
    /// # Errors
    ///
    /// Returns any registry error that is not item-scoped, and contract
    /// rejections when the policy is [`ContractFailurePolicy::Abort`].
    pub async fn ingest<F>(
        &self,
        ranked: &RankedPoolList,
        network: &dyn NetworkContext,
        staking_contract: F,
    ) -> Result<IngestionReport>
    where
        F: Fn(&PoolId, &[AssetName]) -> Option<ContractEntry> + Send + Sync,
    {
        let resolver = AssetResolver::new(network);
        let mut report = IngestionReport::default();

        for pool in ranked.pools() {
            let Some(pool_type) = classify(pool) else {
                report.record(None, PoolOutcome::Skipped);
                continue;
            };
            let pool_id = match PoolId::parse(&pool.id) {
                Ok(pool_id) => pool_id,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping pool with malformed id");
                    report.record(None, PoolOutcome::Skipped);
                    continue;
                }
            };

            let outcome = self
                .ingest_pool(pool, &pool_id, pool_type, network, resolver, &staking_contract)
                .await?;
            tracing::debug!(%pool_id, ?outcome, "pool ingested");
            report.record(Some(&pool_id), outcome);
        }

        tracing::info!(
            dex = %self.dex,
            network = %network.network_id(),
            committed = report.committed,
            pending = report.pending,
            dropped = report.dropped(),
            skipped = report.skipped,
            "pool ingestion finished"
        );
        Ok(report)
    }

    async fn ingest_pool<F>(
        &self,
        pool: &RawPool,
        pool_id: &PoolId,
        pool_type: PoolType,
        network: &dyn NetworkContext,
        resolver: AssetResolver<'_>,
        staking_contract: &F,
    ) -> Result<PoolOutcome>
    where
        F: Fn(&PoolId, &[AssetName]) -> Option<ContractEntry> + Send + Sync,
    {
        let denoms = pool.denoms();

        let names = match resolver.resolve_all(&denoms).await? {
            Resolution::Resolved(names) => names,
            Resolution::Missing(missing) => {
                tracing::info!(
                    %pool_id,
                    ?missing,
                    "not all denoms are registered, deferring pool"
                );
                let raw = denoms.iter().map(ToString::to_string).collect();
                let entry = PoolEntry::unresolved(pool_id.clone(), &self.dex, pool_type, raw);
                network.pool_registry().unknown(entry).await;
                return Ok(PoolOutcome::Pending);
            }
        };

        if network.pool_registry().contains(pool_id).await {
            tracing::warn!(%pool_id, "pool id already registered, dropping pool");
            return Ok(PoolOutcome::Duplicate);
        }

        if let Some(contract) = staking_contract(pool_id, &names)
            && let Err(err) = network.contract_registry().register(contract).await
        {
            if !err.is_contract_rejection() || self.contract_failure == ContractFailurePolicy::Abort
            {
                return Err(err);
            }
            tracing::warn!(
                %pool_id,
                error = %err,
                "failed to register staking contract, dropping pool"
            );
            return Ok(PoolOutcome::ContractFailed);
        }

        let entry = PoolEntry::resolved(pool_id.clone(), &self.dex, pool_type, names);
        match network.pool_registry().register(entry).await {
            Ok(()) => Ok(PoolOutcome::Committed),
            Err(ScraperError::DuplicateId(id)) => {
                tracing::warn!(pool_id = %id, "pool id already registered, dropping pool");
                Ok(PoolOutcome::Duplicate)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{AssetEntry, PoolAssets, RawVolumeList, naming};
    use crate::pipeline::ranker::PoolRanker;
    use crate::registry::{ContractRegistry, InMemoryAssetRegistry, InMemoryNetwork, PoolRegistry};

    fn asset(denom: &str, weight: &str) -> serde_json::Value {
        json!({"token": {"denom": denom, "amount": "1000"}, "weight": weight})
    }

    fn ranked(pools: serde_json::Value) -> RankedPoolList {
        let Ok(pools) = serde_json::from_value::<Vec<RawPool>>(pools) else {
            panic!("fixture pools rejected");
        };
        PoolRanker::default().rank(pools, None)
    }

    fn network() -> InMemoryNetwork {
        InMemoryNetwork::new("osmosis-1").with_asset_registry(InMemoryAssetRegistry::with_entries([
            AssetEntry::native(AssetName::new("osmo"), "uosmo"),
            AssetEntry::native(AssetName::new("atom"), "uatom"),
            AssetEntry::native(AssetName::new("ion"), "uion"),
        ]))
    }

    fn staking(pool_id: &PoolId, names: &[AssetName]) -> Option<ContractEntry> {
        let lp = naming::lp_token("osmosis", names);
        Some(ContractEntry::new("osmosis", naming::staking_contract(&lp), pool_id.to_string()))
    }

    fn pool_id(raw: &str) -> PoolId {
        let Ok(id) = PoolId::parse(raw) else {
            panic!("valid id rejected");
        };
        id
    }

    #[tokio::test]
    async fn commits_resolved_pools_with_contracts() {
        let network = network();
        let pools = ranked(json!([
            {"id": "1", "pool_assets": [asset("uatom", "5"), asset("uosmo", "5")], "total_weight": "10"},
            {"id": "2", "pool_assets": [asset("uion", "8"), asset("uosmo", "2")], "total_weight": "10"}
        ]));

        let Ok(report) = PoolIngestor::new("Osmosis").ingest(&pools, &network, staking).await else {
            panic!("ingestion failed");
        };
        assert_eq!(report.committed, 2);
        assert_eq!(network.contracts().len().await, 2);

        let Some(entry) = network.pools().get(&pool_id("1")).await else {
            panic!("pool 1 missing");
        };
        assert_eq!(entry.dex(), "osmosis");
        assert_eq!(entry.pool_type(), PoolType::ConstantProduct);
        assert_eq!(
            entry.assets(),
            &PoolAssets::Resolved(vec![AssetName::new("atom"), AssetName::new("osmo")])
        );
        let Some(weighted) = network.pools().get(&pool_id("2")).await else {
            panic!("pool 2 missing");
        };
        assert_eq!(weighted.pool_type(), PoolType::Weighted);
    }

    #[tokio::test]
    async fn unknown_denom_defers_whole_pool() {
        let network = network();
        let pools = ranked(json!([
            {"id": "3", "pool_assets": [asset("uosmo", "1"), asset("uatom", "1"), asset("ujuno", "1")]}
        ]));

        let Ok(report) = PoolIngestor::new("Osmosis").ingest(&pools, &network, staking).await else {
            panic!("ingestion failed");
        };
        assert_eq!(report.pending, 1);
        assert_eq!(report.committed, 0);
        assert!(network.pools().is_empty().await);
        assert!(network.contracts().is_empty().await);

        let pending = network.pools().pending().await;
        let Some(entry) = pending.first() else {
            panic!("pending bucket empty");
        };
        assert!(!entry.is_resolved());
        assert_eq!(entry.assets().as_strings(), vec!["uosmo", "uatom", "ujuno"]);
    }

    #[tokio::test]
    async fn contract_rejection_drops_pool_and_continues() {
        let network = network();
        // Volume ranking keeps both pools of the same pair, so the second
        // staking contract name collides.
        let Ok(pools) = serde_json::from_value::<Vec<RawPool>>(json!([
            {"id": "1", "pool_assets": [asset("uatom", "1"), asset("uosmo", "1")]},
            {"id": "4", "pool_assets": [asset("uosmo", "1"), asset("uatom", "1")]},
            {"id": "5", "pool_assets": [asset("uion", "1"), asset("uosmo", "1")]}
        ])) else {
            panic!("fixture pools rejected");
        };
        let Ok(volumes) = serde_json::from_value::<RawVolumeList>(json!({"data": []})) else {
            panic!("fixture volumes rejected");
        };
        let list = PoolRanker::default().rank(pools, Some(&volumes));

        let Ok(report) = PoolIngestor::new("Osmosis").ingest(&list, &network, staking).await else {
            panic!("ingestion failed");
        };
        assert_eq!(report.committed, 2);
        assert_eq!(report.contract_failed, 1);
        assert_eq!(report.dropped_ids, vec![pool_id("4")]);
        assert!(network.pools().get(&pool_id("4")).await.is_none());
    }

    #[tokio::test]
    async fn abort_policy_propagates_contract_rejection() {
        let network = network();
        let _ = network
            .contracts()
            .register(ContractEntry::new("osmosis", "staking/osmosis/atom,osmo", "99"))
            .await;
        let pools = ranked(json!([
            {"id": "1", "pool_assets": [asset("uatom", "1"), asset("uosmo", "1")]}
        ]));

        let ingestor =
            PoolIngestor::new("Osmosis").with_contract_failure_policy(ContractFailurePolicy::Abort);
        let result = ingestor.ingest(&pools, &network, staking).await;
        let Err(err) = result else {
            panic!("expected abort");
        };
        assert!(err.is_contract_rejection());
        assert!(network.pools().is_empty().await);
    }

    #[tokio::test]
    async fn duplicate_id_is_dropped() {
        let network = network();
        let _ = network
            .pools()
            .register(PoolEntry::resolved(
                pool_id("1"),
                "osmosis",
                PoolType::Weighted,
                vec![AssetName::new("ion")],
            ))
            .await;
        let pools = ranked(json!([
            {"id": "1", "pool_assets": [asset("uatom", "1"), asset("uosmo", "1")]}
        ]));

        let Ok(report) = PoolIngestor::new("Osmosis").ingest(&pools, &network, staking).await else {
            panic!("ingestion failed");
        };
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.committed, 0);
        assert_eq!(report.dropped_ids, vec![pool_id("1")]);
        assert!(network.contracts().is_empty().await);
        let Some(kept) = network.pools().get(&pool_id("1")).await else {
            panic!("existing pool replaced");
        };
        assert_eq!(kept.pool_type(), PoolType::Weighted);
    }

    #[tokio::test]
    async fn second_pass_reports_duplicates_not_contract_failures() {
        let network = network();
        let pools = ranked(json!([
            {"id": "1", "pool_assets": [asset("uatom", "1"), asset("uosmo", "1")]}
        ]));
        let ingestor = PoolIngestor::new("Osmosis");
        let Ok(first) = ingestor.ingest(&pools, &network, staking).await else {
            panic!("first pass failed");
        };
        assert_eq!(first.committed, 1);

        let Ok(second) = ingestor.ingest(&pools, &network, staking).await else {
            panic!("second pass failed");
        };
        assert_eq!(second.duplicates, 1);
        assert_eq!(second.contract_failed, 0);
        assert_eq!(network.contracts().len().await, 1);
    }

    #[tokio::test]
    async fn malformed_ids_and_unknown_types_are_skipped() {
        let network = network();
        let Ok(pools) = serde_json::from_value::<Vec<RawPool>>(json!([
            {"id": "0x1f", "pool_assets": [asset("uatom", "1"), asset("uosmo", "1")]},
            {"id": "8", "pool_liquidity": [{"denom": "uosmo", "amount": "1"}]}
        ])) else {
            panic!("fixture pools rejected");
        };
        let Ok(volumes) = serde_json::from_value::<RawVolumeList>(json!({"data": []})) else {
            panic!("fixture volumes rejected");
        };
        let list = PoolRanker::default().rank(pools, Some(&volumes));

        let Ok(report) = PoolIngestor::new("Osmosis").ingest(&list, &network, staking).await else {
            panic!("ingestion failed");
        };
        assert_eq!(report.skipped, 2);
        assert_eq!(report.total(), 2);
        assert!(network.pools().is_empty().await);
        assert_eq!(network.pools().pending_len().await, 0);
    }
}
