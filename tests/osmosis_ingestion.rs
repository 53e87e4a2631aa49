//! End-to-end ingestion of canned Osmosis documents through the public API.

#![allow(clippy::panic)]

use std::sync::Arc;

use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use dex_registry_scraper::domain::{
    AssetEntry, AssetName, ContractEntry, PoolAssets, PoolEntry, PoolId, PoolType,
};
use dex_registry_scraper::exchange::{Exchange, OsmosisDex, OsmosisOptions};
use dex_registry_scraper::pipeline::ContractFailurePolicy;
use dex_registry_scraper::registry::{
    ContractRegistry, InMemoryAssetRegistry, InMemoryNetwork, PoolRegistry,
};
use dex_registry_scraper::source::StaticJsonSource;

const POOLS: &str = "mem://osmosis/pools";

fn asset(denom: &str, weight: &str) -> serde_json::Value {
    json!({"token": {"denom": denom, "amount": "1000"}, "weight": weight})
}

fn same_pair_pools() -> serde_json::Value {
    json!({
        "pools": [
            {
                "@type": "/osmosis.gamm.v1beta1.Pool",
                "id": "2",
                "pool_params": {"swap_fee": "0.003", "exit_fee": "0", "smooth_weight_change_params": null},
                "pool_assets": [asset("ibc/X", "700"), asset("ibc/Y", "300")],
                "total_weight": "1000"
            },
            {
                "@type": "/osmosis.gamm.v1beta1.Pool",
                "id": "1",
                "pool_params": {"swap_fee": "0.002", "exit_fee": "0", "smooth_weight_change_params": null},
                "pool_assets": [asset("ibc/X", "5000"), asset("ibc/Y", "5000")],
                "total_weight": "10000"
            }
        ],
        "pagination": {"next_key": null, "total": "2"}
    })
}

fn dex(document: serde_json::Value) -> OsmosisDex {
    let source = StaticJsonSource::new().with_document(POOLS, document);
    OsmosisDex::new(OsmosisOptions::new(POOLS), Arc::new(source))
}

fn pool_id(raw: &str) -> PoolId {
    let Ok(id) = PoolId::parse(raw) else {
        panic!("valid id {raw} rejected");
    };
    id
}

#[tokio::test]
async fn heavier_duplicate_pair_is_deferred_when_an_asset_is_unknown() {
    let dex = dex(same_pair_pools());
    let network = InMemoryNetwork::new("osmosis-1").with_asset_registry(
        InMemoryAssetRegistry::with_entries([AssetEntry::native(AssetName::new("x"), "ibc/X")]),
    );

    let ranked = assert_ok!(dex.pool_list().await);
    let ids: Vec<&str> = ranked.pools().iter().map(|pool| pool.id.as_str()).collect();
    assert_eq!(ids, vec!["1"]);

    let report = assert_ok!(dex.register_pools(&network).await);
    assert_eq!(report.pending, 1);
    assert_eq!(report.committed, 0);
    assert!(network.pools().is_empty().await);
    assert!(network.contracts().is_empty().await);

    let pending = network.pools().pending().await;
    let Some(entry) = pending.first() else {
        panic!("pool 1 not parked");
    };
    assert_eq!(entry.pool_id(), &pool_id("1"));
    assert_eq!(entry.pool_type(), PoolType::ConstantProduct);
    assert_eq!(
        entry.assets(),
        &PoolAssets::Unresolved(vec!["ibc/X".to_string(), "ibc/Y".to_string()])
    );
}

#[tokio::test]
async fn onboarding_assets_lets_the_pool_commit() {
    let dex = dex(same_pair_pools());
    let network = InMemoryNetwork::new("osmosis-1")
        .with_native_asset("ibc/X", "x")
        .with_native_asset("ibc/Y", "y");

    let assets = assert_ok!(dex.register_assets(&network).await);
    assert_eq!(assets.registered, 2);
    assert_ok!(dex.register_contracts(&network).await);

    let report = assert_ok!(dex.register_pools(&network).await);
    assert_eq!(report.committed, 1);

    let Some(entry) = network.pools().get(&pool_id("1")).await else {
        panic!("pool 1 not committed");
    };
    assert_eq!(entry.dex(), "osmosis");
    assert_eq!(
        entry.assets(),
        &PoolAssets::Resolved(vec![AssetName::new("x"), AssetName::new("y")])
    );
    assert_eq!(
        network.contracts().address_of("osmosis", "staking/osmosis/x,y").await,
        Some("1".to_string())
    );
}

#[tokio::test]
async fn rerunning_pools_reports_duplicates() {
    let dex = dex(same_pair_pools());
    let network = InMemoryNetwork::new("osmosis-1")
        .with_native_asset("ibc/X", "x")
        .with_native_asset("ibc/Y", "y");
    assert_ok!(dex.register_assets(&network).await);
    assert_ok!(dex.register_pools(&network).await);

    let rerun = assert_ok!(dex.register_pools(&network).await);
    assert_eq!(rerun.duplicates, 1);
    assert_eq!(rerun.contract_failed, 0);
    assert_eq!(rerun.committed, 0);
    assert_eq!(network.pools().len().await, 1);
    assert_eq!(network.contracts().len().await, 1);
}

#[tokio::test]
async fn committed_id_blocks_the_staking_contract() {
    let dex = dex(same_pair_pools());
    let network = InMemoryNetwork::new("osmosis-1")
        .with_native_asset("ibc/X", "x")
        .with_native_asset("ibc/Y", "y");
    assert_ok!(dex.register_assets(&network).await);
    assert_ok!(
        network
            .pools()
            .register(PoolEntry::resolved(
                pool_id("1"),
                "osmosis",
                PoolType::Weighted,
                vec![AssetName::new("z")],
            ))
            .await
    );

    let report = assert_ok!(dex.register_pools(&network).await);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.dropped_ids, vec![pool_id("1")]);
    assert!(network.contracts().is_empty().await);
}

#[tokio::test]
async fn abort_policy_surfaces_contract_conflicts() {
    let source = StaticJsonSource::new().with_document(POOLS, same_pair_pools());
    let dex = OsmosisDex::new(
        OsmosisOptions::new(POOLS).with_contract_failure(ContractFailurePolicy::Abort),
        Arc::new(source),
    );
    let network = InMemoryNetwork::new("osmosis-1")
        .with_native_asset("ibc/X", "x")
        .with_native_asset("ibc/Y", "y");
    assert_ok!(dex.register_assets(&network).await);
    assert_ok!(
        network
            .contracts()
            .register(ContractEntry::new("osmosis", "staking/osmosis/x,y", "42"))
            .await
    );

    let err = assert_err!(dex.register_pools(&network).await);
    assert!(err.is_contract_rejection());
    assert!(network.pools().is_empty().await);
}

#[tokio::test]
async fn unreachable_listing_fails_both_entry_points() {
    let dex = OsmosisDex::new(OsmosisOptions::new(POOLS), Arc::new(StaticJsonSource::new()));
    let network = InMemoryNetwork::new("osmosis-1");

    let err = assert_err!(dex.register_assets(&network).await);
    assert!(err.is_fatal());
    assert_err!(dex.register_pools(&network).await);
    assert_eq!(network.assets().len().await, 0);
}
