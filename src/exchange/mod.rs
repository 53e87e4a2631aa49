//! Dex backends.
//!
//! Every backend implements [`Exchange`]; orchestrators hold them as
//! `Box<dyn Exchange>` and never depend on a concrete dex.

pub mod osmosis;

use std::fmt;

use async_trait::async_trait;

use crate::domain::{AssetName, ContractEntry, PoolId, naming};
use crate::error::Result;
use crate::pipeline::{AssetRegistrationReport, IngestionReport};
use crate::registry::NetworkContext;

pub use osmosis::{OsmosisDex, OsmosisOptions};

/// Contract every dex backend satisfies.
#[async_trait]
pub trait Exchange: Send + Sync + fmt::Debug {
    /// Display name of the dex (e.g. `"Osmosis"`).
    fn name(&self) -> &str;

    /// Registers every distinct denomination found in the dex's pools.
    ///
    /// Idempotent: denominations already known to the network are not
    /// looked up again. Per-denomination failures are counted, not raised.
    ///
    /// # Errors
    ///
    /// Returns an error only if the pool listing cannot be fetched.
    async fn register_assets(
        &self,
        network: &dyn NetworkContext,
    ) -> Result<AssetRegistrationReport>;

    /// Ingests the dex's ranked pools into the network's pool registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool listing cannot be fetched or a registry
    /// fails in a way that is not scoped to a single pool.
    async fn register_pools(&self, network: &dyn NetworkContext) -> Result<IngestionReport>;

    /// Registers protocol-level contracts. Does nothing by default.
    ///
    /// # Errors
    ///
    /// Returns the contract registry's error.
    async fn register_contracts(&self, _network: &dyn NetworkContext) -> Result<()> {
        Ok(())
    }

    /// Builds the LP token name of a pool made of `assets`.
    fn lp_token_name(&self, assets: &[AssetName]) -> String {
        naming::lp_token(self.name(), assets)
    }

    /// Staking contract to register alongside a resolved pool. None by
    /// default.
    fn staking_contract_entry(
        &self,
        _pool_id: &PoolId,
        _assets: &[AssetName],
    ) -> Option<ContractEntry> {
        None
    }
}
