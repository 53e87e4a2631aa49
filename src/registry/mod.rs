//! Registry collaborators consumed by the ingestion pipeline.
//!
//! The pipeline only talks to registries through these traits. Storage is
//! the implementor's concern; [`memory`] provides `tokio::RwLock`-backed
//! in-process implementations and [`network`] bundles them into a
//! [`NetworkContext`].

pub mod memory;
pub mod network;

use std::fmt;

use async_trait::async_trait;

use crate::domain::{AssetEntry, AssetName, ContractEntry, PoolEntry, PoolId};
use crate::error::Result;

pub use memory::{InMemoryAssetRegistry, InMemoryContractRegistry, InMemoryPoolRegistry};
pub use network::InMemoryNetwork;

/// Directory of canonical asset names keyed by denomination.
#[async_trait]
pub trait AssetRegistry: Send + Sync + fmt::Debug {
    /// Returns `true` if the denomination is already registered.
    async fn has_denom(&self, denom: &str) -> bool;

    /// Resolves every denomination to its canonical name, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ScraperError::NotFound`] listing the unknown
    /// denominations if any single one is unregistered. Never returns a
    /// partial mapping.
    async fn names_by_denoms(&self, denoms: &[&str]) -> Result<Vec<AssetName>>;

    /// Registers an asset.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ScraperError::AssetConflict`] if the
    /// denomination is already bound to another name.
    async fn register(&self, entry: AssetEntry) -> Result<()>;
}

/// Directory of pools plus the pending bucket for unresolved pools.
#[async_trait]
pub trait PoolRegistry: Send + Sync + fmt::Debug {
    /// Returns `true` if a pool with this id is already committed. Pending
    /// pools do not count.
    async fn contains(&self, pool_id: &PoolId) -> bool;

    /// Commits a resolved pool.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ScraperError::DuplicateId`] if a pool with the
    /// same identifier is already registered.
    async fn register(&self, entry: PoolEntry) -> Result<()>;

    /// Parks a pool whose assets are not all known yet.
    async fn unknown(&self, entry: PoolEntry);
}

/// Directory of named protocol contracts.
#[async_trait]
pub trait ContractRegistry: Send + Sync + fmt::Debug {
    /// Registers a contract.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ScraperError::DuplicateContract`] or
    /// [`crate::error::ScraperError::ContractRegistration`] when the entry is
    /// rejected.
    async fn register(&self, entry: ContractEntry) -> Result<()>;
}

/// Everything an exchange needs from the network it scrapes for.
#[async_trait]
pub trait NetworkContext: Send + Sync + fmt::Debug {
    /// Network identifier, used for diagnostics.
    fn network_id(&self) -> &str;

    /// Asset name directory.
    fn asset_registry(&self) -> &dyn AssetRegistry;

    /// Pool directory.
    fn pool_registry(&self) -> &dyn PoolRegistry;

    /// Contract directory.
    fn contract_registry(&self) -> &dyn ContractRegistry;

    /// Looks up chain metadata for a native denomination and registers the
    /// resulting asset.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ScraperError::AssetLookup`] if no metadata is
    /// available, or the asset registry's error if registration fails.
    async fn register_native_asset(&self, denom: &str) -> Result<AssetEntry>;
}
