//! In-process network context.
//!
//! [`InMemoryNetwork`] owns one registry of each kind and answers native
//! asset lookups from a denomination → name metadata table supplied at
//! construction time.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::memory::{InMemoryAssetRegistry, InMemoryContractRegistry, InMemoryPoolRegistry};
use super::{AssetRegistry, ContractRegistry, NetworkContext, PoolRegistry};
use crate::domain::{AssetEntry, AssetName};
use crate::error::{Result, ScraperError};

/// Network backed by in-memory registries.
#[derive(Debug)]
pub struct InMemoryNetwork {
    network_id: String,
    assets: InMemoryAssetRegistry,
    pools: InMemoryPoolRegistry,
    contracts: InMemoryContractRegistry,
    native_metadata: HashMap<String, AssetName>,
    native_lookups: AtomicUsize,
}

impl InMemoryNetwork {
    /// Creates a network with empty registries and no native metadata.
    #[must_use]
    pub fn new(network_id: impl Into<String>) -> Self {
        Self {
            network_id: network_id.into(),
            assets: InMemoryAssetRegistry::new(),
            pools: InMemoryPoolRegistry::new(),
            contracts: InMemoryContractRegistry::new(),
            native_metadata: HashMap::new(),
            native_lookups: AtomicUsize::new(0),
        }
    }

    /// Adds chain metadata for one native denomination.
    #[must_use]
    pub fn with_native_asset(mut self, denom: impl Into<String>, name: impl Into<String>) -> Self {
        self.native_metadata
            .insert(denom.into(), AssetName::new(name));
        self
    }

    /// Adds chain metadata for many native denominations.
    #[must_use]
    pub fn with_native_assets(mut self, metadata: HashMap<String, String>) -> Self {
        self.native_metadata.extend(
            metadata
                .into_iter()
                .map(|(denom, name)| (denom, AssetName::new(name))),
        );
        self
    }

    /// Replaces the asset registry, e.g. to start from known assets.
    #[must_use]
    pub fn with_asset_registry(mut self, assets: InMemoryAssetRegistry) -> Self {
        self.assets = assets;
        self
    }

    /// Concrete asset registry.
    #[must_use]
    pub fn assets(&self) -> &InMemoryAssetRegistry {
        &self.assets
    }

    /// Concrete pool registry.
    #[must_use]
    pub fn pools(&self) -> &InMemoryPoolRegistry {
        &self.pools
    }

    /// Concrete contract registry.
    #[must_use]
    pub fn contracts(&self) -> &InMemoryContractRegistry {
        &self.contracts
    }

    /// Number of native metadata lookups performed so far.
    #[must_use]
    pub fn native_lookups(&self) -> usize {
        self.native_lookups.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl NetworkContext for InMemoryNetwork {
    fn network_id(&self) -> &str {
        &self.network_id
    }

    fn asset_registry(&self) -> &dyn AssetRegistry {
        &self.assets
    }

    fn pool_registry(&self) -> &dyn PoolRegistry {
        &self.pools
    }

    fn contract_registry(&self) -> &dyn ContractRegistry {
        &self.contracts
    }

    async fn register_native_asset(&self, denom: &str) -> Result<AssetEntry> {
        self.native_lookups.fetch_add(1, Ordering::Relaxed);
        let name = self
            .native_metadata
            .get(denom)
            .cloned()
            .ok_or_else(|| ScraperError::AssetLookup {
                denom: denom.to_string(),
                reason: format!("no chain metadata on {}", self.network_id),
            })?;
        let entry = AssetEntry::native(name, denom);
        self.assets.register(entry.clone()).await?;
        tracing::debug!(
            network = %self.network_id,
            denom,
            name = %entry.name,
            "native asset registered"
        );
        Ok(entry)
    }
}
