//! In-process registries backed by `tokio::RwLock<HashMap<..>>`.
//!
//! Writes take the map's write lock, so registrations for the same key are
//! serialized and duplicates are detected under the lock.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AssetRegistry, ContractRegistry, PoolRegistry};
use crate::domain::{AssetEntry, AssetName, ContractEntry, PoolEntry, PoolId, PoolType};
use crate::error::{Result, ScraperError};

/// Asset directory mapping each denomination to one canonical name.
#[derive(Debug, Default)]
pub struct InMemoryAssetRegistry {
    assets: RwLock<HashMap<String, AssetName>>,
}

impl InMemoryAssetRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-populated with `entries`. Later entries win on
    /// duplicate denominations.
    #[must_use]
    pub fn with_entries(entries: impl IntoIterator<Item = AssetEntry>) -> Self {
        let assets = entries
            .into_iter()
            .map(|entry| (entry.denom, entry.name))
            .collect();
        Self {
            assets: RwLock::new(assets),
        }
    }

    /// Returns the number of registered denominations.
    pub async fn len(&self) -> usize {
        self.assets.read().await.len()
    }

    /// Returns `true` if no asset is registered.
    pub async fn is_empty(&self) -> bool {
        self.assets.read().await.is_empty()
    }
}

#[async_trait]
impl AssetRegistry for InMemoryAssetRegistry {
    async fn has_denom(&self, denom: &str) -> bool {
        self.assets.read().await.contains_key(denom)
    }

    async fn names_by_denoms(&self, denoms: &[&str]) -> Result<Vec<AssetName>> {
        let map = self.assets.read().await;
        let mut names = Vec::with_capacity(denoms.len());
        let mut missing = Vec::new();
        for denom in denoms {
            match map.get(*denom) {
                Some(name) => names.push(name.clone()),
                None => missing.push((*denom).to_string()),
            }
        }
        if missing.is_empty() {
            Ok(names)
        } else {
            Err(ScraperError::NotFound(missing))
        }
    }

    async fn register(&self, entry: AssetEntry) -> Result<()> {
        let mut map = self.assets.write().await;
        match map.get(&entry.denom) {
            Some(existing) if *existing == entry.name => Ok(()),
            Some(existing) => Err(ScraperError::AssetConflict {
                denom: entry.denom,
                existing: existing.to_string(),
            }),
            None => {
                map.insert(entry.denom, entry.name);
                Ok(())
            }
        }
    }
}

/// Pool directory with a pending bucket for unresolved pools.
#[derive(Debug, Default)]
pub struct InMemoryPoolRegistry {
    pools: RwLock<HashMap<PoolId, PoolEntry>>,
    pending: RwLock<Vec<PoolEntry>>,
}

impl InMemoryPoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the committed pool with the given id.
    pub async fn get(&self, pool_id: &PoolId) -> Option<PoolEntry> {
        self.pools.read().await.get(pool_id).cloned()
    }

    /// Returns committed pools ordered by id, optionally filtered by type.
    pub async fn list(&self, pool_type_filter: Option<PoolType>) -> Vec<PoolEntry> {
        let map = self.pools.read().await;
        let mut entries: Vec<PoolEntry> = map
            .values()
            .filter(|entry| pool_type_filter.is_none_or(|filter| entry.pool_type() == filter))
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.pool_id().cmp(b.pool_id()));
        entries
    }

    /// Returns the pending pools in the order they were parked.
    pub async fn pending(&self) -> Vec<PoolEntry> {
        self.pending.read().await.clone()
    }

    /// Returns the number of committed pools.
    pub async fn len(&self) -> usize {
        self.pools.read().await.len()
    }

    /// Returns `true` if no pool is committed.
    pub async fn is_empty(&self) -> bool {
        self.pools.read().await.is_empty()
    }

    /// Returns the number of pending pools.
    pub async fn pending_len(&self) -> usize {
        self.pending.read().await.len()
    }
}

#[async_trait]
impl PoolRegistry for InMemoryPoolRegistry {
    async fn contains(&self, pool_id: &PoolId) -> bool {
        self.pools.read().await.contains_key(pool_id)
    }

    async fn register(&self, entry: PoolEntry) -> Result<()> {
        let mut map = self.pools.write().await;
        if map.contains_key(entry.pool_id()) {
            return Err(ScraperError::DuplicateId(entry.pool_id().clone()));
        }
        map.insert(entry.pool_id().clone(), entry);
        Ok(())
    }

    async fn unknown(&self, entry: PoolEntry) {
        self.pending.write().await.push(entry);
    }
}

/// Contract directory keyed by `(protocol, contract)`.
#[derive(Debug, Default)]
pub struct InMemoryContractRegistry {
    contracts: RwLock<HashMap<(String, String), String>>,
}

impl InMemoryContractRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the address registered for a contract.
    pub async fn address_of(&self, protocol: &str, contract: &str) -> Option<String> {
        self.contracts
            .read()
            .await
            .get(&(protocol.to_string(), contract.to_string()))
            .cloned()
    }

    /// Returns the number of registered contracts.
    pub async fn len(&self) -> usize {
        self.contracts.read().await.len()
    }

    /// Returns `true` if no contract is registered.
    pub async fn is_empty(&self) -> bool {
        self.contracts.read().await.is_empty()
    }
}

#[async_trait]
impl ContractRegistry for InMemoryContractRegistry {
    async fn register(&self, entry: ContractEntry) -> Result<()> {
        if entry.address.is_empty() {
            return Err(ScraperError::ContractRegistration(format!(
                "{}:{} has an empty address",
                entry.protocol, entry.contract
            )));
        }
        let key = (entry.protocol, entry.contract);
        let mut map = self.contracts.write().await;
        if map.contains_key(&key) {
            let (protocol, contract) = key;
            return Err(ScraperError::DuplicateContract { protocol, contract });
        }
        map.insert(key, entry.address);
        Ok(())
    }
}
