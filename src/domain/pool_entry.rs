//! Registry pool entries and their economic type.

use std::fmt;

use serde::Serialize;

use super::{AssetName, PoolId};

/// Economic type of a liquidity pool.
///
/// A pool whose shape matches none of these is reported as `None` by the
/// classifier rather than through a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolType {
    /// Every asset carries the same weight (x * y = k).
    ConstantProduct,
    /// Assets carry different, fixed weights.
    Weighted,
    /// Weights change smoothly over time.
    LiquidityBootstrap,
}

impl PoolType {
    /// Returns the registry tag for this pool type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ConstantProduct => "constant_product",
            Self::Weighted => "weighted",
            Self::LiquidityBootstrap => "liquidity_bootstrap",
        }
    }
}

impl fmt::Display for PoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asset references of a pool, in the same order as the upstream tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "assets", rename_all = "snake_case")]
pub enum PoolAssets {
    /// Every denomination resolved to a canonical asset name.
    Resolved(Vec<AssetName>),
    /// At least one denomination is unknown; raw denominations are kept.
    Unresolved(Vec<String>),
}

impl PoolAssets {
    /// Returns the asset references as strings.
    #[must_use]
    pub fn as_strings(&self) -> Vec<&str> {
        match self {
            Self::Resolved(names) => names.iter().map(AssetName::as_str).collect(),
            Self::Unresolved(denoms) => denoms.iter().map(String::as_str).collect(),
        }
    }

    /// Returns the number of assets in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Resolved(names) => names.len(),
            Self::Unresolved(denoms) => denoms.len(),
        }
    }

    /// Returns `true` if the pool references no assets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A pool ready to be handed to a pool registry.
///
/// Entries are immutable once built: the ingestion pipeline constructs one
/// per pool and transfers ownership to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolEntry {
    pool_id: PoolId,
    dex: String,
    pool_type: PoolType,
    assets: PoolAssets,
}

impl PoolEntry {
    /// Builds an entry whose assets all resolved to canonical names.
    #[must_use]
    pub fn resolved(
        pool_id: PoolId,
        dex: impl Into<String>,
        pool_type: PoolType,
        assets: Vec<AssetName>,
    ) -> Self {
        Self {
            pool_id,
            dex: dex.into(),
            pool_type,
            assets: PoolAssets::Resolved(assets),
        }
    }

    /// Builds an entry that keeps the raw denominations, destined for the
    /// pending bucket.
    #[must_use]
    pub fn unresolved(
        pool_id: PoolId,
        dex: impl Into<String>,
        pool_type: PoolType,
        denoms: Vec<String>,
    ) -> Self {
        Self {
            pool_id,
            dex: dex.into(),
            pool_type,
            assets: PoolAssets::Unresolved(denoms),
        }
    }

    /// Pool identifier on its dex.
    #[must_use]
    pub fn pool_id(&self) -> &PoolId {
        &self.pool_id
    }

    /// Lowercased dex name.
    #[must_use]
    pub fn dex(&self) -> &str {
        &self.dex
    }

    /// Economic pool type.
    #[must_use]
    pub fn pool_type(&self) -> PoolType {
        self.pool_type
    }

    /// Asset references in upstream token order.
    #[must_use]
    pub fn assets(&self) -> &PoolAssets {
        &self.assets
    }

    /// Returns `true` if every asset resolved to a canonical name.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self.assets, PoolAssets::Resolved(_))
    }
}
