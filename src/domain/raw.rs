//! Raw documents published by the dex backend.
//!
//! These mirror the upstream JSON field for field. Amounts, weights and
//! identifiers stay strings: observed magnitudes exceed 64-bit range and
//! are never parsed into fixed-width integers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pool listing document (`/osmosis/gamm/v1beta1/pools`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPoolList {
    /// Pools in upstream order.
    pub pools: Vec<RawPool>,
    /// Pagination cursor, when the endpoint reports one.
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Pagination block of the pool listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Cursor for the next page, `null` on the last page.
    #[serde(default)]
    pub next_key: Option<String>,
    /// Total pool count as a decimal string.
    #[serde(default)]
    pub total: Option<String>,
}

/// A single pool as listed upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPool {
    /// Protobuf type URL (e.g. `/osmosis.gamm.v1beta1.Pool`).
    #[serde(rename = "@type", default)]
    pub type_url: String,
    /// Pool account address.
    #[serde(default)]
    pub address: String,
    /// Numeric-string pool identifier.
    pub id: String,
    /// Fee and weight-change parameters.
    #[serde(default)]
    pub pool_params: PoolParams,
    /// Governor lock duration.
    #[serde(default)]
    pub future_pool_governor: Option<String>,
    /// LP share supply.
    #[serde(default)]
    pub total_shares: Option<RawCoin>,
    /// Weighted tokens, absent for pool kinds without per-asset weights.
    #[serde(default)]
    pub pool_assets: Option<Vec<RawPoolAsset>>,
    /// Sum of all weights as a decimal string.
    #[serde(default)]
    pub total_weight: Option<String>,
    /// Reserves of stableswap pools.
    #[serde(default)]
    pub pool_liquidity: Option<Vec<RawCoin>>,
    /// Stableswap scaling factors.
    #[serde(default)]
    pub scaling_factors: Option<Vec<String>>,
    /// Account allowed to change the scaling factors.
    #[serde(default)]
    pub scaling_factor_controller: Option<String>,
}

impl RawPool {
    /// Token denominations in upstream order. Empty when the pool lists no
    /// weighted tokens.
    #[must_use]
    pub fn denoms(&self) -> Vec<&str> {
        self.pool_assets
            .iter()
            .flatten()
            .map(|asset| asset.token.denom.as_str())
            .collect()
    }

    /// Returns `true` if the pool lists at least one weighted token.
    #[must_use]
    pub fn has_tokens(&self) -> bool {
        self.pool_assets
            .as_ref()
            .is_some_and(|assets| !assets.is_empty())
    }

    /// Total weight, `"0"` when the field is absent.
    #[must_use]
    pub fn total_weight_or_zero(&self) -> &str {
        self.total_weight.as_deref().unwrap_or("0")
    }
}

/// Pool parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolParams {
    /// Swap fee as a decimal string.
    #[serde(default)]
    pub swap_fee: String,
    /// Exit fee as a decimal string.
    #[serde(default)]
    pub exit_fee: String,
    /// Present (non-null) on liquidity-bootstrap pools.
    #[serde(default)]
    pub smooth_weight_change_params: Option<serde_json::Value>,
}

/// A denomination and an amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCoin {
    /// Chain-native denomination.
    pub denom: String,
    /// Amount as a decimal string.
    pub amount: String,
}

/// A weighted token of a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPoolAsset {
    /// Token reserve.
    pub token: RawCoin,
    /// Weight as a decimal string.
    pub weight: String,
}

/// Volume statistics document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawVolumeList {
    /// Unix timestamp (seconds) of the last refresh.
    #[serde(default)]
    pub last_update_at: f64,
    /// One entry per tracked pool.
    pub data: Vec<RawVolumeEntry>,
}

impl RawVolumeList {
    /// Time of the last upstream refresh, if the timestamp is representable.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.last_update_at as i64, 0)
    }
}

/// Trailing volume statistics of one pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawVolumeEntry {
    /// Identifier of the pool the statistics belong to.
    pub pool_id: String,
    /// Trailing 24h volume.
    #[serde(default)]
    pub volume_24h: f64,
    /// Trailing 7d volume.
    #[serde(default)]
    pub volume_7d: f64,
    /// Fees paid over the trailing 24h.
    #[serde(default)]
    pub fees_spent_24h: f64,
    /// Fees paid over the trailing 7d.
    #[serde(default)]
    pub fees_spent_7d: f64,
    /// Swap fee as a percentage string.
    #[serde(default)]
    pub fees_percentage: String,
}
