//! Pool ranking and deduplication.
//!
//! Two strategies, selected by whether a volume document is available:
//!
//! - **Volume**: stable sort by trailing 7d volume, descending, then cap.
//!   No dedup; volume already favors the canonical pool of a pair.
//! - **Weight**: stable sort by `total_weight`, descending, compared as
//!   decimal strings, then keep the first pool per asset pair.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::domain::{RawPool, RawVolumeList};

/// Default number of pools kept by volume ranking.
pub const DEFAULT_MAX_POOLS: usize = 75;

/// Compares two unsigned decimal strings.
///
/// A longer string is larger; strings of equal length compare byte by byte.
/// Leading zeros are not normalized, so `"0100"` ranks above `"999"`.
#[must_use]
pub fn compare_decimal_strings(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Canonical key of a pool's asset set: sorted denominations, comma-joined.
#[must_use]
pub fn asset_pair_key(pool: &RawPool) -> String {
    let mut denoms = pool.denoms();
    denoms.sort_unstable();
    denoms.join(",")
}

/// How many pools volume ranking keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeCap {
    /// Keep at most this many pools.
    Fixed(usize),
    /// Keep as many pools as the volume document has entries.
    DatasetSize,
}

impl Default for VolumeCap {
    fn default() -> Self {
        Self::Fixed(DEFAULT_MAX_POOLS)
    }
}

/// Strategy that produced a [`RankedPoolList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingStrategy {
    /// Sorted by 7d volume and capped.
    Volume,
    /// Sorted by total weight and deduplicated by asset pair.
    Weight,
}

/// Pools in ranked order.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPoolList {
    strategy: RankingStrategy,
    pools: Vec<RawPool>,
}

impl RankedPoolList {
    /// Strategy that produced this list.
    #[must_use]
    pub fn strategy(&self) -> RankingStrategy {
        self.strategy
    }

    /// Pools, best first.
    #[must_use]
    pub fn pools(&self) -> &[RawPool] {
        &self.pools
    }

    /// Number of ranked pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns `true` if no pool survived ranking.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Consumes the list, returning the pools.
    #[must_use]
    pub fn into_pools(self) -> Vec<RawPool> {
        self.pools
    }
}

/// Orders and deduplicates raw pools.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoolRanker {
    volume_cap: VolumeCap,
}

impl PoolRanker {
    /// Creates a ranker with the given volume cap.
    #[must_use]
    pub const fn new(volume_cap: VolumeCap) -> Self {
        Self { volume_cap }
    }

    /// Ranks `pools` by volume when `volumes` is present, by weight
    /// otherwise.
    #[must_use]
    pub fn rank(&self, pools: Vec<RawPool>, volumes: Option<&RawVolumeList>) -> RankedPoolList {
        match volumes {
            Some(volumes) => self.rank_by_volume(pools, volumes),
            None => Self::rank_by_weight(pools),
        }
    }

    fn rank_by_volume(&self, mut pools: Vec<RawPool>, volumes: &RawVolumeList) -> RankedPoolList {
        let mut volume_by_id: HashMap<&str, f64> = HashMap::with_capacity(volumes.data.len());
        for entry in &volumes.data {
            volume_by_id
                .entry(entry.pool_id.as_str())
                .or_insert(entry.volume_7d);
        }
        let volume_of = |pool: &RawPool| volume_by_id.get(pool.id.as_str()).copied().unwrap_or(0.0);

        pools.sort_by(|a, b| volume_of(b).total_cmp(&volume_of(a)));

        let cap = match self.volume_cap {
            VolumeCap::Fixed(max) => max,
            VolumeCap::DatasetSize => volumes.data.len(),
        };
        pools.truncate(cap);

        RankedPoolList {
            strategy: RankingStrategy::Volume,
            pools,
        }
    }

    fn rank_by_weight(mut pools: Vec<RawPool>) -> RankedPoolList {
        pools.sort_by(|a, b| {
            compare_decimal_strings(b.total_weight_or_zero(), a.total_weight_or_zero())
        });

        let mut seen_pairs = HashSet::new();
        let pools = pools
            .into_iter()
            .filter(|pool| pool.has_tokens() && seen_pairs.insert(asset_pair_key(pool)))
            .collect();

        RankedPoolList {
            strategy: RankingStrategy::Weight,
            pools,
        }
    }
}
