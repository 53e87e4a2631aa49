//! Pool type classification from the shape of a raw pool.

use crate::domain::{PoolType, RawPool};

/// Derives the economic type of a pool.
///
/// Returns `None` for pools without weighted tokens (e.g. stableswap
/// pools); those are logged so operators can see what was skipped.
#[must_use]
pub fn classify(pool: &RawPool) -> Option<PoolType> {
    let Some(assets) = pool.pool_assets.as_deref().filter(|assets| !assets.is_empty()) else {
        tracing::warn!(
            pool_id = %pool.id,
            type_url = %pool.type_url,
            pool_assets = ?pool.pool_assets,
            pool_params = ?pool.pool_params,
            "pool has unknown pool type"
        );
        return None;
    };

    if pool.pool_params.smooth_weight_change_params.is_some() {
        return Some(PoolType::LiquidityBootstrap);
    }

    let mut weights = assets.iter().map(|asset| asset.weight.as_str());
    let first = weights.next();
    if weights.all(|weight| Some(weight) == first) {
        Some(PoolType::ConstantProduct)
    } else {
        Some(PoolType::Weighted)
    }
}
