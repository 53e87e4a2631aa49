//! Shared naming convention for registry keys derived from pools.

use super::AssetName;

/// Builds the LP token name of a pool: `"{dex}/{assets}"`, where the dex
/// name is lowercased and the asset names are sorted and comma-joined.
///
/// The result does not depend on the order of `assets`.
#[must_use]
pub fn lp_token(dex: &str, assets: &[AssetName]) -> String {
    let mut names: Vec<&str> = assets.iter().map(AssetName::as_str).collect();
    names.sort_unstable();
    format!("{}/{}", dex.to_lowercase(), names.join(","))
}

/// Name of the staking contract attached to an LP token.
#[must_use]
pub fn staking_contract(lp_token: &str) -> String {
    format!("staking/{lp_token}")
}
