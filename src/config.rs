//! Scraper configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ScraperError;
use crate::exchange::OsmosisOptions;
use crate::pipeline::{ContractFailurePolicy, VolumeCap, ranker::DEFAULT_MAX_POOLS};

/// Default gamm pool listing.
pub const DEFAULT_OSMOSIS_POOL_URL: &str =
    "https://lcd.osmosis.zone/osmosis/gamm/v1beta1/pools?pagination.limit=1000";

/// Top-level scraper configuration.
///
/// Loaded once at startup via [`ScraperConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Chain id of the target network (e.g. `osmosis-1`).
    pub network_id: String,

    /// Osmosis gamm pool listing URL.
    pub osmosis_pool_url: String,

    /// Osmosis volume document URL. `None` ranks pools by weight.
    pub osmosis_volume_url: Option<String>,

    /// Pools kept when ranking by volume.
    pub osmosis_max_pools: usize,

    /// Cap volume ranking at the size of the volume dataset instead of
    /// `osmosis_max_pools`.
    pub osmosis_cap_to_volume_dataset: bool,

    /// Abort the run when a staking contract is rejected.
    pub contract_failure_fatal: bool,

    /// Timeout applied to every HTTP request.
    pub http_timeout: Duration,

    /// JSON file mapping denominations to asset names, used to answer
    /// native asset lookups.
    pub asset_metadata_path: Option<PathBuf>,
}

impl ScraperConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is missing or invalid.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Config`] if `NETWORK_ID` or
    /// `OSMOSIS_POOL_URL` is set to an empty value.
    pub fn from_env() -> Result<Self, ScraperError> {
        dotenvy::dotenv().ok();

        let network_id = non_empty_env("NETWORK_ID")?.unwrap_or_else(|| "osmosis-1".to_string());
        let osmosis_pool_url = non_empty_env("OSMOSIS_POOL_URL")?
            .unwrap_or_else(|| DEFAULT_OSMOSIS_POOL_URL.to_string());

        let osmosis_volume_url = std::env::var("OSMOSIS_VOLUME_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let osmosis_max_pools = parse_env("OSMOSIS_MAX_POOLS", DEFAULT_MAX_POOLS);
        let osmosis_cap_to_volume_dataset = parse_env_bool("OSMOSIS_CAP_TO_VOLUME_DATASET", false);
        let contract_failure_fatal = parse_env_bool("CONTRACT_FAILURE_FATAL", false);
        let http_timeout = Duration::from_secs(parse_env("HTTP_TIMEOUT_SECS", 30));

        let asset_metadata_path = std::env::var("ASSET_METADATA_PATH")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            network_id,
            osmosis_pool_url,
            osmosis_volume_url,
            osmosis_max_pools,
            osmosis_cap_to_volume_dataset,
            contract_failure_fatal,
            http_timeout,
            asset_metadata_path,
        })
    }

    /// Options for the Osmosis backend.
    #[must_use]
    pub fn osmosis_options(&self) -> OsmosisOptions {
        let volume_cap = if self.osmosis_cap_to_volume_dataset {
            VolumeCap::DatasetSize
        } else {
            VolumeCap::Fixed(self.osmosis_max_pools)
        };
        let contract_failure = if self.contract_failure_fatal {
            ContractFailurePolicy::Abort
        } else {
            ContractFailurePolicy::DropPool
        };

        let options = OsmosisOptions::new(self.osmosis_pool_url.clone())
            .with_volume_cap(volume_cap)
            .with_contract_failure(contract_failure);
        match &self.osmosis_volume_url {
            Some(url) => options.with_volume_url(url.clone()),
            None => options,
        }
    }
}

/// Reads `key`, rejecting a set-but-blank value.
fn non_empty_env(key: &str) -> Result<Option<String>, ScraperError> {
    match std::env::var(key) {
        Ok(value) if value.trim().is_empty() => {
            Err(ScraperError::Config(format!("{key} is set but empty")))
        }
        Ok(value) => Ok(Some(value)),
        Err(_) => Ok(None),
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key)
        .ok()
        .map(|v| v.trim().to_ascii_lowercase())
        .as_deref()
    {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}
