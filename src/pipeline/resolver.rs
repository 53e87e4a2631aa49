//! Asset resolution against the network's asset registry.

use std::collections::HashSet;

use futures_util::future::join_all;

use crate::domain::{AssetEntry, AssetName};
use crate::error::{Result, ScraperError};
use crate::pipeline::report::AssetRegistrationReport;
use crate::registry::{AssetRegistry, NetworkContext};

/// Outcome of resolving all denominations of a pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Every denomination resolved; names are in input order.
    Resolved(Vec<AssetName>),
    /// At least one denomination is unknown. Carries the unknown ones.
    Missing(Vec<String>),
}

/// Outcome of registering a single denomination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetRegistration {
    /// The registry already knew the denomination; nothing was looked up.
    AlreadyKnown,
    /// The denomination was looked up and registered.
    Registered(AssetEntry),
}

/// Maps denominations to canonical names, all or nothing.
#[derive(Debug, Clone, Copy)]
pub struct AssetResolver<'a> {
    network: &'a dyn NetworkContext,
}

impl<'a> AssetResolver<'a> {
    /// Creates a resolver over the network's asset registry.
    #[must_use]
    pub fn new(network: &'a dyn NetworkContext) -> Self {
        Self { network }
    }

    fn registry(&self) -> &'a dyn AssetRegistry {
        self.network.asset_registry()
    }

    /// Resolves every denomination of a pool.
    ///
    /// An unknown denomination yields [`Resolution::Missing`], never a
    /// partial mapping.
    ///
    /// # Errors
    ///
    /// Propagates any registry error other than `NotFound`, and returns
    /// [`ScraperError::Internal`] if the registry answers with the wrong
    /// number of names.
    pub async fn resolve_all(&self, denoms: &[&str]) -> Result<Resolution> {
        match self.registry().names_by_denoms(denoms).await {
            Ok(names) if names.len() == denoms.len() => Ok(Resolution::Resolved(names)),
            Ok(names) => Err(ScraperError::Internal(format!(
                "asset registry resolved {} names for {} denominations",
                names.len(),
                denoms.len()
            ))),
            Err(ScraperError::NotFound(missing)) => Ok(Resolution::Missing(missing)),
            Err(err) => Err(err),
        }
    }

    /// Registers `denom` from chain metadata unless it is already known.
    ///
    /// # Errors
    ///
    /// Returns the network's lookup or registration error.
    pub async fn register_if_absent(&self, denom: &str) -> Result<AssetRegistration> {
        if self.registry().has_denom(denom).await {
            return Ok(AssetRegistration::AlreadyKnown);
        }
        let entry = self.network.register_native_asset(denom).await?;
        Ok(AssetRegistration::Registered(entry))
    }

    /// Registers every distinct denomination concurrently.
    ///
    /// A failing denomination is logged and counted; it never stops the
    /// others. Completion order is unspecified.
    pub async fn register_all<'d>(
        &self,
        denoms: impl IntoIterator<Item = &'d str>,
    ) -> AssetRegistrationReport {
        let mut seen = HashSet::new();
        let distinct = denoms.into_iter().filter(|denom| seen.insert(*denom));

        let outcomes = join_all(distinct.map(|denom| async move {
            (denom, self.register_if_absent(denom).await)
        }))
        .await;

        let mut report = AssetRegistrationReport::default();
        for (denom, outcome) in outcomes {
            match outcome {
                Ok(AssetRegistration::AlreadyKnown) => report.already_known += 1,
                Ok(AssetRegistration::Registered(entry)) => {
                    tracing::debug!(denom, name = %entry.name, "asset registered");
                    report.registered += 1;
                }
                Err(err) => {
                    tracing::warn!(denom, error = %err, "couldn't register asset");
                    report.failed += 1;
                }
            }
        }
        report
    }
}
