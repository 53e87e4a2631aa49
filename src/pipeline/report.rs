//! Per-run outcome counts.

use std::fmt;

use serde::Serialize;

use crate::domain::PoolId;

/// Terminal state of one pool in an ingestion pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolOutcome {
    /// Unknown pool type or malformed id; nothing was registered.
    Skipped,
    /// Committed to the primary pool registry.
    Committed,
    /// Dropped because its staking contract was rejected.
    ContractFailed,
    /// Dropped because the pool registry already held its id.
    Duplicate,
    /// Parked in the pending bucket with raw denominations.
    Pending,
}

/// Counts of every pool outcome in one `register_pools` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestionReport {
    /// Pools committed to the primary registry.
    pub committed: usize,
    /// Pools deferred to the pending bucket.
    pub pending: usize,
    /// Pools dropped after a contract rejection.
    pub contract_failed: usize,
    /// Pools dropped as duplicate ids.
    pub duplicates: usize,
    /// Pools skipped before resolution.
    pub skipped: usize,
    /// Ids of the dropped pools, in ranked order.
    pub dropped_ids: Vec<PoolId>,
}

impl IngestionReport {
    /// Records the outcome of one pool.
    pub fn record(&mut self, pool_id: Option<&PoolId>, outcome: PoolOutcome) {
        match outcome {
            PoolOutcome::Skipped => self.skipped += 1,
            PoolOutcome::Committed => self.committed += 1,
            PoolOutcome::Pending => self.pending += 1,
            PoolOutcome::ContractFailed => self.contract_failed += 1,
            PoolOutcome::Duplicate => self.duplicates += 1,
        }
        if matches!(outcome, PoolOutcome::ContractFailed | PoolOutcome::Duplicate)
            && let Some(id) = pool_id
        {
            self.dropped_ids.push(id.clone());
        }
    }

    /// Pools dropped after resolution, for any reason.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.contract_failed + self.duplicates
    }

    /// Every pool seen by the pass.
    #[must_use]
    pub fn total(&self) -> usize {
        self.committed + self.pending + self.dropped() + self.skipped
    }
}

impl fmt::Display for IngestionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} committed, {} pending, {} dropped, {} skipped",
            self.committed,
            self.pending,
            self.dropped(),
            self.skipped
        )
    }
}

/// Counts of every denomination outcome in one `register_assets` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetRegistrationReport {
    /// Denominations newly registered.
    pub registered: usize,
    /// Denominations the registry already knew.
    pub already_known: usize,
    /// Denominations whose lookup or registration failed.
    pub failed: usize,
}

impl AssetRegistrationReport {
    /// Distinct denominations considered.
    #[must_use]
    pub fn total(&self) -> usize {
        self.registered + self.already_known + self.failed
    }
}

impl fmt::Display for AssetRegistrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} registered, {} already known, {} failed",
            self.registered, self.already_known, self.failed
        )
    }
}
