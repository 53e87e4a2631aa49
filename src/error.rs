//! Scraper error types with stable error codes.
//!
//! [`ScraperError`] is the central error type for the crate. Each variant
//! carries a numeric code and is classified as fatal (aborts the current
//! ingestion call) or item-scoped (the offending asset, pool or contract is
//! dropped and the run continues).

use crate::domain::PoolId;

/// Crate-wide result alias.
pub type Result<T, E = ScraperError> = std::result::Result<T, E>;

/// Scraper error enum with error code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category              | Fatal to the run |
/// |-----------|-----------------------|------------------|
/// | 1000–1999 | Transport / decoding  | yes              |
/// | 2000–2999 | Lookup / not found    | no               |
/// | 3000–3999 | Registry conflicts    | no               |
/// | 4000–4999 | Configuration         | yes              |
/// | 5000–5999 | Internal              | yes              |
#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    /// An upstream document could not be fetched.
    #[error("transport failure fetching {url}: {reason}")]
    Transport {
        /// URL that was requested.
        url: String,
        /// Underlying transport error message.
        reason: String,
    },

    /// An upstream document was fetched but did not have the expected shape.
    #[error("failed to decode document from {url}: {source}")]
    Decode {
        /// URL the document came from.
        url: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// One or more denominations are not known to the asset registry.
    #[error("denominations not registered: {}", .0.join(", "))]
    NotFound(Vec<String>),

    /// Native asset metadata could not be looked up for a denomination.
    #[error("asset lookup failed for {denom}: {reason}")]
    AssetLookup {
        /// Denomination that was looked up.
        denom: String,
        /// Why the lookup failed.
        reason: String,
    },

    /// A denomination is already registered under a different asset name.
    #[error("denomination {denom} already registered as {existing}")]
    AssetConflict {
        /// Denomination being registered.
        denom: String,
        /// Name the denomination is already bound to.
        existing: String,
    },

    /// The pool registry already holds a pool with this identifier.
    #[error("pool {0} already registered")]
    DuplicateId(PoolId),

    /// The contract registry already holds an entry under this name.
    #[error("contract {protocol}:{contract} already registered")]
    DuplicateContract {
        /// Protocol (dex) the contract belongs to.
        protocol: String,
        /// Contract name.
        contract: String,
    },

    /// The contract registry rejected an entry.
    #[error("contract registration failed: {0}")]
    ContractRegistration(String),

    /// A raw pool identifier is not an unsigned decimal string.
    #[error("invalid pool id: {0:?}")]
    InvalidPoolId(String),

    /// Configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Internal invariant violated.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ScraperError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Transport { .. } => 1001,
            Self::Decode { .. } => 1002,
            Self::NotFound(_) => 2001,
            Self::AssetLookup { .. } => 2002,
            Self::InvalidPoolId(_) => 2003,
            Self::DuplicateId(_) => 3001,
            Self::DuplicateContract { .. } => 3002,
            Self::ContractRegistration(_) => 3003,
            Self::AssetConflict { .. } => 3004,
            Self::Config(_) => 4001,
            Self::Internal(_) => 5000,
        }
    }

    /// Returns `true` if this error aborts the whole ingestion call rather
    /// than a single asset, pool or contract.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Decode { .. } | Self::Config(_) | Self::Internal(_)
        )
    }

    /// Returns `true` if a contract registry rejected an entry.
    #[must_use]
    pub const fn is_contract_rejection(&self) -> bool {
        matches!(
            self,
            Self::ContractRegistration(_) | Self::DuplicateContract { .. }
        )
    }
}
