//! Contract registry entries.

use serde::{Deserialize, Serialize};

/// A named contract owned by a protocol, e.g. a pool's staking contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEntry {
    /// Protocol (lowercased dex name) owning the contract.
    pub protocol: String,
    /// Contract name, unique within the protocol.
    pub contract: String,
    /// On-chain address or identifier of the contract.
    pub address: String,
}

impl ContractEntry {
    /// Creates a new contract entry.
    #[must_use]
    pub fn new(
        protocol: impl Into<String>,
        contract: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            contract: contract.into(),
            address: address.into(),
        }
    }
}
