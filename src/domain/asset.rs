//! Canonical asset names and asset registry entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Registry-resolved symbolic name for a token denomination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetName(String);

impl AssetName {
    /// Wraps a canonical asset name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A native asset as recorded by the asset registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Canonical asset name.
    pub name: AssetName,
    /// Chain-native denomination the name stands for.
    pub denom: String,
}

impl AssetEntry {
    /// Creates an entry binding `name` to a native `denom`.
    #[must_use]
    pub fn native(name: AssetName, denom: impl Into<String>) -> Self {
        Self {
            name,
            denom: denom.into(),
        }
    }
}
