//! Type-safe pool identifier.
//!
//! [`PoolId`] wraps the numeric-string identifier published by the dex.
//! Identifiers may exceed any fixed-width integer, so they stay strings and
//! are ordered with [`compare_decimal_strings`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScraperError;
use crate::pipeline::ranker::compare_decimal_strings;

/// Identifier of a liquidity pool on its dex.
///
/// Holds an unsigned decimal string with no leading zeros (except `"0"`
/// itself). Used as the key of the primary pool registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PoolId(String);

impl PoolId {
    /// Validates and wraps a raw identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidPoolId`] if `raw` is empty, contains
    /// anything but ASCII digits, or has a leading zero.
    pub fn parse(raw: &str) -> Result<Self, ScraperError> {
        let valid = !raw.is_empty()
            && raw.bytes().all(|b| b.is_ascii_digit())
            && (raw == "0" || !raw.starts_with('0'));
        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(ScraperError::InvalidPoolId(raw.to_string()))
        }
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for PoolId {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_decimal_strings(&self.0, &other.0)
    }
}

impl PartialOrd for PoolId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PoolId {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PoolId {
    type Error = ScraperError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PoolId> for String {
    fn from(id: PoolId) -> Self {
        id.0
    }
}
