//! Sources of upstream JSON documents.
//!
//! Exchanges fetch their raw listings through [`JsonSource`]. Transport
//! and retry policy belong to the implementation; the pipeline treats any
//! fetch failure as fatal for the current call.

pub mod http;
pub mod fixture;

use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{Result, ScraperError};

pub use fixture::StaticJsonSource;
pub use http::HttpJsonSource;

/// Fetches a JSON document by URL.
#[async_trait]
pub trait JsonSource: Send + Sync + fmt::Debug {
    /// Fetches and parses the document at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Transport`] if the document cannot be
    /// retrieved or is not valid JSON.
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value>;
}

/// Fetches the document at `url` and decodes it into `T`.
///
/// # Errors
///
/// Returns the source's transport error, or [`ScraperError::Decode`] if the
/// document does not match `T`.
pub async fn fetch_document<T>(source: &dyn JsonSource, url: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let value = source.fetch_json(url).await?;
    serde_json::from_value(value).map_err(|source| ScraperError::Decode {
        url: url.to_string(),
        source,
    })
}
