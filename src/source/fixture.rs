//! Canned document source for replays and offline runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::JsonSource;
use crate::error::{Result, ScraperError};

/// [`JsonSource`] serving fixed documents by URL.
///
/// Unknown URLs fail like an unreachable host. Every call is counted, so
/// callers can check how often a document was actually fetched.
#[derive(Debug, Default)]
pub struct StaticJsonSource {
    documents: HashMap<String, serde_json::Value>,
    fetches: AtomicUsize,
}

impl StaticJsonSource {
    /// Creates a source serving no documents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `document` at `url`.
    #[must_use]
    pub fn with_document(mut self, url: impl Into<String>, document: serde_json::Value) -> Self {
        self.documents.insert(url.into(), document);
        self
    }

    /// Number of `fetch_json` calls so far, failed ones included.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl JsonSource for StaticJsonSource {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| ScraperError::Transport {
                url: url.to_string(),
                reason: "no document served at this url".to_string(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::RawVolumeList;
    use crate::source::fetch_document;

    #[tokio::test]
    async fn serves_documents_and_counts_fetches() {
        let source = StaticJsonSource::new().with_document("mem://pools", json!({"pools": []}));
        assert!(source.fetch_json("mem://pools").await.is_ok());
        assert!(source.fetch_json("mem://missing").await.is_err());
        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn mismatched_document_is_a_decode_error() {
        let source = StaticJsonSource::new().with_document("mem://volume", json!({"pools": []}));
        let result = fetch_document::<RawVolumeList>(&source, "mem://volume").await;
        let Err(err) = result else {
            panic!("expected decode failure");
        };
        assert_eq!(err.error_code(), 1002);
        assert!(err.is_fatal());
    }
}
