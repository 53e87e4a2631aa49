//! HTTP document source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;

use super::JsonSource;
use crate::error::{Result, ScraperError};

/// [`JsonSource`] issuing a single `GET` per document. No retries.
#[derive(Debug, Clone)]
pub struct HttpJsonSource {
    http: HttpClient,
}

impl HttpJsonSource {
    /// Creates a source with the given request timeout.
    ///
    /// Falls back to a default client if the configured one cannot be built.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "failed to build HTTP client, using defaults");
                HttpClient::new()
            });
        Self { http }
    }
}

#[async_trait]
impl JsonSource for HttpJsonSource {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value> {
        let transport = |err: reqwest::Error| ScraperError::Transport {
            url: url.to_string(),
            reason: err.to_string(),
        };

        tracing::debug!(url, "fetching document");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;

        response.json::<serde_json::Value>().await.map_err(transport)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_host_is_a_transport_failure() {
        let source = HttpJsonSource::new(Duration::from_millis(500));
        let result = source.fetch_json("http://127.0.0.1:9/pools").await;
        let Err(err) = result else {
            panic!("expected transport failure");
        };
        assert!(err.is_fatal());
        assert_eq!(err.error_code(), 1001);
    }
}
