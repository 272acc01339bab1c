//! Content Fetcher for Simplepin.
//!
//! Retrieves the raw HTML of a page with a single GET request. No retries,
//! no caching and no custom headers.

use std::future::Future;

use log::debug;

use crate::types::errors::FetchError;

/// Trait defining page retrieval.
pub trait ContentFetcher: Send + Sync {
    /// Performs exactly one network request for `url` and returns the body.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// `reqwest`-backed fetcher.
#[derive(Debug, Clone, Default)]
pub struct HttpContentFetcher {
    client: reqwest::Client,
}

impl HttpContentFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fetcher sharing an existing connection pool.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl ContentFetcher for HttpContentFetcher {
    /// The response status is not interpreted; error pages are returned as
    /// text and left to the extractor to reject.
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        debug!("fetched {} ({})", url, response.status());

        response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))
    }
}
