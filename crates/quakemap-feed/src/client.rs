//! HTTP client for the earthquake feed.
//!
//! One GET per fetch, over `reqwest`. No retries: a failed fetch is
//! reported to the caller, which decides whether to keep serving the
//! previous layer.

use std::time::Duration;

use tracing::{debug, info};

use crate::error::FeedError;
use crate::parse::{FeedBatch, parse_feed};

/// Client bound to a single feed URL.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: reqwest::Client,
    url: String,
}

impl FeedClient {
    /// Create a client for `url` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Config`] if the URL is empty or the HTTP client
    /// cannot be constructed.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, FeedError> {
        if url.trim().is_empty() {
            return Err(FeedError::Config(String::from("feed URL is empty")));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quakemap/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FeedError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }

    /// The feed URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the feed and convert it to records.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the request fails,
    /// [`FeedError::Status`] on a non-success response, and
    /// [`FeedError::Decode`] or [`FeedError::Format`] if the body is not a
    /// GeoJSON `FeatureCollection`.
    pub async fn fetch(&self) -> Result<FeedBatch, FeedError> {
        debug!(url = self.url, "Fetching earthquake feed");

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/geo+json, application/json")
            .send()
            .await
            .map_err(|e| FeedError::Http(format!("GET {} failed: {e}", self.url)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(FeedError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FeedError::Http(format!("reading feed body failed: {e}")))?;

        let batch = parse_feed(&bytes)?;
        info!(
            url = self.url,
            records = batch.records.len(),
            skipped = batch.skipped,
            title = batch.title.as_deref().unwrap_or("-"),
            "Earthquake feed fetched"
        );
        Ok(batch)
    }
}
