//! HTTP implementation of [`NodeFetcher`] for the tree-stats endpoint.

use super::wire::{NodeListing, NodeStatsRequest};
use super::{NodeFetcher, TokenSource};
use crate::error::{ApiError, FetchError};
use crate::types::Page;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const STATS_ROUTE: &str = "/a/tree/stats";

/// Fetcher posting listing requests to `{endpoint}/a/tree/stats`.
pub struct HttpNodeFetcher {
    client: reqwest::Client,
    url: String,
    tokens: Arc<dyn TokenSource>,
}

impl HttpNodeFetcher {
    pub fn new(
        endpoint: &str,
        tokens: Arc<dyn TokenSource>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: stats_url(endpoint),
            tokens,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn stats_url(endpoint: &str) -> String {
    format!("{}{}", endpoint.trim_end_matches('/'), STATS_ROUTE)
}

#[async_trait]
impl NodeFetcher for HttpNodeFetcher {
    async fn fetch_nodes(
        &self,
        path_patterns: &[String],
        page: Page,
    ) -> Result<NodeListing, FetchError> {
        let token = self.tokens.access_token()?;
        let body = NodeStatsRequest::new(path_patterns, page);
        debug!(url = %self.url, patterns = ?path_patterns, limit = page.limit, offset = page.offset, "Requesting node listing");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Node listing request rejected");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let listing: NodeListing = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        debug!(count = listing.nodes.len(), "Received node listing");
        Ok(listing)
    }
}
