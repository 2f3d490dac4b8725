//! Data-fetch collaborator
//!
//! The controller only talks to the tree-metadata service through
//! [`NodeFetcher`]. Transport, headers and credentials belong to the
//! implementation, which is injected at construction time.

pub mod http;
pub mod memory;
pub mod wire;

use crate::error::FetchError;
use crate::types::Page;
use async_trait::async_trait;

pub use http::HttpNodeFetcher;
pub use memory::MemoryFetcher;
pub use wire::{NodeListing, NodeStatsRequest};

/// Listing access to the tree-metadata service.
#[async_trait]
pub trait NodeFetcher: Send + Sync {
    /// Fetch nodes matching any of `path_patterns`.
    ///
    /// A pattern ending in `/*` lists the direct children of that path; a
    /// plain path lists the node itself.
    async fn fetch_nodes(
        &self,
        path_patterns: &[String],
        page: Page,
    ) -> Result<NodeListing, FetchError>;
}

#[async_trait]
impl<T: NodeFetcher + ?Sized> NodeFetcher for Box<T> {
    async fn fetch_nodes(
        &self,
        path_patterns: &[String],
        page: Page,
    ) -> Result<NodeListing, FetchError> {
        (**self).fetch_nodes(path_patterns, page).await
    }
}

#[async_trait]
impl<T: NodeFetcher + ?Sized> NodeFetcher for std::sync::Arc<T> {
    async fn fetch_nodes(
        &self,
        path_patterns: &[String],
        page: Page,
    ) -> Result<NodeListing, FetchError> {
        (**self).fetch_nodes(path_patterns, page).await
    }
}

/// Source of the bearer token sent with each request.
pub trait TokenSource: Send + Sync {
    fn access_token(&self) -> Result<String, FetchError>;
}

/// Fixed token, e.g. from configuration or the command line.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenSource for StaticToken {
    fn access_token(&self) -> Result<String, FetchError> {
        if self.0.trim().is_empty() {
            return Err(FetchError::Auth("access token is empty".to_string()));
        }
        Ok(self.0.clone())
    }
}
