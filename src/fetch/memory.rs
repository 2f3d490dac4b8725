//! In-memory [`NodeFetcher`] serving a fixed node set.
//!
//! Answers listing patterns the way the tree-stats service does: `path/*`
//! yields the direct children of `path`, a plain path yields that node. Used
//! for offline browsing of an exported listing and in tests.

use super::wire::NodeListing;
use super::NodeFetcher;
use crate::error::{ApiError, FetchError};
use crate::tree::path::parent_path;
use crate::tree::RemoteNode;
use crate::types::Page;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::Path;

pub struct MemoryFetcher {
    nodes: Vec<RemoteNode>,
    calls: Mutex<Vec<Vec<String>>>,
    failures: Mutex<VecDeque<FetchError>>,
}

impl MemoryFetcher {
    pub fn new(nodes: Vec<RemoteNode>) -> Self {
        Self {
            nodes,
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(VecDeque::new()),
        }
    }

    /// Load nodes from a JSON listing as returned by the service.
    pub fn from_listing_file(path: &Path) -> Result<Self, ApiError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ApiError::ConfigError(format!("Failed to read listing {:?}: {}", path, e))
        })?;
        let listing: NodeListing = serde_json::from_str(&raw).map_err(|e| {
            ApiError::ConfigError(format!("Invalid listing {:?}: {}", path, e))
        })?;
        Ok(Self::new(listing.nodes))
    }

    /// Patterns of every request received so far, in order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }

    /// Make the next request fail with `err`. Failures queue up in order.
    pub fn fail_next(&self, err: FetchError) {
        self.failures.lock().push_back(err);
    }

    fn matching(&self, pattern: &str) -> impl Iterator<Item = &RemoteNode> + '_ {
        let children_of = pattern
            .strip_suffix('*')
            .map(|base| base.trim_end_matches('/').to_string());
        let exact = pattern.to_string();
        self.nodes.iter().filter(move |node| match &children_of {
            Some(parent) => parent_path(&node.path) == parent.as_str(),
            None => node.path == exact,
        })
    }
}

#[async_trait]
impl NodeFetcher for MemoryFetcher {
    async fn fetch_nodes(
        &self,
        path_patterns: &[String],
        page: Page,
    ) -> Result<NodeListing, FetchError> {
        self.calls.lock().push(path_patterns.to_vec());
        if let Some(err) = self.failures.lock().pop_front() {
            return Err(err);
        }

        let nodes = path_patterns
            .iter()
            .flat_map(|pattern| self.matching(pattern))
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .cloned()
            .collect();
        Ok(NodeListing { nodes })
    }
}
