//! Wire types of the tree-stats endpoint

use crate::tree::RemoteNode;
use crate::types::Page;
use serde::{Deserialize, Serialize};

/// Request body for `POST /a/tree/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatsRequest {
    #[serde(rename = "NodePaths")]
    pub node_paths: Vec<String>,
    #[serde(rename = "Limit")]
    pub limit: u32,
    #[serde(rename = "Offset")]
    pub offset: u32,
    #[serde(rename = "AllMetaProviders")]
    pub all_meta_providers: bool,
}

impl NodeStatsRequest {
    pub fn new(path_patterns: &[String], page: Page) -> Self {
        Self {
            node_paths: path_patterns.to_vec(),
            limit: page.limit,
            offset: page.offset,
            all_meta_providers: true,
        }
    }
}

/// Listing response. The service omits `Nodes` when nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeListing {
    #[serde(rename = "Nodes", default)]
    pub nodes: Vec<RemoteNode>,
}
