//! Core types shared by the tree model and the controller.

use crate::tree::Record;

/// RecordId: opaque identifier assigned by the tree-metadata service
pub type RecordId = String;

/// Forest: ordered root-level records
pub type Forest = Vec<Record>;

/// Pagination window passed to the data-fetch collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: 100,
            offset: 0,
        }
    }
}
