//! Record and remote node types

use crate::types::{Forest, RecordId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Node type as reported by the tree-metadata service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemoteKind {
    Collection,
    Leaf,
    #[default]
    #[serde(other)]
    Unknown,
}

/// One node of a listing response, as the service serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteNode {
    #[serde(rename = "Uuid")]
    pub uuid: RecordId,
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "Type", default)]
    pub kind: RemoteKind,
    #[serde(rename = "MetaStore", default)]
    pub meta_store: BTreeMap<String, String>,
}

/// Record kind: containers may own children, leaves never do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Container,
    Leaf,
}

impl From<RemoteKind> for RecordKind {
    fn from(kind: RemoteKind) -> Self {
        match kind {
            RemoteKind::Collection => RecordKind::Container,
            RemoteKind::Leaf | RemoteKind::Unknown => RecordKind::Leaf,
        }
    }
}

/// Record: immutable snapshot of one node in the hierarchy
///
/// `children_loaded` separates "no children" from "children not fetched yet";
/// an empty `children` on a container says nothing by itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    pub path: String,
    pub kind: RecordKind,
    pub children: Forest,
    pub children_loaded: bool,
    pub meta_store: BTreeMap<String, String>,
}

impl Record {
    pub fn is_container(&self) -> bool {
        self.kind == RecordKind::Container
    }

    /// True for a container whose children have never been fetched.
    pub fn needs_fetch(&self) -> bool {
        self.is_container() && !self.children_loaded
    }
}
