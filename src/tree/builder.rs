//! Hierarchy Builder
//!
//! Converts a flat, path-qualified listing into a forest rooted at a given path.
//! Nodes are placed into an index arena first and assembled into owned records
//! once the whole batch has been seen.

use crate::tree::node::{RecordKind, RemoteNode};
use crate::tree::path::relative_segments;
use crate::tree::Record;
use crate::types::Forest;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Pending record: source node plus arena indices of its children
struct Draft<'a> {
    node: &'a RemoteNode,
    title: &'a str,
    children: Vec<usize>,
}

/// Build a forest from `nodes`, relative to `root_path`.
///
/// A node one segment below `root_path` becomes a root. Deeper nodes attach to
/// the node whose path is their own minus the last segment, but only when that
/// parent appeared earlier in `nodes`; otherwise they are dropped. Empty
/// segments are ignored when matching parents. Children keep
/// listing order.
pub fn build(nodes: &[RemoteNode], root_path: &str) -> Forest {
    let mut arena: Vec<Draft<'_>> = Vec::with_capacity(nodes.len());
    // Keyed by the segments below `root_path`, so `a//b` and `a/b` coincide.
    let mut by_key: HashMap<String, usize> = HashMap::with_capacity(nodes.len());
    let mut roots: Vec<usize> = Vec::new();

    for node in nodes {
        let Some(segments) = relative_segments(&node.path, root_path) else {
            trace!(path = %node.path, root_path, "Skipping node outside root path");
            continue;
        };
        let Some(title) = segments.last().copied() else {
            trace!(path = %node.path, "Skipping node at root path itself");
            continue;
        };

        let index = arena.len();
        let (parent_segments, _) = segments.split_at(segments.len() - 1);
        if parent_segments.is_empty() {
            roots.push(index);
        } else {
            match by_key.get(&parent_segments.join("/")) {
                Some(&parent) => arena[parent].children.push(index),
                None => {
                    debug!(path = %node.path, "Dropping node whose parent is not in the batch");
                    continue;
                }
            }
        }

        arena.push(Draft {
            node,
            title,
            children: Vec::new(),
        });
        by_key.insert(segments.join("/"), index);
    }

    roots.into_iter().map(|index| assemble(&arena, index)).collect()
}

fn assemble(arena: &[Draft<'_>], index: usize) -> Record {
    let draft = &arena[index];
    let children: Forest = draft
        .children
        .iter()
        .map(|&child| assemble(arena, child))
        .collect();
    let kind = RecordKind::from(draft.node.kind);

    Record {
        id: draft.node.uuid.clone(),
        title: draft.title.to_string(),
        path: draft.node.path.clone(),
        kind,
        children_loaded: kind == RecordKind::Leaf || !children.is_empty(),
        children,
        meta_store: draft.node.meta_store.clone(),
    }
}
