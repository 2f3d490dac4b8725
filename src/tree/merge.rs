//! Tree Merger
//!
//! Splices freshly fetched children under one record of an existing forest.
//! The input forest is never modified; callers receive a new forest value.

use crate::tree::path::is_ancestor;
use crate::tree::Record;
use crate::types::Forest;
use tracing::debug;

/// Return `forest` with the children of the record at `target_path` replaced
/// by `new_children`.
///
/// The target is marked as loaded. When no record has `target_path` the result
/// equals the input: a fetch may finish after a reload removed its target.
pub fn merge(forest: &[Record], target_path: &str, new_children: &[Record]) -> Forest {
    let mut next = forest.to_vec();
    if !splice(&mut next, target_path, new_children) {
        debug!(target_path, "Merge target not in forest; leaving forest unchanged");
    }
    next
}

/// Replace children in place along the ancestor chain of `target_path`.
fn splice(records: &mut [Record], target_path: &str, new_children: &[Record]) -> bool {
    for record in records.iter_mut() {
        if record.path == target_path {
            record.children = new_children.to_vec();
            record.children_loaded = true;
            return true;
        }
        if is_ancestor(&record.path, target_path)
            && splice(&mut record.children, target_path, new_children)
        {
            return true;
        }
    }
    false
}
