//! Record Locator
//!
//! Depth-first, pre-order lookups over a forest. Identifiers are expected to be
//! unique; if they are not, the first record in pre-order wins.

use crate::tree::Record;

/// Find the record with `id`.
pub fn find<'a>(forest: &'a [Record], id: &str) -> Option<&'a Record> {
    forest.iter().find_map(|record| {
        if record.id == id {
            Some(record)
        } else {
            find(&record.children, id)
        }
    })
}

/// Find the record at `path`.
pub fn find_by_path<'a>(forest: &'a [Record], path: &str) -> Option<&'a Record> {
    forest.iter().find_map(|record| {
        if record.path == path {
            Some(record)
        } else {
            find_by_path(&record.children, path)
        }
    })
}
