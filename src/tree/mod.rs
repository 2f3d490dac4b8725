//! Tree Model
//!
//! Pure functions over immutable record forests: building a hierarchy from a
//! flat listing, splicing fetched children into it and locating records.
//! Nothing here performs I/O or holds state between calls.

pub mod builder;
pub mod locate;
pub mod merge;
pub mod node;
pub mod path;

pub use builder::build;
pub use locate::{find, find_by_path};
pub use merge::merge;
pub use node::{Record, RecordKind, RemoteKind, RemoteNode};
