//! Curate Tree: Lazily-Loaded Record Browser
//!
//! In-memory model of an archival record hierarchy fetched on demand from a
//! remote tree-metadata service. The `tree` module holds the pure algorithms;
//! `controller` owns the displayed forest and drives fetches through an
//! injected `fetch::NodeFetcher`.

pub mod config;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod views;

pub use controller::{
    ExpansionState, LoadState, RecordSelected, SelectionSink, ToggleOutcome, TreeController,
};
pub use error::{ApiError, FetchError};
pub use fetch::{NodeFetcher, NodeListing};
pub use tree::{Record, RecordKind, RemoteKind, RemoteNode};
pub use types::{Forest, Page, RecordId};
