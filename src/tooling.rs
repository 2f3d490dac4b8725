//! Tooling & Integration Layer
//!
//! Command-line access to the tree browser and its text formatting.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
