//! Source composition for `BrowserConfig`.

mod merge_policy;
pub mod service;
