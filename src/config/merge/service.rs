//! MergeService: orchestrates sources, applies merge policy, deserializes to BrowserConfig.

use crate::config::sources::{environment, file};
use crate::config::BrowserConfig;
use config::ConfigError;
use std::path::Path;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> user file -> explicit file -> environment (highest).
    pub fn load(explicit_file: Option<&Path>) -> Result<BrowserConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = file::add_user_file(builder);
        let builder = match explicit_file {
            Some(path) => file::add_explicit_file(builder, path)?,
            None => builder,
        };
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
