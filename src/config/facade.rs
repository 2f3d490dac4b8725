//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::BrowserConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the user config file and environment.
    pub fn load() -> Result<BrowserConfig, ApiError> {
        let config = MergeService::load(None)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `path` layered over the user config file.
    pub fn load_from_file(path: &Path) -> Result<BrowserConfig, ApiError> {
        let config = MergeService::load(Some(path))?;
        config.validate()?;
        Ok(config)
    }

    /// Create default configuration.
    pub fn default() -> BrowserConfig {
        BrowserConfig::default()
    }
}
