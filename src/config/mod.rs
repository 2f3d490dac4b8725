//! Configuration
//!
//! `BrowserConfig` is assembled from built-in defaults, the user config file,
//! an explicit config file and `CURATE__*` environment variables, in that
//! order of increasing precedence.

mod facade;
pub mod merge;
pub mod sources;

pub use facade::ConfigLoader;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::types::Page;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub(crate) const DEFAULT_ENDPOINT: &str = "http://localhost:8080";
pub(crate) const DEFAULT_ROOT_PATH: &str = "appraisal/";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_root_path() -> String {
    DEFAULT_ROOT_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_refresh_interval_secs() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

/// Listing page settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

fn default_limit() -> u32 {
    Page::default().limit
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl From<&PageConfig> for Page {
    fn from(config: &PageConfig) -> Self {
        Page {
            limit: config.limit,
            offset: config.offset,
        }
    }
}

/// Browser configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Base URL of the tree-metadata service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Path whose direct children form the top level of the tree
    #[serde(default = "default_root_path")]
    pub root_path: String,

    /// Bearer token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Per-request timeout of the HTTP fetcher
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Age after which the root listing is reloaded on schedule; 0 disables
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    #[serde(default)]
    pub page: PageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            root_path: default_root_path(),
            access_token: None,
            request_timeout_secs: default_timeout_secs(),
            refresh_interval_secs: default_refresh_interval_secs(),
            page: PageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl BrowserConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ApiError> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ApiError::ConfigError("Endpoint cannot be empty".to_string()));
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ApiError::ConfigError(format!(
                "Endpoint must start with http:// or https://, got {}",
                endpoint
            )));
        }
        if self.page.limit == 0 {
            return Err(ApiError::ConfigError(
                "Page limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn page(&self) -> Page {
        Page::from(&self.page)
    }

    /// Scheduled refresh period, `None` when disabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }
}
