//! Built-in defaults seeded into every config builder.

use crate::config::{
    DEFAULT_ENDPOINT, DEFAULT_REFRESH_INTERVAL_SECS, DEFAULT_ROOT_PATH, DEFAULT_TIMEOUT_SECS,
};
use crate::types::Page;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let page = Page::default();
    Config::builder()
        .set_default("endpoint", DEFAULT_ENDPOINT)?
        .set_default("root_path", DEFAULT_ROOT_PATH)?
        .set_default("request_timeout_secs", DEFAULT_TIMEOUT_SECS)?
        .set_default("refresh_interval_secs", DEFAULT_REFRESH_INTERVAL_SECS)?
        .set_default("page.limit", page.limit as u64)?
        .set_default("page.offset", page.offset as u64)
}
