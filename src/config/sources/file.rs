//! File sources: optional user config file and explicit `--config` file.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::{Path, PathBuf};

/// `<platform config dir>/curate-tree/config.toml`, when resolvable.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "curate", "curate-tree")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Layer the user config file; a missing file is skipped.
pub fn add_user_file(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    match user_config_path() {
        Some(path) => builder.add_source(File::from(path).required(false)),
        None => builder,
    }
}

/// Layer an explicitly named file; it must exist.
pub fn add_explicit_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::Message(format!(
            "Config file not found: {}",
            path.display()
        )));
    }
    Ok(builder.add_source(File::from(path).required(true)))
}
