//! Logging
//!
//! Installs the global `tracing` subscriber. Settings come from the `logging`
//! table of [`BrowserConfig`](crate::config::BrowserConfig); the `CURATE_LOG*`
//! environment variables override them at startup.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const ENV_FILTER: &str = "CURATE_LOG";
const ENV_FORMAT: &str = "CURATE_LOG_FORMAT";
const ENV_OUTPUT: &str = "CURATE_LOG_OUTPUT";
const ENV_FILE: &str = "CURATE_LOG_FILE";
const ENV_MODULES: &str = "CURATE_LOG_MODULES";

/// Event encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ApiError::ConfigError(format!(
                "Invalid log format: {} (expected text or json)",
                other
            ))),
        }
    }
}

/// Where events are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogTarget {
    #[serde(rename = "stdout")]
    Stdout,
    #[default]
    #[serde(rename = "stderr")]
    Stderr,
    #[serde(rename = "file")]
    File,
    #[serde(rename = "file+stderr")]
    FileAndStderr,
    /// stdout and stderr
    #[serde(rename = "both")]
    Both,
}

impl LogTarget {
    fn writes_file(self) -> bool {
        matches!(self, LogTarget::File | LogTarget::FileAndStderr)
    }
}

impl FromStr for LogTarget {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "stdout" => Ok(LogTarget::Stdout),
            "stderr" => Ok(LogTarget::Stderr),
            "file" => Ok(LogTarget::File),
            "file+stderr" => Ok(LogTarget::FileAndStderr),
            "both" => Ok(LogTarget::Both),
            other => Err(ApiError::ConfigError(format!(
                "Invalid log output: {} (expected stdout, stderr, file, file+stderr or both)",
                other
            ))),
        }
    }
}

/// `logging` table of the browser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    /// Base filter level: trace, debug, info, warn, error or off
    pub level: String,
    pub format: LogFormat,
    pub output: LogTarget,
    /// Log file; the platform state directory is used when unset
    pub file: Option<PathBuf>,
    /// ANSI colors for text written to a terminal stream
    pub color: bool,
    /// Per-target levels, e.g. `curate_tree::fetch = "debug"`
    pub modules: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "warn".to_string(),
            format: LogFormat::Text,
            output: LogTarget::Stderr,
            file: None,
            color: true,
            modules: BTreeMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Apply `CURATE_LOG_FORMAT`, `CURATE_LOG_OUTPUT`, `CURATE_LOG_FILE` and
    /// `CURATE_LOG_MODULES` on top of this configuration.
    pub fn with_env_overrides(self) -> Result<Self, ApiError> {
        self.with_overrides(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
    }

    fn with_overrides<L>(mut self, lookup: L) -> Result<Self, ApiError>
    where
        L: Fn(&str) -> Option<String>,
    {
        if let Some(format) = lookup(ENV_FORMAT) {
            self.format = format.parse()?;
        }
        if let Some(output) = lookup(ENV_OUTPUT) {
            self.output = output.parse()?;
        }
        if let Some(file) = lookup(ENV_FILE) {
            self.file = Some(PathBuf::from(file));
        }
        if let Some(modules) = lookup(ENV_MODULES) {
            for entry in modules.split(',') {
                if let Some((module, level)) = entry.split_once('=') {
                    self.modules
                        .insert(module.trim().to_string(), level.trim().to_string());
                }
            }
        }
        Ok(self)
    }

    /// Filter from the base level plus per-module directives.
    fn filter(&self) -> Result<EnvFilter, ApiError> {
        if self.level.trim() == "off" {
            return Ok(EnvFilter::new("off"));
        }
        let base: Directive = self.level.trim().parse().map_err(|e| {
            ApiError::ConfigError(format!("Invalid log level {:?}: {}", self.level, e))
        })?;
        self.modules
            .iter()
            .try_fold(EnvFilter::default().add_directive(base), |filter, (module, level)| {
                Ok(filter.add_directive(module_directive(module, level)?))
            })
    }

    /// The configured file, or `curate-tree.log` under the platform state dir.
    pub fn file_path(&self) -> Result<PathBuf, ApiError> {
        match &self.file {
            Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
            _ => default_log_file(),
        }
    }
}

fn module_directive(module: &str, level: &str) -> Result<Directive, ApiError> {
    format!("{}={}", module.trim(), level.trim())
        .parse()
        .map_err(|e| ApiError::ConfigError(format!("Invalid directive for {}: {}", module, e)))
}

fn default_log_file() -> Result<PathBuf, ApiError> {
    let dirs = directories::ProjectDirs::from("", "curate", "curate-tree").ok_or_else(|| {
        ApiError::ConfigError("No platform directory available for the log file".to_string())
    })?;
    let base = dirs.state_dir().unwrap_or_else(|| dirs.cache_dir());
    Ok(base.join("curate-tree.log"))
}

fn open_log_file(config: &LoggingConfig) -> Result<File, ApiError> {
    let path = config.file_path()?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| {
            ApiError::ConfigError(format!("Cannot create log directory {}: {}", dir.display(), e))
        })?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| ApiError::ConfigError(format!("Cannot open log file {}: {}", path.display(), e)))
}

fn writer_for(config: &LoggingConfig) -> Result<BoxMakeWriter, ApiError> {
    let writer = match config.output {
        LogTarget::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogTarget::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogTarget::Both => BoxMakeWriter::new(std::io::stdout.and(std::io::stderr)),
        LogTarget::File => BoxMakeWriter::new(Mutex::new(open_log_file(config)?)),
        LogTarget::FileAndStderr => {
            BoxMakeWriter::new(Mutex::new(open_log_file(config)?).and(std::io::stderr))
        }
    };
    Ok(writer)
}

/// Install the global subscriber for `config`.
///
/// `CURATE_LOG`, when set, replaces the configured filter entirely. Fails if a
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), ApiError> {
    let config = config.clone().with_env_overrides()?;
    let already = |e: tracing_subscriber::util::TryInitError| {
        ApiError::ConfigError(format!("Logging already initialized: {}", e))
    };

    if !config.enabled {
        return Registry::default()
            .with(EnvFilter::new("off"))
            .try_init()
            .map_err(already);
    }

    let filter = match EnvFilter::try_from_env(ENV_FILTER) {
        Ok(filter) => filter,
        Err(_) => config.filter()?,
    };
    let writer = writer_for(&config)?;
    let registry = Registry::default().with(filter);

    let installed = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color && !config.output.writes_file())
                    .with_writer(writer),
            )
            .try_init(),
    };
    installed.map_err(already)
}
