//! CLI Tooling
//!
//! Command-line browser over the tree-metadata service. Each invocation loads
//! the root listing, applies the requested expansions or selection, and prints
//! the result.

use crate::config::{BrowserConfig, ConfigLoader};
use crate::controller::{ToggleOutcome, TreeController};
use crate::error::ApiError;
use crate::fetch::{HttpNodeFetcher, MemoryFetcher, NodeFetcher, StaticToken};
use crate::tooling::format::{format_record_text, format_tree_text};
use clap::{Parser, Subcommand};
use futures::future::join_all;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Curate tree - browse archival records lazily
#[derive(Parser)]
#[command(name = "curate-tree")]
#[command(about = "Browse archival records from a tree-metadata service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the user config file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Service base URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Root path whose children form the top level
    #[arg(long)]
    pub root: Option<String>,

    /// Bearer token for the service
    #[arg(long)]
    pub token: Option<String>,

    /// Serve listings from an exported JSON listing instead of the service
    #[arg(long)]
    pub fixture: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the top level of the tree
    Roots,
    /// Expand containers and print the visible tree
    Expand {
        /// Container paths to expand
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Resolve a record and print its metadata
    Show {
        /// Record identifier
        #[arg(long)]
        id: String,
        /// Record path, used when the record is not in the loaded tree
        #[arg(long)]
        path: String,
    },
    /// Print the top level, then again after every scheduled refresh
    Watch {
        /// Stop after this many refresh periods
        #[arg(long)]
        cycles: Option<u32>,
    },
}

/// Resolved configuration plus data source for one invocation.
pub struct CliContext {
    config: BrowserConfig,
    fixture: Option<PathBuf>,
    format: String,
}

impl CliContext {
    /// Merge configuration sources with command-line overrides.
    pub fn new(cli: &Cli) -> Result<Self, ApiError> {
        let mut config = match &cli.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };

        if let Some(endpoint) = &cli.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(root) = &cli.root {
            config.root_path = root.clone();
        }
        if let Some(token) = &cli.token {
            config.access_token = Some(token.clone());
        }
        if let Some(level) = &cli.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            config.logging.format = format.parse()?;
        }
        if let Some(output) = &cli.log_output {
            config.logging.output = output.parse()?;
        }
        if let Some(file) = &cli.log_file {
            config.logging.file = Some(file.clone());
        }
        config.validate()?;

        if cli.format != "text" && cli.format != "json" {
            return Err(ApiError::ConfigError(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                cli.format
            )));
        }

        Ok(Self {
            config,
            fixture: cli.fixture.clone(),
            format: cli.format.clone(),
        })
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Build the fetcher: the fixture when given, otherwise the HTTP service.
    fn fetcher(&self) -> Result<Box<dyn NodeFetcher>, ApiError> {
        if let Some(path) = &self.fixture {
            info!(fixture = %path.display(), "Serving listings from fixture");
            return Ok(Box::new(MemoryFetcher::from_listing_file(path)?));
        }
        let token = self.config.access_token.clone().ok_or_else(|| {
            ApiError::ConfigError(
                "Access token required (use --token, CURATE__ACCESS_TOKEN or access_token in config)"
                    .to_string(),
            )
        })?;
        let fetcher = HttpNodeFetcher::new(
            &self.config.endpoint,
            Arc::new(StaticToken::new(token)),
            Duration::from_secs(self.config.request_timeout_secs),
        )?;
        Ok(Box::new(fetcher))
    }

    fn controller(&self) -> Result<TreeController<Box<dyn NodeFetcher>>, ApiError> {
        Ok(
            TreeController::new(self.fetcher()?, self.config.root_path.clone())
                .with_page(self.config.page()),
        )
    }

    async fn loaded_controller(&self) -> Result<TreeController<Box<dyn NodeFetcher>>, ApiError> {
        let controller = self.controller()?;
        controller.load_roots().await?;
        Ok(controller)
    }

    /// Execute a command and return its printable output.
    ///
    /// `watch` output is collected and returned once its cycles are done; use
    /// [`CliContext::watch`] to print as refreshes happen.
    pub async fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Watch { cycles } => {
                let mut out = String::new();
                self.watch(*cycles, |tree| out.push_str(tree)).await?;
                Ok(out)
            }
            Commands::Roots => {
                let controller = self.loaded_controller().await?;
                self.render_tree(&controller)
            }
            Commands::Expand { paths } => {
                let controller = self.loaded_controller().await?;
                let failures = expand_by_depth(&controller, paths).await;
                let mut out = self.render_tree(&controller)?;
                for (path, err) in failures {
                    out.push_str(&format!("! {}: {}\n", path, err));
                }
                Ok(out)
            }
            Commands::Show { id, path } => {
                let controller = self.loaded_controller().await?;
                let record = controller.select(id, path).await?;
                if self.format == "json" {
                    serde_json::to_string_pretty(&record).map_err(|e| {
                        ApiError::ConfigError(format!("Failed to encode record: {}", e))
                    })
                } else {
                    Ok(format_record_text(&record))
                }
            }
        }
    }

    /// Emit the top level now and after each refresh that reloaded it.
    ///
    /// Runs until `cycles` refresh periods elapsed, or forever without a limit.
    /// A failed refresh is logged and the previous tree stays current.
    pub async fn watch<E>(&self, cycles: Option<u32>, mut emit: E) -> Result<(), ApiError>
    where
        E: FnMut(&str),
    {
        let period = self.config.refresh_interval().ok_or_else(|| {
            ApiError::ConfigError(
                "refresh_interval_secs must be greater than zero to watch".to_string(),
            )
        })?;
        let controller = self.loaded_controller().await?;
        emit(&self.render_tree(&controller)?);

        let mut ticks = interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut elapsed = 0u32;
        while cycles.map_or(true, |limit| elapsed < limit) {
            ticks.tick().await;
            elapsed += 1;
            match controller.refresh_if_stale(period).await {
                Ok(Some(_)) => emit(&self.render_tree(&controller)?),
                Ok(None) => debug!("Root listing still fresh"),
                Err(err) => warn!(error = %err, "Refresh failed; keeping previous tree"),
            }
        }
        Ok(())
    }

    fn render_tree<F: NodeFetcher>(
        &self,
        controller: &TreeController<F>,
    ) -> Result<String, ApiError> {
        let rows = controller.rows();
        if self.format == "json" {
            serde_json::to_string_pretty(&rows)
                .map_err(|e| ApiError::ConfigError(format!("Failed to encode rows: {}", e)))
        } else {
            Ok(format_tree_text(controller.root_path(), &rows))
        }
    }
}

/// Expand `paths` shallowest first; paths of equal depth expand concurrently.
///
/// Returns the paths that failed together with their error.
async fn expand_by_depth<F: NodeFetcher>(
    controller: &TreeController<F>,
    paths: &[String],
) -> Vec<(String, ApiError)> {
    let mut by_depth: BTreeMap<usize, Vec<&String>> = BTreeMap::new();
    for path in paths {
        let depth = path.split('/').filter(|s| !s.is_empty()).count();
        by_depth.entry(depth).or_default().push(path);
    }

    let mut failures = Vec::new();
    for level in by_depth.into_values() {
        let results = join_all(level.iter().map(|path| controller.toggle(path))).await;
        for (path, result) in level.into_iter().zip(results) {
            match result {
                Ok(ToggleOutcome::Collapsed) => {
                    // Listed twice: expand again so the path ends up open.
                    if let Err(err) = controller.toggle(path).await {
                        failures.push((path.clone(), err));
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(path = %path, error = %err, "Expansion failed");
                    failures.push((path.clone(), err));
                }
            }
        }
    }
    failures
}
