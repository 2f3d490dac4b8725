//! Tree Controller
//!
//! Sole owner of the displayed forest. Drives the root listing, lazy child
//! listings on first expansion, and selection resolution through an injected
//! [`NodeFetcher`]. Each change publishes a new `Arc<Forest>` snapshot; earlier
//! snapshots held by renderers stay valid and unchanged.
//!
//! Operations take `&self` and may be interleaved on one task. The state lock
//! is never held across a fetch.

pub mod events;
pub mod state;

pub use events::{RecordSelected, SelectionSink};
pub use state::{ExpansionState, LoadState};

use crate::error::ApiError;
use crate::fetch::NodeFetcher;
use crate::tree::path::{child_pattern, parent_path, root_pattern};
use crate::tree::{build, find, find_by_path, merge, Record};
use crate::types::{Forest, Page, RecordId};
use crate::views::{visible_rows, TreeRow};
use parking_lot::Mutex;
use state::ControllerState;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Result of a toggle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Children are now visible; `fetched` tells whether a listing was requested.
    Expanded { fetched: bool },
    Collapsed,
    /// A child listing for this node is already in flight; nothing was done.
    InFlight,
    /// Leaves have nothing to expand.
    Leaf,
}

pub struct TreeController<F: NodeFetcher> {
    fetcher: F,
    root_path: String,
    page: Page,
    state: Mutex<ControllerState>,
    sinks: Vec<Arc<dyn SelectionSink>>,
}

impl<F: NodeFetcher> TreeController<F> {
    pub fn new(fetcher: F, root_path: impl Into<String>) -> Self {
        Self {
            fetcher,
            root_path: root_path.into(),
            page: Page::default(),
            state: Mutex::new(ControllerState::new()),
            sinks: Vec::new(),
        }
    }

    /// Use `page` for every listing request.
    pub fn with_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    /// Register a consumer of selection events.
    pub fn subscribe(&mut self, sink: Arc<dyn SelectionSink>) {
        self.sinks.push(sink);
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    /// Current forest snapshot.
    pub fn snapshot(&self) -> Arc<Forest> {
        self.state.lock().forest.clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.state.lock().load.clone()
    }

    pub fn expansion(&self, path: &str) -> ExpansionState {
        self.state.lock().expansion(path)
    }

    pub fn selected_id(&self) -> Option<RecordId> {
        self.state.lock().selected.clone()
    }

    /// Visible rows of the current snapshot.
    pub fn rows(&self) -> Vec<TreeRow> {
        let state = self.state.lock();
        visible_rows(
            &state.forest,
            |path| state.expansion(path),
            state.selected.as_deref(),
        )
    }

    /// Fetch the root listing and replace the forest with it.
    ///
    /// Serves the first load, retries after a failure, and refreshes. On
    /// failure the forest is left as it was and the load state records the
    /// error. When listings overlap only the most recently started one is
    /// applied; an older one settling late changes nothing and yields the
    /// current forest (or its own error).
    pub async fn load_roots(&self) -> Result<Arc<Forest>, ApiError> {
        let generation = self.state.lock().begin_load();
        let patterns = [root_pattern(&self.root_path)];
        info!(root_path = %self.root_path, generation, "Loading root listing");

        let result = self.fetcher.fetch_nodes(&patterns, self.page).await;

        let mut state = self.state.lock();
        if state.is_superseded(generation) {
            debug!(generation, latest = state.load_generation, "Discarding superseded root listing");
            return match result {
                Ok(_) => Ok(state.forest.clone()),
                Err(err) => Err(err.into()),
            };
        }
        match result {
            Ok(listing) => {
                let forest = Arc::new(build(&listing.nodes, &self.root_path));
                info!(roots = forest.len(), "Root listing loaded");
                state.forest = forest.clone();
                state.load = LoadState::Loaded;
                state.loaded_at = Some(Instant::now());
                state.reset_expansion();
                Ok(forest)
            }
            Err(err) => {
                warn!(error = %err, "Root listing failed");
                state.load = LoadState::Failed(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Reload the root listing when the last successful load is at least
    /// `max_age` old, or when none succeeded yet.
    ///
    /// Returns `None` without fetching while a root listing is in flight or
    /// the forest is still fresh.
    pub async fn refresh_if_stale(
        &self,
        max_age: Duration,
    ) -> Result<Option<Arc<Forest>>, ApiError> {
        {
            let state = self.state.lock();
            if state.load == LoadState::Loading {
                debug!("Root listing in flight; skipping refresh");
                return Ok(None);
            }
            if let Some(loaded_at) = state.loaded_at {
                if loaded_at.elapsed() < max_age {
                    return Ok(None);
                }
            }
        }
        self.load_roots().await.map(Some)
    }

    /// Refresh the root listing every `period`, forever.
    ///
    /// The first check happens one `period` from now. Failed refreshes are
    /// logged and leave the forest as it was; the next tick tries again.
    pub async fn refresh_every(&self, period: Duration) {
        let mut ticks = interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticks.tick().await;
            if let Err(err) = self.refresh_if_stale(period).await {
                warn!(error = %err, "Scheduled root refresh failed");
            }
        }
    }

    /// Expand or collapse the container at `path`.
    ///
    /// The first expansion of an unloaded container lists its children and
    /// merges them into the forest. Collapsing keeps loaded children, so the
    /// next expansion is immediate. While a listing is in flight the node
    /// ignores toggles.
    pub async fn toggle(&self, path: &str) -> Result<ToggleOutcome, ApiError> {
        {
            let mut state = self.state.lock();
            let (is_container, needs_fetch) = match find_by_path(&state.forest, path) {
                Some(record) => (record.is_container(), record.needs_fetch()),
                None => return Err(ApiError::RecordNotFound(path.to_string())),
            };
            if !is_container {
                return Ok(ToggleOutcome::Leaf);
            }

            match state.expansion(path) {
                ExpansionState::Expanding => {
                    debug!(path, "Ignoring toggle while children are loading");
                    return Ok(ToggleOutcome::InFlight);
                }
                ExpansionState::Expanded => {
                    state.set_expansion(path, ExpansionState::Collapsed);
                    return Ok(ToggleOutcome::Collapsed);
                }
                ExpansionState::Collapsed | ExpansionState::ExpandFailed => {
                    if !needs_fetch {
                        state.set_expansion(path, ExpansionState::Expanded);
                        return Ok(ToggleOutcome::Expanded { fetched: false });
                    }
                    state.set_expansion(path, ExpansionState::Expanding);
                }
            }
        }

        let patterns = [child_pattern(path)];
        debug!(path, "Fetching children");
        let result = self.fetcher.fetch_nodes(&patterns, self.page).await;

        let mut state = self.state.lock();
        match result {
            Ok(listing) => {
                let children = build(&listing.nodes, path);
                let next = merge(&state.forest, path, &children);
                let present = find_by_path(&next, path).is_some();
                debug!(path, children = children.len(), present, "Merged children");
                state.forest = Arc::new(next);
                settle(&mut state, path, present, ExpansionState::Expanded);
                Ok(ToggleOutcome::Expanded { fetched: true })
            }
            Err(err) => {
                warn!(path, error = %err, "Child listing failed");
                let present = find_by_path(&state.forest, path).is_some();
                settle(&mut state, path, present, ExpansionState::ExpandFailed);
                Err(err.into())
            }
        }
    }

    /// Select the record `id` located at `path` and notify sinks.
    ///
    /// A record missing from the forest is listed on its own and resolved
    /// without being merged into the displayed tree. On failure neither the
    /// selection nor the sinks are touched.
    pub async fn select(&self, id: &str, path: &str) -> Result<Record, ApiError> {
        let local = {
            let state = self.state.lock();
            find(&state.forest, id).cloned()
        };

        let record = match local {
            Some(record) => record,
            None => self.resolve_remote(id, path).await?,
        };

        self.state.lock().selected = Some(id.to_string());
        let event = RecordSelected {
            record: record.clone(),
        };
        for sink in &self.sinks {
            sink.record_selected(&event);
        }
        debug!(id, path = %record.path, "Record selected");
        Ok(record)
    }

    async fn resolve_remote(&self, id: &str, path: &str) -> Result<Record, ApiError> {
        debug!(id, path, "Resolving record outside the loaded forest");
        let patterns = [path.to_string()];
        let listing = self
            .fetcher
            .fetch_nodes(&patterns, self.page)
            .await
            .map_err(|err| {
                warn!(id, path, error = %err, "Record lookup failed");
                ApiError::from(err)
            })?;

        let resolved = build(&listing.nodes, parent_path(path));
        match find(&resolved, id) {
            Some(record) => Ok(record.clone()),
            None => {
                warn!(id, path, "No record with this id at the requested path");
                Err(ApiError::RecordNotFound(format!("{} at {}", id, path)))
            }
        }
    }
}

/// Record the outcome of a child listing; drop state for paths a reload removed.
fn settle(state: &mut ControllerState, path: &str, present: bool, outcome: ExpansionState) {
    if present {
        state.set_expansion(path, outcome);
    } else {
        state.set_expansion(path, ExpansionState::Collapsed);
    }
}
