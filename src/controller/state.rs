//! Controller-held view state: root load status and per-node expansion.

use crate::types::{Forest, RecordId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::time::Instant;

/// Expansion state of one container, keyed by its path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpansionState {
    #[default]
    Collapsed,
    /// Child listing in flight; further toggles are ignored.
    Expanding,
    Expanded,
    /// Child listing failed; the next toggle retries.
    ExpandFailed,
}

/// Status of the root listing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }
}

pub(crate) struct ControllerState {
    pub(crate) forest: Arc<Forest>,
    pub(crate) load: LoadState,
    pub(crate) selected: Option<RecordId>,
    /// Bumped by every root listing request; only the latest may settle.
    pub(crate) load_generation: u64,
    /// When the forest was last replaced by a successful root listing.
    pub(crate) loaded_at: Option<Instant>,
    expansion: HashMap<String, ExpansionState>,
}

impl ControllerState {
    pub(crate) fn new() -> Self {
        Self {
            forest: Arc::new(Forest::new()),
            load: LoadState::Idle,
            selected: None,
            load_generation: 0,
            loaded_at: None,
            expansion: HashMap::new(),
        }
    }

    /// Start a root listing and return its generation.
    pub(crate) fn begin_load(&mut self) -> u64 {
        self.load_generation += 1;
        self.load = LoadState::Loading;
        self.load_generation
    }

    /// Whether a later root listing was started after `generation`.
    pub(crate) fn is_superseded(&self, generation: u64) -> bool {
        generation != self.load_generation
    }

    pub(crate) fn expansion(&self, path: &str) -> ExpansionState {
        self.expansion.get(path).copied().unwrap_or_default()
    }

    pub(crate) fn set_expansion(&mut self, path: &str, state: ExpansionState) {
        if state == ExpansionState::Collapsed {
            self.expansion.remove(path);
        } else {
            self.expansion.insert(path.to_string(), state);
        }
    }

    /// Forget view state after the forest was rebuilt from a root listing.
    ///
    /// In-flight entries stay so their node keeps ignoring toggles until the
    /// pending fetch settles.
    pub(crate) fn reset_expansion(&mut self) {
        self.expansion
            .retain(|_, state| *state == ExpansionState::Expanding);
    }
}
