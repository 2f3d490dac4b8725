//! Selection events delivered to the detail view.

use crate::tree::Record;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Emitted once a selection resolved to a full record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSelected {
    pub record: Record,
}

/// Consumer of selection events, typically the metadata panel.
pub trait SelectionSink: Send + Sync {
    fn record_selected(&self, event: &RecordSelected);
}

impl SelectionSink for UnboundedSender<RecordSelected> {
    fn record_selected(&self, event: &RecordSelected) {
        if self.send(event.clone()).is_err() {
            debug!(id = %event.record.id, "Selection receiver dropped");
        }
    }
}
