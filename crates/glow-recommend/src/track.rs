//! Fire-and-forget interaction tracking.
//!
//! Tracking feeds the trending and co-purchase signals, but it is
//! best-effort: a failed write must never affect the user-facing
//! response, so failures are logged and swallowed.

use crate::history::{HistoryStore, Interaction};
use std::sync::Arc;
use tracing::warn;

/// Ingests interaction events into the history store.
pub struct InteractionTracker {
    history: Arc<dyn HistoryStore>,
}

impl InteractionTracker {
    pub fn new(history: Arc<dyn HistoryStore>) -> Self {
        Self { history }
    }

    /// Record one event. Never fails the caller.
    pub async fn track(&self, interaction: Interaction) {
        if let Err(err) = self.history.record(interaction).await {
            warn!(error = %err, "interaction tracking failed");
        }
    }
}
