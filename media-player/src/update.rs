//! State update requests from entities to the host
//!
//! An entity that learns its device changed calls
//! [`UpdateHandle::schedule_update`]. The host later re-reads every property
//! of that entity and publishes a fresh snapshot. Requests are queued one per
//! call; the host never merges them.

use tokio::sync::mpsc;

/// A request to re-read and publish one entity's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub unique_id: String,
}

/// Handle given to an entity when it is added to the host
#[derive(Debug, Clone)]
pub struct UpdateHandle {
    unique_id: String,
    tx: mpsc::UnboundedSender<UpdateRequest>,
}

impl UpdateHandle {
    pub(crate) fn new(unique_id: String, tx: mpsc::UnboundedSender<UpdateRequest>) -> Self {
        Self { unique_id, tx }
    }

    /// Create a handle over a caller-owned channel
    ///
    /// Lets integrations exercise their update path without a registry.
    pub fn detached(unique_id: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<UpdateRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(unique_id.into(), tx), rx)
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Ask the host to re-read and publish this entity's state
    ///
    /// Safe to call from any thread. Requests sent after the host shut down
    /// are dropped.
    pub fn schedule_update(&self) {
        let request = UpdateRequest {
            unique_id: self.unique_id.clone(),
        };
        if self.tx.send(request).is_err() {
            tracing::debug!("Host stopped, dropping update for {}", self.unique_id);
        }
    }
}
