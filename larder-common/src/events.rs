//! Session change notifications
//!
//! The identity provider emits a [`SessionEvent`] on every sign-in and
//! sign-out; front ends subscribe to react to the transition.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// Sign-in / sign-out transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    SignedIn { user_id: String },
    SignedOut { user_id: String },
}

/// Broadcast bus for [`SessionEvent`]s
///
/// Cloning shares the underlying channel.
#[derive(Clone)]
pub struct SessionBus {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionBus {
    /// Create a bus buffering up to `capacity` events per slow subscriber
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Receive every event emitted after this call
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Emit an event; having no subscribers is fine.
    pub fn emit_lossy(&self, event: SessionEvent) {
        if self.tx.send(event.clone()).is_err() {
            debug!(?event, "No session subscribers");
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SessionBus {
    fn default() -> Self {
        Self::new(16)
    }
}
