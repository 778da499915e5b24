//! Session lifecycle notifications

use chrono::{DateTime, Utc};
use evcharge_core::UserProfile;
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn(UserProfile),
    Refreshed { expires_at: DateTime<Utc> },
    /// Credentials were cleared because they could not be renewed
    Terminated { reason: String },
    LoggedOut,
}

#[derive(Clone)]
pub(crate) struct SessionEvents {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    pub(crate) fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    pub(crate) fn emit(&self, event: SessionEvent) {
        // No subscribers is fine
        let _ = self.tx.send(event);
    }
}
