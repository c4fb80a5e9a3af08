//! Cross-tab notification channel.
//!
//! Account-state changes are fanned out to every open session over a
//! broadcast channel. Senders never block and never fail: a trigger with no
//! listening tab is simply discarded.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::settings::Notifier;

/// Account-state changes propagated to other open sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum NotifierEvent {
    /// An account was deleted; other tabs must drop its session.
    Delete { uid: String },
}

/// Notifier backed by a tokio broadcast channel.
pub struct ChannelNotifier {
    tx: broadcast::Sender<NotifierEvent>,
}

impl ChannelNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Attach a listener; each subscriber sees every event triggered after
    /// it subscribed.
    pub fn subscribe(&self) -> broadcast::Receiver<NotifierEvent> {
        self.tx.subscribe()
    }
}

impl Default for ChannelNotifier {
    fn default() -> Self {
        Self::new(16)
    }
}

impl Notifier for ChannelNotifier {
    fn trigger(&self, event: NotifierEvent) {
        // send only errs when no receiver is subscribed
        let _ = self.tx.send(event);
    }
}
