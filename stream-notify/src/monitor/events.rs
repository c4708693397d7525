//! Monitor events for the notification system.
//!
//! Emitted by the [`StreamMonitor`](super::StreamMonitor) whenever a channel
//! flips between offline and live, and consumed by the notifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::domain::{ChannelKey, LiveStatus, Transition};

/// Events emitted by the Stream Monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MonitorEvent {
    /// Channel went live.
    ChannelLive {
        key: ChannelKey,
        /// Status observed by the fetch that detected the transition.
        status: LiveStatus,
        timestamp: DateTime<Utc>,
    },
    /// Channel went offline.
    ChannelOffline {
        key: ChannelKey,
        timestamp: DateTime<Utc>,
    },
}

impl MonitorEvent {
    /// Build the event for `transition` on `key`, stamped now.
    pub fn from_transition(key: ChannelKey, transition: Transition, status: LiveStatus) -> Self {
        let timestamp = Utc::now();
        match transition {
            Transition::WentLive => MonitorEvent::ChannelLive {
                key,
                status,
                timestamp,
            },
            Transition::WentOffline => MonitorEvent::ChannelOffline { key, timestamp },
        }
    }

    pub fn key(&self) -> &ChannelKey {
        match self {
            MonitorEvent::ChannelLive { key, .. } | MonitorEvent::ChannelOffline { key, .. } => key,
        }
    }

    pub fn transition(&self) -> Transition {
        match self {
            MonitorEvent::ChannelLive { .. } => Transition::WentLive,
            MonitorEvent::ChannelOffline { .. } => Transition::WentOffline,
        }
    }

    /// Get a human-readable description of the event.
    pub fn description(&self) -> String {
        match self {
            MonitorEvent::ChannelLive { key, status, .. } => {
                format!(
                    "{} is now live: {}",
                    key,
                    status.title().unwrap_or_default()
                )
            }
            MonitorEvent::ChannelOffline { key, .. } => format!("{} went offline", key),
        }
    }
}

/// Broadcaster for monitor events.
#[derive(Clone)]
pub struct MonitorEventBroadcaster {
    sender: broadcast::Sender<MonitorEvent>,
}

impl MonitorEventBroadcaster {
    /// Create a new broadcaster with default capacity (256).
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MonitorEvent> {
        self.sender.subscribe()
    }

    /// Publish a monitor event.
    ///
    /// Fails only when nobody is subscribed.
    pub fn publish(
        &self,
        event: MonitorEvent,
    ) -> Result<usize, broadcast::error::SendError<MonitorEvent>> {
        self.sender.send(event)
    }
}

impl Default for MonitorEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
