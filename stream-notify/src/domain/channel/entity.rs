//! Channel entity.

use std::collections::HashSet;

use parking_lot::RwLock;
use platforms_status::Platform;

use super::state::{ChannelState, LiveStatus};
use crate::domain::ChannelLink;

/// Opaque chat destination identifier (a Telegram chat id).
pub type ChatId = i64;

/// Identity of a channel: platform plus normalized channel name.
pub type ChannelKey = ChannelLink;

/// One tracked stream.
///
/// The status is replaced as a whole by the monitor and read concurrently by
/// query handling. Subscribers are filled in while the registry is built and
/// never change afterwards.
#[derive(Debug)]
pub struct Channel {
    key: ChannelKey,
    canonical_url: String,
    status: RwLock<Option<LiveStatus>>,
    subscribers: HashSet<ChatId>,
}

impl Channel {
    pub fn new(key: ChannelKey) -> Self {
        let canonical_url = key.canonical_url();
        Self {
            key,
            canonical_url,
            status: RwLock::new(None),
            subscribers: HashSet::new(),
        }
    }

    pub fn key(&self) -> &ChannelKey {
        &self.key
    }

    pub fn platform(&self) -> Platform {
        self.key.platform()
    }

    pub fn identifier(&self) -> &str {
        self.key.identifier()
    }

    pub fn canonical_url(&self) -> &str {
        &self.canonical_url
    }

    /// Last known good status, `None` until the first successful fetch.
    pub fn status(&self) -> Option<LiveStatus> {
        self.status.read().clone()
    }

    pub fn state(&self) -> ChannelState {
        ChannelState::from(self.status.read().as_ref())
    }

    pub fn is_live(&self) -> bool {
        self.state() == ChannelState::Live
    }

    /// Replace the status, returning the one it replaced.
    pub(crate) fn replace_status(&self, status: LiveStatus) -> Option<LiveStatus> {
        self.status.write().replace(status)
    }

    pub fn subscribers(&self) -> impl Iterator<Item = &ChatId> + '_ {
        self.subscribers.iter()
    }

    pub fn has_subscriber(&self, chat_id: ChatId) -> bool {
        self.subscribers.contains(&chat_id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Add subscribers. Returns how many were not already present.
    pub(crate) fn add_subscribers(&mut self, chat_ids: impl IntoIterator<Item = ChatId>) -> usize {
        chat_ids
            .into_iter()
            .filter(|chat_id| self.subscribers.insert(*chat_id))
            .count()
    }
}
