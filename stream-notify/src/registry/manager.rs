//! Channel registry implementation.

use std::collections::HashMap;

use platforms_status::Platform;
use tracing::debug;

use crate::domain::{Channel, ChannelKey, ChannelLink, ChatId};

/// Identity-keyed collection of every tracked channel.
///
/// Owns all `Channel` entities. Other components borrow them for reading;
/// the only runtime mutation is the monitor replacing a channel's status.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: HashMap<ChannelKey, Channel>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Binding ==========

    /// Resolve or create the channel for `(platform, identifier)` and
    /// subscribe `chat_ids` to it. Re-adding a known chat is a no-op.
    pub fn bind(
        &mut self,
        platform: Platform,
        identifier: &str,
        chat_ids: impl IntoIterator<Item = ChatId>,
    ) -> &Channel {
        self.bind_link(ChannelLink::new(platform, identifier), chat_ids)
    }

    /// Same as [`bind`](Self::bind) for an already parsed link.
    pub fn bind_link(
        &mut self,
        link: ChannelLink,
        chat_ids: impl IntoIterator<Item = ChatId>,
    ) -> &Channel {
        let channel = self
            .channels
            .entry(link.clone())
            .or_insert_with(|| Channel::new(link));
        let added = channel.add_subscribers(chat_ids);
        debug!(
            "Bound {} new chat(s) to {} ({} total)",
            added,
            channel.key(),
            channel.subscriber_count()
        );
        channel
    }

    // ========== Query Operations ==========

    pub fn get(&self, key: &ChannelKey) -> Option<&Channel> {
        self.channels.get(key)
    }

    /// All channels, in no particular order.
    pub fn channels(&self) -> impl Iterator<Item = &Channel> + '_ {
        self.channels.values()
    }

    pub fn keys(&self) -> Vec<ChannelKey> {
        self.channels.keys().cloned().collect()
    }

    /// Live channels that `chat_id` is subscribed to.
    pub fn live_channels_for(&self, chat_id: ChatId) -> Vec<&Channel> {
        self.channels
            .values()
            .filter(|channel| channel.has_subscriber(chat_id) && channel.is_live())
            .collect()
    }

    // ========== Statistics ==========

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.channels.values().filter(|c| c.is_live()).count()
    }
}
