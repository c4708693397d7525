//! Notification service.
//!
//! Fans monitor events out to subscribed chats and answers status queries.
//! Delivery failures are logged and dropped; they never reach the caller.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::channels::ChatTransport;
use super::messages::Language;
use crate::domain::{Channel, ChatId};
use crate::monitor::MonitorEvent;
use crate::registry::ChannelRegistry;

/// The notification service.
pub struct NotificationService {
    transport: Arc<dyn ChatTransport>,
    registry: Arc<ChannelRegistry>,
    language: Language,
}

impl NotificationService {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        registry: Arc<ChannelRegistry>,
        language: Language,
    ) -> Self {
        Self {
            transport,
            registry,
            language,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Announce a transition to every subscriber of the channel.
    ///
    /// Returns the number of messages delivered.
    pub async fn notify_transition(&self, event: &MonitorEvent) -> usize {
        let Some(channel) = self.registry.get(event.key()) else {
            warn!("Dropping event for unregistered channel {}", event.key());
            return 0;
        };

        let text = match event {
            MonitorEvent::ChannelLive { status, .. } => {
                self.language.live_announcement(channel, status)
            }
            MonitorEvent::ChannelOffline { .. } => self.language.offline_announcement(channel),
        };

        let sends = channel
            .subscribers()
            .map(|&chat_id| self.deliver(chat_id, &text));
        let delivered = join_all(sends).await.into_iter().filter(|ok| *ok).count();

        debug!(
            "Announced {:?} for {} to {}/{} chat(s)",
            event.transition(),
            channel.key(),
            delivered,
            channel.subscriber_count()
        );
        delivered
    }

    /// Reply to a status query from `chat_id`.
    ///
    /// Sends one message per live channel the chat is subscribed to, or a
    /// single "no active streams" message. Returns the number delivered.
    pub async fn respond_to_query(&self, chat_id: ChatId) -> usize {
        let replies: Vec<String> = self
            .registry
            .live_channels_for(chat_id)
            .into_iter()
            .filter_map(|channel| self.channel_info(channel))
            .collect();

        if replies.is_empty() {
            return usize::from(self.deliver(chat_id, self.language.no_active_streams()).await);
        }

        let mut delivered = 0;
        for text in &replies {
            if self.deliver(chat_id, text).await {
                delivered += 1;
            }
        }
        delivered
    }

    /// Reply with usage help.
    pub async fn send_help(&self, chat_id: ChatId) -> bool {
        self.deliver(chat_id, self.language.help_text()).await
    }

    fn channel_info(&self, channel: &Channel) -> Option<String> {
        let status = channel.status()?;
        status
            .is_live()
            .then(|| self.language.channel_info(channel, &status))
    }

    async fn deliver(&self, chat_id: ChatId, text: &str) -> bool {
        match self.transport.send(chat_id, text).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "Failed to deliver {} message to chat {}: {}",
                    self.transport.transport_type(),
                    chat_id,
                    e
                );
                false
            }
        }
    }

    /// Spawn a task announcing every event received on `rx`.
    pub fn listen_for_monitor_events(
        self: &Arc<Self>,
        mut rx: broadcast::Receiver<MonitorEvent>,
        cancellation_token: CancellationToken,
    ) -> tokio::task::JoinHandle<()> {
        let service = Arc::clone(self);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancellation_token.cancelled() => {
                        debug!("Monitor event listener shutting down");
                        break;
                    }
                    result = rx.recv() => {
                        match result {
                            Ok(event) => {
                                service.notify_transition(&event).await;
                            }
                            Err(broadcast::error::RecvError::Lagged(count)) => {
                                warn!("Monitor event listener lagged, skipped {} event(s)", count);
                            }
                            Err(broadcast::error::RecvError::Closed) => {
                                info!("Monitor event channel closed");
                                break;
                            }
                        }
                    }
                }
            }
        })
    }
}
