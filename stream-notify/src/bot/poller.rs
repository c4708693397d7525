//! Inbound update polling.
//!
//! Long-polls the Bot API for new messages and dispatches recognised
//! commands to the [`NotificationService`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::commands::BotCommand;
use crate::Result;
use crate::notification::NotificationService;
use crate::notification::channels::{TelegramChannel, TelegramUpdate};

/// Pause after a failed poll before trying again.
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Source of inbound updates.
#[async_trait]
pub trait UpdateSource: Send + Sync {
    /// Fetch updates with `update_id >= offset`, waiting for new ones.
    async fn get_updates(&self, offset: i64) -> Result<Vec<TelegramUpdate>>;
}

#[async_trait]
impl UpdateSource for TelegramChannel {
    async fn get_updates(&self, offset: i64) -> Result<Vec<TelegramUpdate>> {
        TelegramChannel::get_updates(self, offset).await
    }
}

/// Long-polling loop over bot updates.
pub struct UpdatePoller {
    source: Arc<dyn UpdateSource>,
    service: Arc<NotificationService>,
    bot_name: String,
}

impl UpdatePoller {
    pub fn new(
        source: Arc<dyn UpdateSource>,
        service: Arc<NotificationService>,
        bot_name: impl Into<String>,
    ) -> Self {
        Self {
            source,
            service,
            bot_name: bot_name.into(),
        }
    }

    /// Poll until `cancellation_token` fires.
    pub async fn run(&self, cancellation_token: CancellationToken) {
        info!("Starting Telegram update polling as @{}", self.bot_name);
        let mut offset: i64 = 0;

        loop {
            let result = tokio::select! {
                _ = cancellation_token.cancelled() => break,
                result = self.source.get_updates(offset) => result,
            };

            match result {
                Ok(updates) => {
                    for update in updates {
                        offset = offset.max(update.update_id + 1);
                        self.handle_update(update).await;
                    }
                }
                Err(e) => {
                    warn!("Telegram getUpdates failed: {}", e);
                    tokio::select! {
                        _ = cancellation_token.cancelled() => break,
                        _ = tokio::time::sleep(POLL_ERROR_BACKOFF) => {}
                    }
                }
            }
        }

        info!("Telegram update polling stopped");
    }

    /// Dispatch one update. Returns the command it carried, if any.
    pub async fn handle_update(&self, update: TelegramUpdate) -> Option<BotCommand> {
        let message = update.message?;
        let chat_id = message.chat.id;
        debug!("Received message in chat {}", chat_id);

        let command = BotCommand::parse(message.text.as_deref()?, &self.bot_name)?;
        match command {
            BotCommand::Status => {
                let sent = self.service.respond_to_query(chat_id).await;
                debug!("Answered /status in chat {} with {} message(s)", chat_id, sent);
            }
            BotCommand::Start | BotCommand::Help => {
                self.service.send_help(chat_id).await;
            }
        }
        Some(command)
    }
}
