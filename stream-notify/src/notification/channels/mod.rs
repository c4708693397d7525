//! Chat transports.
//!
//! Delivery of formatted texts to chats. Telegram is the only transport the
//! bot talks to; the trait keeps the notifier testable without it.

mod telegram;

pub use telegram::{
    TELEGRAM_MESSAGE_LIMIT, TelegramChannel, TelegramChat, TelegramConfig, TelegramMessage,
    TelegramUpdate,
};

use async_trait::async_trait;

use crate::Result;
use crate::domain::ChatId;

/// Trait for chat transports.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Get the transport type name.
    fn transport_type(&self) -> &'static str;

    /// Send an HTML formatted text to one chat.
    async fn send(&self, chat_id: ChatId, text: &str) -> Result<()>;
}
