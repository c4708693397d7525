//! Notification module.
//!
//! Turns monitor events and status queries into chat messages:
//! - Telegram Bot API transport
//! - English and Russian message texts
//! - Fan-out of transitions to every subscribed chat

pub mod channels;
mod messages;
mod service;

pub use channels::{ChatTransport, TelegramChannel, TelegramConfig};
pub use messages::{Language, escape_html};
pub use service::NotificationService;
