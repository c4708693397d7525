//! stream-notify library crate.
//!
//! Watches Twitch and GoodGame channels and tells subscribed Telegram chats
//! when a stream starts or ends.

pub mod bot;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod notification;
pub mod panic_hook;
pub mod registry;

pub use error::{Error, Result};
