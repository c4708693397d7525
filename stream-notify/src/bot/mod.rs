//! Telegram bot front end: command parsing and the update polling loop.

mod commands;
mod poller;

pub use commands::BotCommand;
pub use poller::{UpdatePoller, UpdateSource};
