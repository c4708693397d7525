//! Bot command parsing.

/// Commands the bot reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    /// List live channels the chat is subscribed to.
    Status,
    Start,
    Help,
}

impl BotCommand {
    /// Parse a message text.
    ///
    /// Accepts `/cmd` and `/cmd@<bot_name>` followed by optional arguments.
    /// Commands addressed to another bot, unknown commands and plain text
    /// yield `None`.
    pub fn parse(text: &str, bot_name: &str) -> Option<Self> {
        let token = text.trim_start().split_whitespace().next()?;
        let token = token.strip_prefix('/')?;

        let (name, target) = match token.split_once('@') {
            Some((name, target)) => (name, Some(target)),
            None => (token, None),
        };
        if let Some(target) = target {
            let bot_name = bot_name.trim_start_matches('@');
            if !target.eq_ignore_ascii_case(bot_name) {
                return None;
            }
        }

        match name.to_ascii_lowercase().as_str() {
            "status" => Some(Self::Status),
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            _ => None,
        }
    }
}
