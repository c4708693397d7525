//! Application configuration.
//!
//! The whole configuration is a single JSON document read from the `CONFIG`
//! environment variable at startup. It is parsed into an immutable
//! [`AppConfig`] that is handed to whichever component needs a piece of it.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::ChatId;
use crate::notification::Language;
use crate::{Error, Result};

/// Environment variable holding the configuration document.
pub const CONFIG_ENV_VAR: &str = "CONFIG";

/// Seconds between two monitor ticks.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;

/// Upper bound for a single channel's status check, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Parsed configuration document.
#[derive(Clone, Deserialize)]
pub struct AppConfig {
    /// Bot username, used to recognise `/command@bot_name`.
    pub bot_name: String,
    /// Telegram Bot API token.
    pub bot_token: String,
    /// Credential for platforms that require one (the Twitch client id).
    #[serde(alias = "twitch_id")]
    pub platform_credential: String,
    /// Channels to track and the chats subscribed to each.
    pub channels: Vec<ChannelEntry>,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Language of outgoing messages.
    #[serde(default)]
    pub language: Language,
}

/// One `channels` entry: a channel link plus subscribed chat ids.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelEntry {
    pub link: String,
    pub chats: Vec<ChatId>,
}

impl AppConfig {
    /// Read and parse the document from [`CONFIG_ENV_VAR`].
    pub fn from_env() -> Result<Self> {
        let raw = std::env::var(CONFIG_ENV_VAR).map_err(|e| {
            Error::config(format!("environment variable {CONFIG_ENV_VAR} is not usable: {e}"))
        })?;
        Self::from_json(&raw)
    }

    /// Parse and validate a configuration document.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(raw)
            .map_err(|e| Error::config(format!("malformed configuration document: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            return Err(Error::config("bot_token cannot be empty"));
        }
        if self.poll_interval_secs == 0 {
            return Err(Error::config("poll_interval_secs must be greater than 0"));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::config("request_timeout_secs must be greater than 0"));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("bot_name", &self.bot_name)
            .field("bot_token", &"<redacted>")
            .field("platform_credential", &"<redacted>")
            .field("channels", &self.channels)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("language", &self.language)
            .finish()
    }
}
