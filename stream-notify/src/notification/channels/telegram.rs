//! Telegram Bot API chat transport.
//!
//! Sends messages via the Telegram Bot API (`POST /bot<token>/sendMessage`)
//! and long-polls inbound messages (`POST /bot<token>/getUpdates`).

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use platforms_status::extractor::{CONNECT_TIMEOUT, install_rustls_provider};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use super::ChatTransport;
use crate::domain::ChatId;
use crate::{Error, Result};

/// Telegram `sendMessage` text limit (UTF-8 characters).
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Extra time the HTTP client waits on top of the long-poll timeout.
const POLL_GRACE: Duration = Duration::from_secs(15);

/// Telegram transport configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Telegram Bot API token.
    pub bot_token: String,
    /// Parse mode for message formatting.
    #[serde(default = "default_parse_mode")]
    pub parse_mode: String,
    /// Bot API endpoint.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Server-side wait of one `getUpdates` call, in seconds.
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,
}

fn default_parse_mode() -> String {
    "HTML".to_string()
}

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout_secs() -> u64 {
    30
}

impl TelegramConfig {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            parse_mode: default_parse_mode(),
            api_base: default_api_base(),
            poll_timeout_secs: default_poll_timeout_secs(),
        }
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("parse_mode", &self.parse_mode)
            .field("api_base", &self.api_base)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish()
    }
}

/// One entry of a `getUpdates` result.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramUpdate {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<TelegramMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramMessage {
    pub message_id: i64,
    pub chat: TelegramChat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramChat {
    pub id: ChatId,
}

/// Envelope of every Bot API response.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// Telegram chat transport.
pub struct TelegramChannel {
    config: TelegramConfig,
    client: Client,
}

impl TelegramChannel {
    /// Create a new Telegram transport.
    pub fn new(config: TelegramConfig) -> Result<Self> {
        install_rustls_provider();
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(Duration::from_secs(config.poll_timeout_secs) + POLL_GRACE)
            .build()
            .map_err(|e| Error::transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.bot_token,
            method
        )
    }

    /// Call a Bot API method and unwrap its `result`.
    async fn call<T: DeserializeOwned>(&self, method: &str, payload: &serde_json::Value) -> Result<T> {
        // reqwest errors carry the URL, which contains the token.
        let response = self
            .client
            .post(self.method_url(method))
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::transport(format!("Telegram {method} request failed: {}", e.without_url())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Telegram {method} body read failed: {}", e.without_url())))?;

        let parsed: ApiResponse<T> = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Telegram {} returned unexpected body: {} - {}", method, status, body);
                return Err(Error::transport(format!(
                    "Telegram {method} failed: {status} ({e})"
                )));
            }
        };

        match parsed {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse { description, .. } => Err(Error::transport(format!(
                "Telegram {} failed: {} - {}",
                method,
                status,
                description.unwrap_or_default()
            ))),
        }
    }

    /// Long-poll for updates with `update_id >= offset`.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<TelegramUpdate>> {
        let payload = json!({
            "offset": offset,
            "timeout": self.config.poll_timeout_secs,
            "allowed_updates": ["message"],
        });
        let updates: Vec<TelegramUpdate> = self.call("getUpdates", &payload).await?;
        if !updates.is_empty() {
            debug!("Received {} Telegram update(s)", updates.len());
        }
        Ok(updates)
    }
}

#[async_trait]
impl ChatTransport for TelegramChannel {
    fn transport_type(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, chat_id: ChatId, text: &str) -> Result<()> {
        let payload = json!({
            "chat_id": chat_id,
            "text": truncate_message(text, TELEGRAM_MESSAGE_LIMIT),
            "parse_mode": self.config.parse_mode,
        });

        let _: serde_json::Value = self.call("sendMessage", &payload).await?;

        debug!("Telegram message sent to chat {}", chat_id);
        Ok(())
    }
}

/// Truncate a message to fit within the Telegram character limit.
fn truncate_message(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let suffix = "\n\n[truncated]";
    let budget = limit - suffix.len();
    let truncated: String = text.chars().take(budget).collect();
    format!("{truncated}{suffix}")
}
