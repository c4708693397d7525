//! Channel link value object.

use crate::Error;
use platforms_status::Platform;
use serde::{Deserialize, Serialize};

/// A validated link to a channel on a supported platform.
///
/// Accepts `https://twitch.tv/<name>` and `https://goodgame.ru/channel/<name>`
/// (optionally with `www.` and a trailing slash), where `<name>` consists of
/// ASCII letters, digits and underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelLink {
    platform: Platform,
    identifier: String,
}

impl ChannelLink {
    /// Parse and validate a channel link.
    pub fn parse(url: &str) -> Result<Self, Error> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::invalid_link(url, "link cannot be empty"));
        }

        let (platform, identifier) = Platform::match_url(url)
            .ok_or_else(|| Error::invalid_link(url, "does not match any supported platform"))?;

        Ok(Self::new(platform, identifier))
    }

    /// Build a link from its parts. Channel names are case-insensitive on
    /// every supported platform, so the identifier is stored lowercased.
    pub fn new(platform: Platform, identifier: &str) -> Self {
        Self {
            platform,
            identifier: identifier.to_ascii_lowercase(),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Canonical public link to the channel page.
    pub fn canonical_url(&self) -> String {
        self.platform.channel_url(&self.identifier)
    }
}

impl std::fmt::Display for ChannelLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical_url())
    }
}
