//! Builds the channel registry from configuration.

use platforms_status::Platform;
use tracing::{info, warn};

use super::ChannelRegistry;
use crate::config::{AppConfig, ChannelEntry};
use crate::domain::ChannelLink;
use crate::{Error, Result};

/// Bind every configured channel into a fresh registry.
///
/// The registry is returned only when every entry binds. The first bad link
/// aborts with [`Error::Configuration`] naming the offending entry.
pub fn build_registry(config: &AppConfig) -> Result<ChannelRegistry> {
    let registry = bind_entries(&config.channels)?;

    let needs_credential = registry
        .channels()
        .any(|channel| channel.platform() == Platform::Twitch);
    if needs_credential && config.platform_credential.trim().is_empty() {
        warn!("platform_credential is empty, Twitch channels will fail to update");
    }

    info!(
        "Registry built: {} channel(s) from {} config entr{}",
        registry.len(),
        config.channels.len(),
        if config.channels.len() == 1 { "y" } else { "ies" }
    );
    Ok(registry)
}

/// Bind a list of entries, stopping at the first invalid link.
pub fn bind_entries(entries: &[ChannelEntry]) -> Result<ChannelRegistry> {
    let mut registry = ChannelRegistry::new();
    for (index, entry) in entries.iter().enumerate() {
        let link = ChannelLink::parse(&entry.link)
            .map_err(|e| Error::config(format!("channels[{index}]: {e}")))?;
        registry.bind_link(link, entry.chats.iter().copied());
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(link: &str, chats: &[i64]) -> ChannelEntry {
        ChannelEntry {
            link: link.to_string(),
            chats: chats.to_vec(),
        }
    }

    #[test]
    fn test_duplicate_links_merge() {
        let registry = bind_entries(&[
            entry("https://twitch.tv/foo", &[1, 2]),
            entry("https://www.twitch.tv/Foo/", &[2, 3]),
            entry("https://goodgame.ru/channel/foo", &[4]),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        let twitch = registry
            .get(&ChannelLink::new(Platform::Twitch, "foo"))
            .unwrap();
        assert_eq!(twitch.subscriber_count(), 3);
    }

    #[test]
    fn test_bad_link_aborts_binding() {
        let err = bind_entries(&[
            entry("https://twitch.tv/ok", &[1]),
            entry("https://twitch.tv/bad!name", &[1]),
        ])
        .unwrap_err();

        assert!(matches!(err, Error::Configuration(_)));
        let msg = err.to_string();
        assert!(msg.contains("channels[1]"), "{msg}");
        assert!(msg.contains("bad!name"), "{msg}");
    }

    #[test]
    fn test_build_registry_from_config() {
        let config = AppConfig::from_json(
            r#"{
                "bot_name": "b", "bot_token": "t", "platform_credential": "c",
                "channels": [
                    { "link": "https://twitch.tv/a", "chats": [1] },
                    { "link": "https://goodgame.ru/channel/b", "chats": [] }
                ]
            }"#,
        )
        .unwrap();
        let registry = build_registry(&config).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.channels().all(|c| c.status().is_none()));
    }

    #[test]
    fn test_empty_channel_list_is_valid() {
        assert!(bind_entries(&[]).unwrap().is_empty());
    }
}
