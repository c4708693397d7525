//! Supported streaming platforms.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extractor::platforms::{goodgame, twitch};
use crate::extractor::utils::capture_group_1;

/// A streaming platform that channels can be tracked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitch,
    GoodGame,
}

impl Platform {
    /// Every supported platform, in matching order.
    pub const ALL: [Platform; 2] = [Platform::Twitch, Platform::GoodGame];

    /// Human readable platform name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Twitch => "Twitch",
            Self::GoodGame => "Good Game",
        }
    }

    /// Stable lowercase identifier, used in logs and serialized keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Twitch => "twitch",
            Self::GoodGame => "goodgame",
        }
    }

    /// Regex matching a channel link on this platform. Capture group 1 is the channel name.
    pub fn url_regex(&self) -> &'static LazyLock<Regex> {
        match self {
            Self::Twitch => &twitch::URL_REGEX,
            Self::GoodGame => &goodgame::URL_REGEX,
        }
    }

    /// Canonical public link to a channel page.
    pub fn channel_url(&self, identifier: &str) -> String {
        match self {
            Self::Twitch => format!("{}/{identifier}", twitch::Twitch::BASE_URL),
            Self::GoodGame => format!("{}/channel/{identifier}", goodgame::GoodGame::BASE_URL),
        }
    }

    /// Find the platform a link belongs to and the channel name it points at.
    pub fn match_url(url: &str) -> Option<(Platform, &str)> {
        Self::ALL.into_iter().find_map(|platform| {
            capture_group_1(platform.url_regex(), url).map(|name| (platform, name))
        })
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://twitch.tv/foo_1", Some((Platform::Twitch, "foo_1")))]
    #[case("https://www.twitch.tv/Foo/", Some((Platform::Twitch, "Foo")))]
    #[case("https://goodgame.ru/channel/Miker", Some((Platform::GoodGame, "Miker")))]
    #[case("https://twitch.tv/bad!name", None)]
    #[case("https://goodgame.ru/Miker", None)]
    #[case("https://youtube.com/channel/abc", None)]
    fn test_match_url(#[case] url: &str, #[case] expected: Option<(Platform, &str)>) {
        assert_eq!(Platform::match_url(url), expected);
    }

    #[test]
    fn test_channel_url() {
        assert_eq!(Platform::Twitch.channel_url("foo"), "https://twitch.tv/foo");
        assert_eq!(
            Platform::GoodGame.channel_url("bar"),
            "https://goodgame.ru/channel/bar"
        );
    }

    #[test]
    fn test_channel_url_round_trips_through_regex() {
        for platform in Platform::ALL {
            let url = platform.channel_url("some_name");
            assert_eq!(Platform::match_url(&url), Some((platform, "some_name")));
        }
    }
}
