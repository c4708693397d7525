//! Channel status and the Unknown → Offline ↔ Live state machine.

use std::fmt;

use platforms_status::media::MediaInfo;
use serde::{Deserialize, Serialize};

/// Most recently observed status of a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiveStatus {
    /// Channel is broadcasting.
    Live {
        /// Broadcast title.
        title: String,
        /// Game or category (if reported).
        category: Option<String>,
        /// Viewer count (if reported).
        viewer_count: Option<u64>,
        /// Preview image of the broadcast.
        preview_url: Option<String>,
    },
    /// Channel is not broadcasting.
    Offline,
}

impl LiveStatus {
    /// Check if the status indicates the channel is live.
    pub fn is_live(&self) -> bool {
        matches!(self, LiveStatus::Live { .. })
    }

    /// Get the broadcast title if live.
    pub fn title(&self) -> Option<&str> {
        match self {
            LiveStatus::Live { title, .. } => Some(title),
            LiveStatus::Offline => None,
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            LiveStatus::Live { category, .. } => category.as_deref(),
            LiveStatus::Offline => None,
        }
    }

    pub fn viewer_count(&self) -> Option<u64> {
        match self {
            LiveStatus::Live { viewer_count, .. } => *viewer_count,
            LiveStatus::Offline => None,
        }
    }

    pub fn preview_url(&self) -> Option<&str> {
        match self {
            LiveStatus::Live { preview_url, .. } => preview_url.as_deref(),
            LiveStatus::Offline => None,
        }
    }

    /// The state this status puts a channel in.
    pub fn state(&self) -> ChannelState {
        if self.is_live() {
            ChannelState::Live
        } else {
            ChannelState::Offline
        }
    }
}

impl From<MediaInfo> for LiveStatus {
    fn from(info: MediaInfo) -> Self {
        if !info.is_live {
            return LiveStatus::Offline;
        }
        LiveStatus::Live {
            title: info.title,
            category: info.category,
            viewer_count: info.viewer_count,
            preview_url: info.cover_url,
        }
    }
}

/// Channel state as seen by the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChannelState {
    /// No successful fetch yet.
    #[default]
    Unknown,
    Offline,
    Live,
}

/// A reportable change between two consecutive successful fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    WentLive,
    WentOffline,
}

impl ChannelState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Offline => "OFFLINE",
            Self::Live => "LIVE",
        }
    }

    /// The transition to report when moving from `self` to `next`.
    ///
    /// Leaving `Unknown` only establishes a baseline and is never reported.
    pub fn transition_to(&self, next: ChannelState) -> Option<Transition> {
        use ChannelState::*;
        match (self, next) {
            (Offline, Live) => Some(Transition::WentLive),
            (Live, Offline) => Some(Transition::WentOffline),
            _ => None,
        }
    }
}

impl From<Option<&LiveStatus>> for ChannelState {
    fn from(status: Option<&LiveStatus>) -> Self {
        status.map_or(ChannelState::Unknown, LiveStatus::state)
    }
}

impl fmt::Display for ChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn live() -> LiveStatus {
        LiveStatus::Live {
            title: "Live Title".to_string(),
            category: Some("Gaming".to_string()),
            viewer_count: Some(10),
            preview_url: None,
        }
    }

    #[test]
    fn test_live_status_accessors() {
        let status = live();
        assert!(status.is_live());
        assert_eq!(status.title(), Some("Live Title"));
        assert_eq!(status.category(), Some("Gaming"));
        assert_eq!(status.viewer_count(), Some(10));
        assert_eq!(status.preview_url(), None);

        let offline = LiveStatus::Offline;
        assert!(!offline.is_live());
        assert_eq!(offline.title(), None);
        assert_eq!(offline.viewer_count(), None);
    }

    #[rstest]
    #[case(ChannelState::Unknown, ChannelState::Live, None)]
    #[case(ChannelState::Unknown, ChannelState::Offline, None)]
    #[case(ChannelState::Offline, ChannelState::Offline, None)]
    #[case(ChannelState::Live, ChannelState::Live, None)]
    #[case(ChannelState::Offline, ChannelState::Live, Some(Transition::WentLive))]
    #[case(ChannelState::Live, ChannelState::Offline, Some(Transition::WentOffline))]
    fn test_transition_to(
        #[case] from: ChannelState,
        #[case] to: ChannelState,
        #[case] expected: Option<Transition>,
    ) {
        assert_eq!(from.transition_to(to), expected);
    }

    #[test]
    fn test_state_from_status() {
        assert_eq!(ChannelState::from(None), ChannelState::Unknown);
        assert_eq!(ChannelState::from(Some(&live())), ChannelState::Live);
        assert_eq!(
            ChannelState::from(Some(&LiveStatus::Offline)),
            ChannelState::Offline
        );
    }

    #[test]
    fn test_from_media_info() {
        let info = MediaInfo::builder("https://twitch.tv/foo", "title", "foo")
            .category("Celeste")
            .viewer_count(100)
            .cover_url("https://example.com/p.jpg")
            .is_live(true)
            .build();
        let status = LiveStatus::from(info);
        assert_eq!(
            status,
            LiveStatus::Live {
                title: "title".to_string(),
                category: Some("Celeste".to_string()),
                viewer_count: Some(100),
                preview_url: Some("https://example.com/p.jpg".to_string()),
            }
        );

        let offline = MediaInfo::offline("https://twitch.tv/foo", "foo");
        assert_eq!(LiveStatus::from(offline), LiveStatus::Offline);
    }
}
