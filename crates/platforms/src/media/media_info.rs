use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
/// Normalized status of a channel as reported by a streaming platform.
///
/// Every platform adapter maps its own response shape into this struct, so
/// callers never need to know which platform produced it.
///
/// # Fields
///
/// * `site_url` - The canonical URL of the channel page
/// * `title` - The broadcast title (empty when offline)
/// * `artist` - The channel name as known to the platform
/// * `category` - Game or category of the broadcast, if reported
/// * `viewer_count` - Current number of viewers, if reported
/// * `cover_url` - Preview image of the running broadcast
/// * `is_live` - Whether the channel is broadcasting right now
///
/// # Examples
///
/// ```rust
/// use platforms_status::media::MediaInfo;
///
/// let media = MediaInfo::builder("https://twitch.tv/foo", "Speedrun", "foo")
///     .category("Celeste")
///     .viewer_count(42)
///     .cover_url("https://example.com/preview.jpg")
///     .is_live(true)
///     .build();
///
/// assert!(media.is_live);
/// ```
pub struct MediaInfo {
    pub site_url: String,
    pub title: String,
    pub artist: String,
    pub category: Option<String>,
    pub viewer_count: Option<u64>,
    pub cover_url: Option<String>,
    pub is_live: bool,
}

#[derive(Debug, Clone)]
pub struct MediaInfoBuilder {
    site_url: String,
    title: String,
    artist: String,
    category: Option<String>,
    viewer_count: Option<u64>,
    cover_url: Option<String>,
    is_live: bool,
}

impl MediaInfo {
    pub fn builder(
        site_url: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
    ) -> MediaInfoBuilder {
        MediaInfoBuilder::new(site_url, title, artist)
    }

    /// An offline status for the given channel page.
    pub fn offline(site_url: impl Into<String>, artist: impl Into<String>) -> Self {
        MediaInfoBuilder::new(site_url, "", artist).build()
    }
}

impl MediaInfoBuilder {
    pub fn new(
        site_url: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
    ) -> Self {
        Self {
            site_url: site_url.into(),
            title: title.into(),
            artist: artist.into(),
            category: None,
            viewer_count: None,
            cover_url: None,
            is_live: false,
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn category_opt(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn viewer_count(mut self, viewer_count: u64) -> Self {
        self.viewer_count = Some(viewer_count);
        self
    }

    pub fn cover_url(mut self, cover_url: impl Into<String>) -> Self {
        self.cover_url = Some(cover_url.into());
        self
    }

    pub fn is_live(mut self, is_live: bool) -> Self {
        self.is_live = is_live;
        self
    }

    pub fn build(self) -> MediaInfo {
        MediaInfo {
            site_url: self.site_url,
            title: self.title,
            artist: self.artist,
            category: self.category,
            viewer_count: self.viewer_count,
            cover_url: self.cover_url,
            is_live: self.is_live,
        }
    }
}
