use std::sync::LazyLock;

use crate::extractor::error::ExtractorError;
use crate::extractor::platform_extractor::{Extractor, PlatformExtractor};
use crate::extractor::platforms::goodgame::models::ChannelStatus;
use crate::extractor::utils::value_as_u64;
use crate::media::MediaInfo;
use crate::platform::Platform;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

pub static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.)?goodgame\.ru/channel/([A-Za-z0-9_]+)/?$").unwrap()
});

/// Marker GoodGame puts in `status` while a channel is broadcasting.
const LIVE_MARKER: &str = "Live";

pub struct GoodGame {
    extractor: Extractor,
    api_base: String,
}

impl GoodGame {
    pub const BASE_URL: &str = "https://goodgame.ru";

    const DEFAULT_API_BASE: &str = "https://goodgame.ru/api";

    pub fn new(identifier: String, client: Client, _credential: Option<String>) -> Self {
        let mut extractor = Extractor::new(Platform::GoodGame, identifier, client);
        let id = extractor.identifier.clone();
        extractor.add_param("id", id);
        extractor.add_param("fmt", "json");
        Self {
            extractor,
            api_base: Self::DEFAULT_API_BASE.to_string(),
        }
    }

    /// Point the extractor at another API root, e.g. a local test server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub async fn get_live_stream_info(&self) -> Result<MediaInfo, ExtractorError> {
        let url = format!("{}/getchannelstatus", self.api_base);
        let body = self.extractor.get_json(&url).await?;
        parse_channel_status(&self.extractor, body)
    }
}

/// Map a `getchannelstatus` response into a [`MediaInfo`].
///
/// The response is a map of entries keyed by stream id. The entry for the
/// requested channel is picked by its `key` field (or, failing that, by its
/// map key), never by position. Only that entry is deserialized, so a
/// malformed entry for another channel does not matter.
fn parse_channel_status(extractor: &Extractor, body: Value) -> Result<MediaInfo, ExtractorError> {
    let entries = match body {
        Value::Object(map) => map,
        // unknown channels come back as an empty array
        Value::Array(items) if items.is_empty() => return Err(ExtractorError::StreamerNotFound),
        other => {
            return Err(ExtractorError::ValidationError(format!(
                "expected a JSON object, got {other}"
            )));
        }
    };

    let wanted = extractor.identifier.as_str();
    let entry = entries
        .into_iter()
        .find_map(|(map_key, entry)| {
            let matches = entry
                .get("key")
                .and_then(Value::as_str)
                .unwrap_or(&map_key)
                .eq_ignore_ascii_case(wanted);
            matches.then_some(entry)
        })
        .ok_or(ExtractorError::StreamerNotFound)?;
    let status: ChannelStatus = serde_json::from_value(entry)?;

    if !status.status.contains(LIVE_MARKER) {
        debug!("{} is offline ({})", wanted, status.status);
        return Ok(MediaInfo::offline(extractor.channel_url(), wanted));
    }

    let viewers = status
        .viewers
        .as_ref()
        .and_then(value_as_u64)
        .ok_or_else(|| ExtractorError::missing_field("viewers"))?;
    let preview = status
        .img
        .filter(|img| !img.is_empty())
        .ok_or_else(|| ExtractorError::missing_field("img"))?;

    Ok(
        MediaInfo::builder(extractor.channel_url(), status.title, wanted)
            .category_opt((!status.games.is_empty()).then_some(status.games))
            .viewer_count(viewers)
            .cover_url(preview)
            .is_live(true)
            .build(),
    )
}

#[async_trait]
impl PlatformExtractor for GoodGame {
    fn get_extractor(&self) -> &Extractor {
        &self.extractor
    }

    async fn extract(&self) -> Result<MediaInfo, ExtractorError> {
        self.get_live_stream_info().await
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::extractor::default_client;

    fn goodgame_for(server: &mockito::ServerGuard, name: &str) -> GoodGame {
        GoodGame::new(name.to_string(), default_client().unwrap(), None).with_api_base(server.url())
    }

    fn extractor(name: &str) -> Extractor {
        Extractor::new(Platform::GoodGame, name, default_client().unwrap())
    }

    #[test]
    fn test_live_entry() {
        let body = json!({
            "20296": {
                "stream_id": "20296",
                "key": "Miker",
                "status": "Live",
                "title": "Evening stream",
                "games": "Dota 2",
                "viewers": "1337",
                "img": "https://goodgame.ru/files/logotypes/ch_20296.jpg"
            }
        });
        let info = parse_channel_status(&extractor("miker"), body).unwrap();
        assert!(info.is_live);
        assert_eq!(info.title, "Evening stream");
        assert_eq!(info.category.as_deref(), Some("Dota 2"));
        assert_eq!(info.viewer_count, Some(1337));
        assert_eq!(
            info.cover_url.as_deref(),
            Some("https://goodgame.ru/files/logotypes/ch_20296.jpg")
        );
        assert_eq!(info.site_url, "https://goodgame.ru/channel/miker");
    }

    #[test]
    fn test_dead_entry_is_offline() {
        let body = json!({
            "20296": { "key": "Miker", "status": "Dead", "title": "old title", "viewers": "0" }
        });
        let info = parse_channel_status(&extractor("Miker"), body).unwrap();
        assert!(!info.is_live);
        assert!(info.title.is_empty());
        assert_eq!(info.viewer_count, None);
    }

    #[test]
    fn test_numeric_viewers() {
        let body = json!({
            "1": { "key": "abc", "status": "Live", "title": "t", "games": "", "viewers": 9, "img": "https://i/1.jpg" }
        });
        let info = parse_channel_status(&extractor("abc"), body).unwrap();
        assert_eq!(info.viewer_count, Some(9));
        assert_eq!(info.category, None);
    }

    #[test]
    fn test_entry_for_another_channel_is_rejected() {
        let body = json!({
            "1": { "key": "someone_else", "status": "Live", "title": "t", "viewers": "1", "img": "https://i/1.jpg" }
        });
        let result = parse_channel_status(&extractor("abc"), body);
        assert!(matches!(result, Err(ExtractorError::StreamerNotFound)));
    }

    #[test]
    fn test_matching_entry_is_found_among_others() {
        let body = json!({
            "1": { "key": "first", "status": "Dead" },
            "2": { "key": "wanted", "status": "Live", "title": "t", "viewers": "5", "img": "https://i/2.jpg" }
        });
        let info = parse_channel_status(&extractor("wanted"), body).unwrap();
        assert!(info.is_live);
        assert_eq!(info.viewer_count, Some(5));
    }

    #[test]
    fn test_entry_without_key_matches_on_map_key() {
        let body = json!({ "abc": { "status": "Dead" } });
        let info = parse_channel_status(&extractor("abc"), body).unwrap();
        assert!(!info.is_live);
    }

    #[test]
    fn test_empty_array_is_not_found() {
        let result = parse_channel_status(&extractor("abc"), json!([]));
        assert!(matches!(result, Err(ExtractorError::StreamerNotFound)));
    }

    #[test]
    fn test_live_without_viewers_fails() {
        let body = json!({
            "1": { "key": "abc", "status": "Live", "title": "t", "img": "https://i/1.jpg" }
        });
        let result = parse_channel_status(&extractor("abc"), body);
        assert!(matches!(result, Err(ExtractorError::ValidationError(_))));
    }

    #[test]
    fn test_entry_without_status_fails() {
        let body = json!({ "1": { "key": "abc", "title": "t" } });
        let result = parse_channel_status(&extractor("abc"), body);
        assert!(matches!(result, Err(ExtractorError::JsonError(_))));
    }

    #[test]
    fn test_malformed_entry_for_another_channel_is_skipped() {
        let body = json!({
            "1": { "key": "other", "title": "x" },
            "2": { "key": "wanted", "status": "Live", "title": "t", "viewers": "8", "img": "https://i/2.jpg" }
        });
        let info = parse_channel_status(&extractor("wanted"), body).unwrap();
        assert!(info.is_live);
        assert_eq!(info.viewer_count, Some(8));
    }

    #[tokio::test]
    async fn test_request_carries_id_and_format() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/getchannelstatus")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("id".into(), "miker".into()),
                Matcher::UrlEncoded("fmt".into(), "json".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"20296":{"key":"Miker","status":"Dead"}}"#)
            .create_async()
            .await;

        let info = goodgame_for(&server, "miker").extract().await.unwrap();
        assert!(!info.is_live);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_is_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/getchannelstatus")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let result = goodgame_for(&server, "miker").extract().await;
        assert!(matches!(result, Err(ExtractorError::HttpError(_))));
    }

    #[tokio::test]
    async fn test_non_json_body_is_json_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/getchannelstatus")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let result = goodgame_for(&server, "miker").extract().await;
        assert!(matches!(result, Err(ExtractorError::JsonError(_))));
    }
}
