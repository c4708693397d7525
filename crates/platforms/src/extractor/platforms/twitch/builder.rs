use std::sync::LazyLock;

use crate::extractor::error::ExtractorError;
use crate::extractor::platform_extractor::{Extractor, PlatformExtractor};
use crate::extractor::platforms::twitch::models::KrakenStream;
use crate::media::MediaInfo;
use crate::platform::Platform;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

pub static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.)?twitch\.tv/([A-Za-z0-9_]+)/?$").unwrap()
});

pub struct Twitch {
    extractor: Extractor,
    has_client_id: bool,
    api_base: String,
}

impl Twitch {
    pub const BASE_URL: &str = "https://twitch.tv";

    const DEFAULT_API_BASE: &str = "https://api.twitch.tv/kraken";

    pub fn new(identifier: String, client: Client, client_id: Option<String>) -> Self {
        let mut extractor = Extractor::new(Platform::Twitch, identifier, client);

        extractor.add_header_typed(reqwest::header::ACCEPT, "application/vnd.twitchtv.v5+json");

        let has_client_id = client_id.is_some();
        if let Some(client_id) = client_id {
            extractor.add_param("client_id", client_id);
        }

        Self {
            extractor,
            has_client_id,
            api_base: Self::DEFAULT_API_BASE.to_string(),
        }
    }

    /// Point the extractor at another API root, e.g. a local test server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub async fn get_live_stream_info(&self) -> Result<MediaInfo, ExtractorError> {
        if !self.has_client_id {
            return Err(ExtractorError::MissingCredential("twitch client id"));
        }

        let url = format!("{}/streams/{}", self.api_base, self.extractor.identifier);
        let body = self.extractor.get_json(&url).await?;
        parse_streams_response(&self.extractor, body)
    }
}

/// Map a kraken `streams` response into a [`MediaInfo`].
///
/// `{"stream": null}` is an offline channel. A body without the `stream` key
/// is not a valid answer and fails.
fn parse_streams_response(extractor: &Extractor, body: Value) -> Result<MediaInfo, ExtractorError> {
    let stream = match body {
        Value::Object(mut map) => map
            .remove("stream")
            .ok_or_else(|| ExtractorError::missing_field("stream"))?,
        other => {
            return Err(ExtractorError::ValidationError(format!(
                "expected a JSON object, got {other}"
            )));
        }
    };

    if stream.is_null() {
        debug!("{} is offline", extractor.identifier);
        return Ok(MediaInfo::offline(
            extractor.channel_url(),
            extractor.identifier.clone(),
        ));
    }

    let stream: KrakenStream = serde_json::from_value(stream)?;
    let artist = stream
        .channel
        .display_name
        .unwrap_or_else(|| extractor.identifier.clone());

    Ok(
        MediaInfo::builder(extractor.channel_url(), stream.channel.status, artist)
            .category_opt((!stream.game.is_empty()).then_some(stream.game))
            .viewer_count(stream.viewers)
            .cover_url(stream.preview.medium)
            .is_live(true)
            .build(),
    )
}

#[async_trait]
impl PlatformExtractor for Twitch {
    fn get_extractor(&self) -> &Extractor {
        &self.extractor
    }

    async fn extract(&self) -> Result<MediaInfo, ExtractorError> {
        let media_info = self.get_live_stream_info().await?;
        Ok(media_info)
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;
    use tracing::Level;

    use super::*;
    use crate::extractor::default_client;

    fn twitch_for(server: &mockito::ServerGuard) -> Twitch {
        Twitch::new(
            "foo".to_string(),
            default_client().unwrap(),
            Some("client-123".to_string()),
        )
        .with_api_base(server.url())
    }

    fn extractor() -> Extractor {
        Extractor::new(Platform::Twitch, "foo_1", default_client().unwrap())
    }

    #[test]
    fn test_null_stream_is_offline() {
        let info = parse_streams_response(&extractor(), json!({ "stream": null })).unwrap();
        assert!(!info.is_live);
        assert_eq!(info.site_url, "https://twitch.tv/foo_1");
        assert_eq!(info.viewer_count, None);
    }

    #[test]
    fn test_live_stream_fields() {
        let body = json!({
            "stream": {
                "game": "Celeste",
                "viewers": 100,
                "channel": { "status": "Any% attempts", "display_name": "Foo_1" },
                "preview": { "medium": "https://static-cdn.jtvnw.net/previews/foo-320x180.jpg" }
            }
        });
        let info = parse_streams_response(&extractor(), body).unwrap();
        assert!(info.is_live);
        assert_eq!(info.title, "Any% attempts");
        assert_eq!(info.artist, "Foo_1");
        assert_eq!(info.category.as_deref(), Some("Celeste"));
        assert_eq!(info.viewer_count, Some(100));
        assert_eq!(
            info.cover_url.as_deref(),
            Some("https://static-cdn.jtvnw.net/previews/foo-320x180.jpg")
        );
    }

    #[test]
    fn test_null_game_and_title_become_empty() {
        let body = json!({
            "stream": {
                "game": null,
                "viewers": 3,
                "channel": { "status": null },
                "preview": { "medium": "https://example.com/p.jpg" }
            }
        });
        let info = parse_streams_response(&extractor(), body).unwrap();
        assert!(info.is_live);
        assert_eq!(info.title, "");
        assert_eq!(info.category, None);
        assert_eq!(info.artist, "foo_1");
    }

    #[test]
    fn test_missing_stream_key_fails() {
        let result = parse_streams_response(&extractor(), json!({ "error": "Bad Request" }));
        assert!(matches!(result, Err(ExtractorError::ValidationError(_))));
    }

    #[test]
    fn test_missing_viewers_fails() {
        let body = json!({
            "stream": {
                "game": "Celeste",
                "channel": { "status": "title" },
                "preview": { "medium": "https://example.com/p.jpg" }
            }
        });
        let result = parse_streams_response(&extractor(), body);
        assert!(matches!(result, Err(ExtractorError::JsonError(_))));
    }

    #[test]
    fn test_non_object_body_fails() {
        let result = parse_streams_response(&extractor(), json!([1, 2, 3]));
        assert!(matches!(result, Err(ExtractorError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_missing_client_id_fails_without_request() {
        let twitch = Twitch::new("foo".to_string(), default_client().unwrap(), None);
        let result = twitch.extract().await;
        assert!(matches!(result, Err(ExtractorError::MissingCredential(_))));
    }

    #[tokio::test]
    async fn test_request_carries_client_id_and_accept_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/streams/foo")
            .match_query(Matcher::UrlEncoded("client_id".into(), "client-123".into()))
            .match_header("accept", "application/vnd.twitchtv.v5+json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"stream":null}"#)
            .create_async()
            .await;

        let info = twitch_for(&server).extract().await.unwrap();
        assert!(!info.is_live);
        assert_eq!(info.site_url, "https://twitch.tv/foo");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_is_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/streams/foo")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("upstream failure")
            .create_async()
            .await;

        let result = twitch_for(&server).extract().await;
        assert!(matches!(result, Err(ExtractorError::HttpError(_))));
    }

    #[tokio::test]
    async fn test_non_json_body_is_json_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/streams/foo")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let result = twitch_for(&server).extract().await;
        assert!(matches!(result, Err(ExtractorError::JsonError(_))));
    }

    #[tokio::test]
    #[ignore]
    async fn test_get_live_stream_info() {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_test_writer()
            .init();
        let client_id = std::env::var("TWITCH_CLIENT_ID").ok();
        let twitch = Twitch::new("shroud".to_string(), default_client().unwrap(), client_id);
        let media_info = twitch.get_live_stream_info().await.unwrap();
        println!("{media_info:?}");
    }
}
