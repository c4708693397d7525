use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::debug;

use super::error::ExtractorError;
use crate::media::MediaInfo;
use crate::platform::Platform;

/// Shared request plumbing for a single channel on a single platform.
///
/// Holds the channel name, the HTTP client and the headers/query parameters
/// that every request to the platform API carries.
#[derive(Debug, Clone)]
pub struct Extractor {
    // channel name on the platform, e.g. "shroud"
    pub identifier: String,
    pub platform: Platform,
    pub client: Client,
    platform_headers: HeaderMap,
    platform_params: Vec<(String, String)>,
}

impl Extractor {
    pub fn new(platform: Platform, identifier: impl Into<String>, client: Client) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static("application/json"),
        );

        Self {
            identifier: identifier.into(),
            platform,
            client,
            platform_headers: default_headers,
            platform_params: Vec::new(),
        }
    }

    /// Canonical link to the channel page.
    pub fn channel_url(&self) -> String {
        self.platform.channel_url(&self.identifier)
    }

    #[inline]
    pub fn add_header_typed(&mut self, key: HeaderName, value: &'static str) {
        self.platform_headers
            .insert(key, HeaderValue::from_static(value));
    }

    pub fn add_param<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.platform_params.push((key.into(), value.into()));
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .headers(self.platform_headers.clone())
            .query(&self.platform_params)
    }

    /// GET `url` and parse the body as JSON. Non-success statuses are errors.
    pub async fn get_json(&self, url: &str) -> Result<Value, ExtractorError> {
        let response: Response = self.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(platform = %self.platform, channel = %self.identifier, "body: {}", body);
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
pub trait PlatformExtractor: Send + Sync {
    fn get_extractor(&self) -> &Extractor;

    /// Fetch the current status of the channel.
    ///
    /// An offline channel is a successful result with `is_live == false`.
    async fn extract(&self) -> Result<MediaInfo, ExtractorError>;
}
