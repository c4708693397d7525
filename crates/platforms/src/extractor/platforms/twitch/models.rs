use serde::Deserialize;

use crate::extractor::utils::{deserialize_null_as_empty, deserialize_u64_lenient};

/// A running broadcast as returned by `GET /kraken/streams/<channel>`.
#[derive(Debug, Deserialize)]
pub struct KrakenStream {
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub game: String,
    #[serde(deserialize_with = "deserialize_u64_lenient")]
    pub viewers: u64,
    pub channel: KrakenChannel,
    pub preview: KrakenPreview,
}

#[derive(Debug, Deserialize)]
pub struct KrakenChannel {
    /// Broadcast title.
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub status: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KrakenPreview {
    pub medium: String,
}
