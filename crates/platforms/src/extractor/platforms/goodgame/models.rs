use serde::Deserialize;
use serde_json::Value;

use crate::extractor::utils::deserialize_null_as_empty;

/// One entry of the `getchannelstatus` response map.
///
/// The `key` field naming the channel is read from the raw entry before this
/// is deserialized.
#[derive(Debug, Deserialize)]
pub struct ChannelStatus {
    /// `Live` while broadcasting, `Dead` otherwise.
    pub status: String,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub games: String,
    /// Sent as a numeric string, occasionally as a number.
    #[serde(default)]
    pub viewers: Option<Value>,
    #[serde(default)]
    pub img: Option<String>,
}
