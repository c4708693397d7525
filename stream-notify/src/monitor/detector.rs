//! Individual stream detection.
//!
//! Turns a platform adapter result into a [`LiveStatus`] for one channel.

use async_trait::async_trait;
use platforms_status::extractor::factory::ExtractorFactory;
use tracing::debug;

use crate::Result;
use crate::domain::{ChannelKey, LiveStatus};

/// Source of channel statuses.
///
/// The monitor only sees this seam, so it can be driven without the network.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch the current status of one channel.
    async fn fetch_status(&self, key: &ChannelKey) -> Result<LiveStatus>;
}

/// Stream detector backed by the platform extractors.
#[derive(Debug, Clone)]
pub struct StreamDetector {
    extractor_factory: ExtractorFactory,
}

impl StreamDetector {
    pub fn new(extractor_factory: ExtractorFactory) -> Self {
        Self { extractor_factory }
    }
}

#[async_trait]
impl StatusSource for StreamDetector {
    async fn fetch_status(&self, key: &ChannelKey) -> Result<LiveStatus> {
        debug!("Checking status for channel: {}", key);

        let extractor = self
            .extractor_factory
            .create_extractor(key.platform(), key.identifier())?;
        let media_info = extractor.extract().await?;

        debug!(
            "Channel {} is {}",
            key,
            if media_info.is_live { "LIVE" } else { "OFFLINE" }
        );
        Ok(LiveStatus::from(media_info))
    }
}
