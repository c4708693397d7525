use super::error::ExtractorError;
use super::platform_extractor::PlatformExtractor;
use crate::extractor::platforms::{goodgame::GoodGame, twitch::Twitch};
use crate::platform::Platform;
use reqwest::Client;

// A type alias for a thread-safe constructor function.
type ExtractorConstructor = fn(String, Client, Option<String>) -> Box<dyn PlatformExtractor>;

struct PlatformEntry {
    platform: Platform,
    constructor: ExtractorConstructor,
}

macro_rules! platform_registry {
    ( $( $platform:path => $builder:path ),+ $(,)? ) => {
        &[
            $(
                PlatformEntry {
                    platform: $platform,
                    constructor: |identifier, client, credential| {
                        Box::new($builder(identifier, client, credential))
                            as Box<dyn PlatformExtractor>
                    },
                },
            )+
        ]
    };
}

// Static platform registry.
static PLATFORMS: &[PlatformEntry] = platform_registry![
    Platform::Twitch => Twitch::new,
    Platform::GoodGame => GoodGame::new,
];

/// A factory for creating platform-specific extractors.
#[derive(Debug, Clone)]
pub struct ExtractorFactory {
    client: Client,
    /// Credential passed to platforms whose API requires one (Twitch client id).
    credential: Option<String>,
}

impl ExtractorFactory {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            credential: None,
        }
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        let credential = credential.into();
        self.credential = (!credential.is_empty()).then_some(credential);
        self
    }

    pub fn create_extractor(
        &self,
        platform: Platform,
        identifier: &str,
    ) -> Result<Box<dyn PlatformExtractor>, ExtractorError> {
        PLATFORMS
            .iter()
            .find(|entry| entry.platform == platform)
            .map(|entry| {
                (entry.constructor)(
                    identifier.to_string(),
                    self.client.clone(),
                    self.credential.clone(),
                )
            })
            .ok_or(ExtractorError::UnsupportedExtractor)
    }
}
