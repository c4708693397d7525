//! Live status extraction for streaming platforms.
//!
//! Each supported platform has an entry in a static table (see
//! [`extractor::factory`]) that knows how to recognise the platform's channel
//! links and how to build a [`extractor::platform_extractor::PlatformExtractor`]
//! for a channel. Extractors return a normalized [`media::MediaInfo`].

pub mod extractor;
pub mod media;
pub mod platform;

pub use platform::Platform;
