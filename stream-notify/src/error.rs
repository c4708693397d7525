//! Application-wide error types.

use std::time::Duration;

use platforms_status::extractor::error::ExtractorError;
use thiserror::Error;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Application-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid channel link '{link}': {reason}")]
    InvalidChannelLink { link: String, reason: String },

    #[error("Failed to fetch channel status: {0}")]
    Fetch(#[from] ExtractorError),

    #[error("Channel status request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Chat transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn invalid_link(link: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidChannelLink {
            link: link.into(),
            reason: reason.into(),
        }
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}
