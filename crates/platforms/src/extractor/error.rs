use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("http error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("unsupported extractor")]
    UnsupportedExtractor,
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),
    #[error("streamer not found")]
    StreamerNotFound,
    #[error("validation error: {0}")]
    ValidationError(String),
}

impl ExtractorError {
    /// Shorthand for a response that lacks a field the platform always sends.
    pub fn missing_field(field: &str) -> Self {
        Self::ValidationError(format!("missing field `{field}`"))
    }
}
