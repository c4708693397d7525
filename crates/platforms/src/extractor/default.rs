use std::sync::OnceLock;
use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use tracing::debug;

use super::error::ExtractorError;

pub(crate) const DEFAULT_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Time allowed to establish a connection to a platform API.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Time allowed between reads of a platform API response.
pub const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Install the process-wide rustls crypto provider once.
pub fn install_rustls_provider() {
    static PROVIDER_INSTALLED: OnceLock<()> = OnceLock::new();
    PROVIDER_INSTALLED.get_or_init(|| {
        if let Err(e) = rustls::crypto::aws_lc_rs::default_provider().install_default() {
            // Another crate got there first.
            debug!(existing_provider = ?e, "rustls CryptoProvider already installed");
        }
    });
}

/// Client builder preconfigured with the user agent and the bounded timeouts
/// every status request must respect.
pub fn create_client_builder() -> ClientBuilder {
    install_rustls_provider();

    Client::builder()
        .user_agent(DEFAULT_UA)
        .connect_timeout(CONNECT_TIMEOUT)
        .read_timeout(READ_TIMEOUT)
}

pub fn default_client() -> Result<Client, ExtractorError> {
    Ok(create_client_builder().build()?)
}
