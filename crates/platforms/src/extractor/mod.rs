pub mod error;
pub mod factory;
pub mod platform_extractor;
pub mod platforms;
pub mod utils;
mod default;

pub use default::{
    CONNECT_TIMEOUT, READ_TIMEOUT, create_client_builder, default_client, install_rustls_provider,
};
