mod builder;
mod models;

pub use builder::Twitch;
pub use builder::URL_REGEX;
