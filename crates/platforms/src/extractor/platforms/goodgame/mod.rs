mod builder;
mod models;

pub use builder::GoodGame;
pub use builder::URL_REGEX;
