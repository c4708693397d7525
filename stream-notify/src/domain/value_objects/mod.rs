//! Value objects.

mod channel_link;

pub use channel_link::ChannelLink;
