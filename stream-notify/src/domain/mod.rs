//! Domain layer: channels, their observed status, and channel links.

pub mod channel;
pub mod value_objects;

pub use channel::{Channel, ChannelKey, ChannelState, ChatId, LiveStatus, Transition};
pub use value_objects::ChannelLink;
