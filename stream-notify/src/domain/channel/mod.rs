//! Channel aggregate.

mod entity;
mod state;

pub use entity::{Channel, ChannelKey, ChatId};
pub use state::{ChannelState, LiveStatus, Transition};
