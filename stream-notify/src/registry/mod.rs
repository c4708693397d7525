//! Channel registry and subscription binding.
//!
//! The registry is built once at startup from configuration and shared
//! read-only afterwards; only channel statuses change at runtime.

pub mod binder;
mod manager;

pub use binder::build_registry;
pub use manager::ChannelRegistry;
