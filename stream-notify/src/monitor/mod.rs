//! Stream Monitor module for detecting live status.
//!
//! The Stream Monitor is responsible for:
//! - Checking the live status of every registered channel on a fixed interval
//! - Driving each channel's Unknown/Offline/Live state
//! - Emitting events for the notification system

mod detector;
mod events;
mod service;

pub use detector::{StatusSource, StreamDetector};
pub use events::{MonitorEvent, MonitorEventBroadcaster};
pub use service::{StreamMonitor, StreamMonitorConfig};
