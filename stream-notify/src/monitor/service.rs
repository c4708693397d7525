//! Stream Monitor service implementation.
//!
//! Runs the polling loop: every tick fetches the status of every registered
//! channel concurrently, commits the results and publishes an event for each
//! offline/live flip.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::detector::StatusSource;
use super::events::{MonitorEvent, MonitorEventBroadcaster};
use crate::config::{AppConfig, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::domain::{ChannelKey, ChannelState, LiveStatus};
use crate::registry::ChannelRegistry;
use crate::{Error, Result};

/// Configuration for the stream monitor.
#[derive(Debug, Clone)]
pub struct StreamMonitorConfig {
    /// Pause between the end of one tick and the start of the next.
    pub poll_interval: Duration,
    /// Upper bound for one channel's status check.
    pub check_timeout: Duration,
}

impl Default for StreamMonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            check_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl From<&AppConfig> for StreamMonitorConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            check_timeout: config.request_timeout(),
        }
    }
}

/// The Stream Monitor service.
pub struct StreamMonitor {
    registry: Arc<ChannelRegistry>,
    source: Arc<dyn StatusSource>,
    config: StreamMonitorConfig,
    broadcaster: MonitorEventBroadcaster,
}

impl StreamMonitor {
    pub fn new(
        registry: Arc<ChannelRegistry>,
        source: Arc<dyn StatusSource>,
        config: StreamMonitorConfig,
    ) -> Self {
        Self {
            registry,
            source,
            config,
            broadcaster: MonitorEventBroadcaster::new(),
        }
    }

    /// Subscribe to monitor events.
    pub fn subscribe_events(&self) -> tokio::sync::broadcast::Receiver<MonitorEvent> {
        self.broadcaster.subscribe()
    }

    pub fn registry(&self) -> &Arc<ChannelRegistry> {
        &self.registry
    }

    /// Run ticks until `cancellation_token` fires.
    pub async fn run(&self, cancellation_token: CancellationToken) {
        info!(
            "Stream monitor started: {} channel(s), poll interval {:?}",
            self.registry.len(),
            self.config.poll_interval
        );

        loop {
            tokio::select! {
                _ = cancellation_token.cancelled() => break,
                _ = self.check_all() => {}
            }

            tokio::select! {
                _ = cancellation_token.cancelled() => break,
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }

        info!("Stream monitor stopped");
    }

    /// Perform one tick over every registered channel.
    ///
    /// Each check runs in its own task bounded by the check timeout, so an
    /// error, a hang or a panic in one adapter only costs that channel this
    /// tick. Returns the published events.
    pub async fn check_all(&self) -> Vec<MonitorEvent> {
        let mut tasks = JoinSet::new();
        let mut task_keys = HashMap::new();

        for key in self.registry.keys() {
            let source = Arc::clone(&self.source);
            let check_timeout = self.config.check_timeout;
            let task_key = key.clone();
            let handle = tasks.spawn(async move {
                let result = tokio::time::timeout(check_timeout, source.fetch_status(&task_key))
                    .await
                    .unwrap_or_else(|_| Err(Error::Timeout(check_timeout)));
                (task_key, result)
            });
            task_keys.insert(handle.id(), key);
        }

        let mut events = Vec::new();
        let mut failures = 0usize;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((key, Ok(status))) => {
                    if let Some(event) = self.process_status(&key, status) {
                        events.push(event);
                    }
                }
                Ok((key, Err(e))) => {
                    failures += 1;
                    warn!("Error checking channel {}: {}", key, e);
                }
                Err(e) => {
                    failures += 1;
                    let key = task_keys
                        .get(&e.id())
                        .map(ToString::to_string)
                        .unwrap_or_else(|| "<unknown>".to_string());
                    warn!("Status check for {} did not complete: {}", key, e);
                }
            }
        }

        debug!(
            "Tick complete: {} channel(s), {} transition(s), {} failure(s)",
            self.registry.len(),
            events.len(),
            failures
        );
        events
    }

    /// Commit a freshly fetched status and publish the transition, if any.
    ///
    /// The first successful fetch only sets the baseline.
    pub fn process_status(&self, key: &ChannelKey, status: LiveStatus) -> Option<MonitorEvent> {
        let Some(channel) = self.registry.get(key) else {
            debug!("Ignoring status for unregistered channel {}", key);
            return None;
        };

        let next_state = status.state();
        let previous = channel.replace_status(status.clone());
        let previous_state = ChannelState::from(previous.as_ref());

        let Some(transition) = previous_state.transition_to(next_state) else {
            debug!("Channel {} is {} (was {})", key, next_state, previous_state);
            return None;
        };

        let event = MonitorEvent::from_transition(key.clone(), transition, status);
        info!("{}", event.description());
        if let Err(e) = self.publish(event.clone()) {
            warn!("Failed to publish event for {}: {}", key, e);
        }
        Some(event)
    }

    fn publish(&self, event: MonitorEvent) -> Result<usize> {
        self.broadcaster
            .publish(event)
            .map_err(|_| Error::Other("no monitor event receivers".to_string()))
    }
}
