use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use platforms_status::extractor::default_client;
use platforms_status::extractor::factory::ExtractorFactory;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use stream_notify::bot::UpdatePoller;
use stream_notify::config::AppConfig;
use stream_notify::logging::{self, LOG_DIR_ENV_VAR};
use stream_notify::monitor::{StreamDetector, StreamMonitor, StreamMonitorConfig};
use stream_notify::notification::{NotificationService, TelegramChannel, TelegramConfig};
use stream_notify::{panic_hook, registry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let log_dir = std::env::var_os(LOG_DIR_ENV_VAR).map(PathBuf::from);
    let logging = logging::init_logging(log_dir.as_deref())?;
    panic_hook::install();

    info!("stream-notify v{} starting", env!("CARGO_PKG_VERSION"));

    // Nothing is spawned until configuration and every channel link are valid.
    let config = AppConfig::from_env().context("failed to load configuration")?;
    let registry = Arc::new(
        registry::build_registry(&config).context("failed to bind configured channels")?,
    );

    let client = default_client().context("failed to build HTTP client")?;
    let factory =
        ExtractorFactory::new(client).with_credential(config.platform_credential.as_str());
    let monitor = Arc::new(StreamMonitor::new(
        Arc::clone(&registry),
        Arc::new(StreamDetector::new(factory)),
        StreamMonitorConfig::from(&config),
    ));

    let telegram = Arc::new(
        TelegramChannel::new(TelegramConfig::new(config.bot_token.as_str()))
            .context("failed to create Telegram transport")?,
    );
    let notifier = Arc::new(NotificationService::new(
        telegram.clone(),
        Arc::clone(&registry),
        config.language,
    ));
    let poller = UpdatePoller::new(telegram, Arc::clone(&notifier), config.bot_name.as_str());

    let cancellation_token = CancellationToken::new();
    logging.start_retention_cleanup(cancellation_token.clone());

    let listener_task =
        notifier.listen_for_monitor_events(monitor.subscribe_events(), cancellation_token.clone());
    let monitor_task = tokio::spawn({
        let monitor = Arc::clone(&monitor);
        let token = cancellation_token.clone();
        async move { monitor.run(token).await }
    });
    let poller_task = tokio::spawn({
        let token = cancellation_token.clone();
        async move { poller.run(token).await }
    });

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("Shutdown signal received, stopping");
    cancellation_token.cancel();

    let (monitor_result, poller_result, listener_result) =
        tokio::join!(monitor_task, poller_task, listener_task);
    for (name, result) in [
        ("monitor", monitor_result),
        ("poller", poller_result),
        ("listener", listener_result),
    ] {
        if let Err(e) = result {
            error!("{} task ended abnormally: {}", name, e);
        }
    }

    info!("stream-notify stopped");
    Ok(())
}
