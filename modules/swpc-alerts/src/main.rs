use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use swpc_alerts::{
    cache::{AlertCache, DEFAULT_CACHE_FILE},
    monitor::{is_test_mode, send_test_notification, Monitor},
    notify::backend_for,
    Config,
};
use swpc_client::SwpcClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("swpc_alerts=info".parse()?)
                .add_directive("twilio=info".parse()?),
        )
        .init();

    // Load config
    let config = Config::load()?;
    config.log_redacted();

    let notifier = backend_for(&config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    if is_test_mode(&args) {
        return send_test_notification(notifier.as_ref()).await;
    }

    let cache = AlertCache::load(DEFAULT_CACHE_FILE);
    let feeds = SwpcClient::new();
    info!(
        alerts = %feeds.endpoints().alerts,
        kp_index = %feeds.endpoints().kp_index,
        solar_wind = %feeds.endpoints().solar_wind,
        "Polling SWPC feeds"
    );

    let mut monitor = Monitor::new(config, Box::new(feeds), notifier, cache);
    let cancel = Arc::new(AtomicBool::new(false));
    monitor.run(cancel).await
}
