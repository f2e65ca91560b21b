use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{TimeDelta, Utc};
use tracing::{debug, info, warn};

use crate::cache::AlertCache;
use crate::config::Config;
use crate::evaluate::{self, Event};
use crate::feeds::FeedSource;
use crate::fingerprint::fingerprint;
use crate::notify::backend::NotifyBackend;

pub const TEST_MESSAGE: &str = "🚨 Test Alert: Space weather alert system is operational.";

/// The only CLI flag.
pub const TEST_FLAG: &str = "--test";

/// Counters from one poll cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleStats {
    pub feeds_fetched: u32,
    pub feeds_failed: u32,
    pub events_detected: u32,
    pub duplicates_suppressed: u32,
    pub notifications_sent: u32,
    pub notifications_failed: u32,
    pub cache_saved: bool,
}

impl fmt::Display for CycleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "feeds={}/{} events={} duplicates={} sent={} failed={} cache_saved={}",
            self.feeds_fetched,
            self.feeds_fetched + self.feeds_failed,
            self.events_detected,
            self.duplicates_suppressed,
            self.notifications_sent,
            self.notifications_failed,
            self.cache_saved,
        )
    }
}

/// The poll loop: fetch each feed, evaluate, dedupe, notify, persist.
pub struct Monitor {
    config: Config,
    feeds: Box<dyn FeedSource>,
    notifier: Box<dyn NotifyBackend>,
    cache: AlertCache,
}

impl Monitor {
    pub fn new(
        config: Config,
        feeds: Box<dyn FeedSource>,
        notifier: Box<dyn NotifyBackend>,
        cache: AlertCache,
    ) -> Self {
        Self {
            config,
            feeds,
            notifier,
            cache,
        }
    }

    pub fn cache(&self) -> &AlertCache {
        &self.cache
    }

    /// Run cycles until `cancel` is set. The flag is checked after each cycle
    /// and after each sleep; an in-flight cycle always completes.
    pub async fn run(&mut self, cancel: Arc<AtomicBool>) -> Result<()> {
        let interval = self.config.poll_interval();
        let step = TimeDelta::from_std(interval).context("Poll interval out of range")?;

        info!(
            interval_minutes = self.config.check_interval_minutes,
            backend = self.notifier.name(),
            cached = self.cache.len(),
            "Starting space weather alert monitor"
        );
        if self.config.dry_run {
            info!("Running in dry-run mode. No SMS will be sent.");
        }

        loop {
            let stats = self.run_cycle().await;
            info!("Cycle complete. {stats}");

            if cancel.load(Ordering::SeqCst) {
                break;
            }

            let next = Utc::now() + step;
            debug!(next_poll = %next.format("%Y-%m-%dT%H:%M:%SZ"), "Sleeping until next poll");
            tokio::time::sleep(interval).await;

            if cancel.load(Ordering::SeqCst) {
                break;
            }
        }

        info!("Monitor stopped");
        Ok(())
    }

    /// One full pass over all feeds, then persist the cache.
    pub async fn run_cycle(&mut self) -> CycleStats {
        let mut stats = CycleStats::default();

        // Feeds run in a fixed order; a failed fetch only skips that feed.
        match self.feeds.alerts().await {
            Ok(alerts) => {
                stats.feeds_fetched += 1;
                debug!(count = alerts.len(), "Fetched SWPC alerts");
                for event in evaluate::swpc_alerts(&alerts) {
                    self.dispatch(event, &mut stats).await;
                }
            }
            Err(e) => {
                stats.feeds_failed += 1;
                warn!(error = %e, feed = "swpc_alerts", "Error fetching feed, skipping");
            }
        }

        match self.feeds.kp_index().await {
            Ok(readings) => {
                stats.feeds_fetched += 1;
                if readings.is_empty() {
                    warn!(feed = "kp_index", "Feed returned no readings");
                }
                if let Some(event) = evaluate::kp_alert(&readings, self.config.kp_threshold) {
                    self.dispatch(event, &mut stats).await;
                }
            }
            Err(e) => {
                stats.feeds_failed += 1;
                warn!(error = %e, feed = "kp_index", "Error fetching feed, skipping");
            }
        }

        match self.feeds.solar_wind().await {
            Ok(readings) => {
                stats.feeds_fetched += 1;
                if readings.is_empty() {
                    warn!(feed = "bz_field", "Feed returned no readings");
                }
                if let Some(event) = evaluate::bz_alert(&readings, self.config.bz_threshold) {
                    self.dispatch(event, &mut stats).await;
                }
            }
            Err(e) => {
                stats.feeds_failed += 1;
                warn!(error = %e, feed = "bz_field", "Error fetching feed, skipping");
            }
        }

        match self.cache.save() {
            Ok(()) => stats.cache_saved = true,
            Err(e) => {
                warn!(error = %e, path = %self.cache.path().display(), "Failed to save alert cache")
            }
        }

        stats
    }

    /// Notify once per fingerprint. The fingerprint is recorded before the
    /// send, so a failed send is not retried on later cycles.
    async fn dispatch(&mut self, event: Event, stats: &mut CycleStats) {
        stats.events_detected += 1;

        let fp = fingerprint(&event.dedupe_text);
        if !self.cache.record(fp.clone()) {
            stats.duplicates_suppressed += 1;
            debug!(kind = %event.kind, fingerprint = %fp, "Already notified, skipping");
            return;
        }

        match self.notifier.send(&event.body).await {
            Ok(()) => {
                stats.notifications_sent += 1;
                info!(kind = %event.kind, fingerprint = %fp, "Notification sent");
            }
            Err(e) => {
                stats.notifications_failed += 1;
                warn!(error = %e, kind = %event.kind, "SMS failed");
            }
        }
    }
}

/// True only for exactly one argument equal to `--test`. Any other
/// invocation, including none, runs the monitor.
pub fn is_test_mode(args: &[String]) -> bool {
    matches!(args, [flag] if flag == TEST_FLAG)
}

/// `--test` mode: send one fixed message. Does not touch the cache.
pub async fn send_test_notification(notifier: &dyn NotifyBackend) -> Result<()> {
    info!(backend = notifier.name(), "Running in test mode, sending test SMS...");
    notifier
        .send(TEST_MESSAGE)
        .await
        .context("Failed to send test SMS")?;
    info!("Test SMS sent successfully");
    Ok(())
}
