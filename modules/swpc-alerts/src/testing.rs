// Test doubles for the monitor:
// - MockFeeds (FeedSource): canned responses per feed, swappable between cycles
// - RecordingNotifier (NotifyBackend): captures bodies, optionally fails
//
// Both are cheap clones over shared state so a test can keep a handle after
// boxing one into a Monitor.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use swpc_client::{Alert, BzReading, KpIndex};

use crate::config::Config;
use crate::feeds::FeedSource;
use crate::notify::backend::NotifyBackend;

/// Dry-run config with the usual thresholds (Kp 7, Bz -8).
pub fn test_config() -> Config {
    Config {
        twilio_sid: "AC00000000000000000000000000000000".to_string(),
        twilio_auth: "test-token".to_string(),
        twilio_from: "+15551234567".to_string(),
        twilio_to: "+15557654321".to_string(),
        dry_run: true,
        check_interval_minutes: 15,
        kp_threshold: 7.0,
        bz_threshold: -8.0,
        proton_flux_threshold: 10.0,
        xray_flux_threshold: 1e-4,
    }
}

pub fn alert(message: &str) -> Alert {
    Alert {
        message: message.to_string(),
        product_id: None,
        issue_datetime: None,
    }
}

pub fn kp(value: f64, time_tag: &str) -> KpIndex {
    KpIndex {
        time_tag: time_tag.to_string(),
        kp: value,
    }
}

pub fn bz(value: f64, time_tag: &str) -> BzReading {
    BzReading {
        bz: value,
        time_tag: time_tag.to_string(),
    }
}

// ---------------------------------------------------------------------------
// MockFeeds
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MockFeedsInner {
    alerts: Option<Vec<Alert>>,
    kp_index: Option<Vec<KpIndex>>,
    solar_wind: Option<Vec<BzReading>>,
}

/// Returns `Err` for any feed that has not been set, like a network failure.
#[derive(Clone, Default)]
pub struct MockFeeds {
    inner: Arc<Mutex<MockFeedsInner>>,
}

impl MockFeeds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_alerts(self, alerts: Vec<Alert>) -> Self {
        self.set_alerts(Some(alerts));
        self
    }

    pub fn on_kp_index(self, readings: Vec<KpIndex>) -> Self {
        self.set_kp_index(Some(readings));
        self
    }

    pub fn on_solar_wind(self, readings: Vec<BzReading>) -> Self {
        self.set_solar_wind(Some(readings));
        self
    }

    /// `None` makes the feed fail.
    pub fn set_alerts(&self, alerts: Option<Vec<Alert>>) {
        self.inner.lock().unwrap().alerts = alerts;
    }

    pub fn set_kp_index(&self, readings: Option<Vec<KpIndex>>) {
        self.inner.lock().unwrap().kp_index = readings;
    }

    pub fn set_solar_wind(&self, readings: Option<Vec<BzReading>>) {
        self.inner.lock().unwrap().solar_wind = readings;
    }
}

#[async_trait]
impl FeedSource for MockFeeds {
    async fn alerts(&self) -> Result<Vec<Alert>> {
        self.inner
            .lock()
            .unwrap()
            .alerts
            .clone()
            .ok_or_else(|| anyhow!("MockFeeds: alerts feed unavailable"))
    }

    async fn kp_index(&self) -> Result<Vec<KpIndex>> {
        self.inner
            .lock()
            .unwrap()
            .kp_index
            .clone()
            .ok_or_else(|| anyhow!("MockFeeds: kp_index feed unavailable"))
    }

    async fn solar_wind(&self) -> Result<Vec<BzReading>> {
        self.inner
            .lock()
            .unwrap()
            .solar_wind
            .clone()
            .ok_or_else(|| anyhow!("MockFeeds: solar_wind feed unavailable"))
    }
}

// ---------------------------------------------------------------------------
// RecordingNotifier
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send is attempted (and recorded) but returns an error.
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    /// Bodies passed to `send`, in order, including failed attempts.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotifyBackend for RecordingNotifier {
    async fn send(&self, body: &str) -> Result<()> {
        self.sent.lock().unwrap().push(body.to_string());
        if self.fail {
            return Err(anyhow!("RecordingNotifier: provider rejected message"));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
