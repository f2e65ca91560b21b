//! Threshold checks for each feed.
//!
//! Every function here is pure: it takes a parsed feed and thresholds and
//! returns the events worth notifying about. Deduplication and delivery
//! happen in [`crate::monitor`].

use std::fmt;

use swpc_client::{latest, Alert, BzReading, KpIndex};

/// NOAA scale codes at level 3 (strong) and above. Levels 1-2 are ignored.
pub const SEVERE_SCALE_CODES: [&str; 9] = ["G3", "G4", "G5", "S3", "S4", "S5", "R3", "R4", "R5"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    SwpcAlert,
    KpIndex,
    BzField,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SwpcAlert => write!(f, "swpc_alert"),
            Self::KpIndex => write!(f, "kp_index"),
            Self::BzField => write!(f, "bz_field"),
        }
    }
}

/// A notifiable condition found in one poll.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    /// Text the fingerprint is computed from.
    pub dedupe_text: String,
    /// SMS body.
    pub body: String,
}

/// Scale code (e.g. `"G4"`) of the first severe level mentioned in `message`.
pub fn severe_scale(message: &str) -> Option<&'static str> {
    SEVERE_SCALE_CODES
        .iter()
        .copied()
        .find(|code| message.contains(code))
}

/// Every alert in the batch that mentions a level 3+ G, S or R scale.
pub fn swpc_alerts(alerts: &[Alert]) -> Vec<Event> {
    alerts
        .iter()
        .filter(|alert| severe_scale(&alert.message).is_some())
        .map(|alert| Event {
            kind: EventKind::SwpcAlert,
            dedupe_text: alert.message.clone(),
            body: format!("🌐 SWPC Alert: {}", alert.message),
        })
        .collect()
}

/// Latest Kp reading at or above `threshold`.
pub fn kp_alert(readings: &[KpIndex], threshold: f64) -> Option<Event> {
    let reading = latest(readings)?;
    if reading.kp >= threshold {
        let body = format!(
            "🧠 K-index Alert: Kp = {:.2} at {}\nLinked to sleep disruption, anxiety, and focus issues.",
            reading.kp, reading.time_tag
        );
        Some(Event {
            kind: EventKind::KpIndex,
            dedupe_text: body.clone(),
            body,
        })
    } else {
        None
    }
}

/// Latest Bz reading strictly below `threshold`. The threshold is negative:
/// a more southward field is more disruptive. NaN never fires.
pub fn bz_alert(readings: &[BzReading], threshold: f64) -> Option<Event> {
    let reading = latest(readings)?;
    if reading.bz < threshold {
        let body = format!(
            "🧠 Geomagnetic Instability Alert: Bz = {:.2} nT at {}\nMay disrupt sleep, mood, or focus in sensitive individuals.",
            reading.bz, reading.time_tag
        );
        Some(Event {
            kind: EventKind::BzField,
            dedupe_text: body.clone(),
            body,
        })
    } else {
        None
    }
}
