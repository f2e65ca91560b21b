use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Env var that overrides the default config location.
pub const CONFIG_PATH_ENV: &str = "SWPC_ALERTS_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Cannot locate config: neither SWPC_ALERTS_CONFIG nor HOME is set")]
    NoPath,
}

/// Runtime configuration, read once at startup from a JSON file.
#[derive(Clone, Deserialize)]
pub struct Config {
    // Twilio
    pub twilio_sid: String,
    pub twilio_auth: String,
    pub twilio_from: String,
    pub twilio_to: String,

    pub dry_run: bool,
    pub check_interval_minutes: u64,

    // Thresholds
    pub kp_threshold: f64,
    pub bz_threshold: f64,
    pub proton_flux_threshold: f64,
    pub xray_flux_threshold: f64,
}

impl Config {
    /// Load from `$SWPC_ALERTS_CONFIG`, falling back to
    /// `$HOME/.config/swpc-alerts/config.json`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_path(&default_path()?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.check_interval_minutes == 0 {
            return Err(ConfigError::Invalid(
                "check_interval_minutes must be at least 1".to_string(),
            ));
        }
        if self.check_interval_minutes.checked_mul(60).is_none() {
            return Err(ConfigError::Invalid(format!(
                "check_interval_minutes is too large: {}",
                self.check_interval_minutes
            )));
        }
        Ok(())
    }

    /// Saturates instead of overflowing; `from_path` rejects such values.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_minutes.saturating_mul(60))
    }

    /// Log the non-secret settings. Credentials are reported only as set/unset.
    pub fn log_redacted(&self) {
        info!(
            dry_run = self.dry_run,
            check_interval_minutes = self.check_interval_minutes,
            kp_threshold = self.kp_threshold,
            bz_threshold = self.bz_threshold,
            proton_flux_threshold = self.proton_flux_threshold,
            xray_flux_threshold = self.xray_flux_threshold,
            twilio_sid_set = !self.twilio_sid.is_empty(),
            twilio_auth_set = !self.twilio_auth.is_empty(),
            twilio_to = %mask_number(&self.twilio_to),
            "Loaded config"
        );
    }
}

// Hand-written so credentials never end up in `{:?}` output.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("twilio_sid", &"<redacted>")
            .field("twilio_auth", &"<redacted>")
            .field("twilio_from", &self.twilio_from)
            .field("twilio_to", &mask_number(&self.twilio_to))
            .field("dry_run", &self.dry_run)
            .field("check_interval_minutes", &self.check_interval_minutes)
            .field("kp_threshold", &self.kp_threshold)
            .field("bz_threshold", &self.bz_threshold)
            .field("proton_flux_threshold", &self.proton_flux_threshold)
            .field("xray_flux_threshold", &self.xray_flux_threshold)
            .finish()
    }
}

fn default_path() -> Result<PathBuf, ConfigError> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    let home = std::env::var("HOME").map_err(|_| ConfigError::NoPath)?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("swpc-alerts")
        .join("config.json"))
}

/// Keep only the last four digits of a phone number for logs.
fn mask_number(number: &str) -> String {
    let chars: Vec<char> = number.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{visible}", "*".repeat(chars.len() - 4))
}
