pub mod backend;
pub mod dry_run;
pub mod sms;

use crate::config::Config;
use backend::NotifyBackend;
use dry_run::DryRunBackend;
use sms::SmsBackend;

/// Dry-run when configured, Twilio otherwise.
pub fn backend_for(config: &Config) -> Box<dyn NotifyBackend> {
    if config.dry_run {
        Box::new(DryRunBackend)
    } else {
        Box::new(SmsBackend::from_config(config))
    }
}
