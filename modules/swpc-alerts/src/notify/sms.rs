use async_trait::async_trait;
use tracing::info;
use twilio::{TwilioOptions, TwilioService};

use super::backend::NotifyBackend;
use crate::config::Config;

/// Twilio SMS backend.
pub struct SmsBackend {
    service: TwilioService,
    from: String,
    to: String,
}

impl SmsBackend {
    pub fn new(service: TwilioService, from: String, to: String) -> Self {
        Self { service, from, to }
    }

    pub fn from_config(config: &Config) -> Self {
        let service = TwilioService::new(TwilioOptions {
            account_sid: config.twilio_sid.clone(),
            auth_token: config.twilio_auth.clone(),
        });
        Self::new(service, config.twilio_from.clone(), config.twilio_to.clone())
    }
}

#[async_trait]
impl NotifyBackend for SmsBackend {
    async fn send(&self, body: &str) -> anyhow::Result<()> {
        let message = self.service.send_sms(&self.from, &self.to, body).await?;
        info!(sid = %message.sid, status = ?message.status, "Twilio message sent");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "twilio-sms"
    }
}
