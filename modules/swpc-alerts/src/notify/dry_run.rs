use async_trait::async_trait;
use tracing::info;

use super::backend::NotifyBackend;

/// Logs instead of sending. Never contacts Twilio.
pub struct DryRunBackend;

#[async_trait]
impl NotifyBackend for DryRunBackend {
    async fn send(&self, body: &str) -> anyhow::Result<()> {
        info!(body, "[dry run] SMS would be sent");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "dry-run"
    }
}
