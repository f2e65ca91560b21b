use async_trait::async_trait;

/// Pluggable SMS delivery.
#[async_trait]
pub trait NotifyBackend: Send + Sync {
    /// Deliver one message body.
    async fn send(&self, body: &str) -> anyhow::Result<()>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
