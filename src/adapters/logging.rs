use crate::domain::ports::Notifier;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Notifier used when Telegram delivery is switched off.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, message: &str) -> Result<()> {
        tracing::info!("Notification (not delivered): {}", message);
        Ok(())
    }
}
