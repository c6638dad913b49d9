use async_trait::async_trait;
use tracing::info;

use crate::domain::error::NotificationError;
use crate::domain::ports::NotificationPort;

/// Publisher used when no broker is configured: events only reach the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventPublisher;

#[async_trait]
impl NotificationPort for LogEventPublisher {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), NotificationError> {
        info!(
            topic,
            payload = %String::from_utf8_lossy(&payload),
            "User event (no broker configured)"
        );
        Ok(())
    }
}
