use async_trait::async_trait;
use tracing::warn;

use crate::domain::error::NotificationError;
use crate::domain::events::UserEvent;

/// Output port: best-effort publish of an encoded event to a broker topic
/// (no knowledge of transport).
#[async_trait]
pub trait NotificationPort: Send + Sync + 'static {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), NotificationError>;
}

/// Receives notification failures. Failures never reach the caller of the
/// lifecycle operation that produced the event.
pub trait NotificationErrorSink: Send + Sync + 'static {
    fn report(&self, event: &UserEvent, error: &NotificationError);
}

/// Default sink: records the failure in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingErrorSink;

impl NotificationErrorSink for LoggingErrorSink {
    fn report(&self, event: &UserEvent, error: &NotificationError) {
        warn!(
            event_name = event.event_name.as_str(),
            user_id = %event.user_id(),
            error = %error,
            "User event could not be published"
        );
    }
}
