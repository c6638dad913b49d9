//! Detached delivery of lifecycle events.
//!
//! Every dispatched event runs on its own tokio task, independent of the
//! request that produced it. A semaphore caps how many publishes are in
//! flight at once; a [`TaskTracker`] lets shutdown wait for the stragglers.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio_util::task::TaskTracker;
use tracing::{debug, Instrument};

use crate::domain::error::NotificationError;
use crate::domain::events::UserEvent;
use crate::domain::ports::{LoggingErrorSink, NotificationErrorSink, NotificationPort};

pub const DEFAULT_TOPIC: &str = "user";
pub const DEFAULT_MAX_IN_FLIGHT: usize = 64;

#[derive(Clone)]
pub struct Notifier {
    port: Arc<dyn NotificationPort>,
    sink: Arc<dyn NotificationErrorSink>,
    topic: Arc<str>,
    permits: Arc<Semaphore>,
    tracker: TaskTracker,
}

impl Notifier {
    pub fn new(
        port: Arc<dyn NotificationPort>,
        sink: Arc<dyn NotificationErrorSink>,
        topic: impl Into<String>,
        max_in_flight: usize,
    ) -> Self {
        let topic: String = topic.into();
        Self {
            port,
            sink,
            topic: Arc::from(topic),
            permits: Arc::new(Semaphore::new(max_in_flight.max(1))),
            tracker: TaskTracker::new(),
        }
    }

    /// Notifier with the default topic, bound and logging sink.
    pub fn with_defaults(port: Arc<dyn NotificationPort>) -> Self {
        Self::new(
            port,
            Arc::new(LoggingErrorSink),
            DEFAULT_TOPIC,
            DEFAULT_MAX_IN_FLIGHT,
        )
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Number of dispatched events whose publish has not finished yet.
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Fire-and-forget: returns immediately; the outcome is only visible to
    /// the error sink. Must be called from within a tokio runtime.
    pub fn dispatch(&self, event: UserEvent) {
        let port = Arc::clone(&self.port);
        let sink = Arc::clone(&self.sink);
        let topic = Arc::clone(&self.topic);
        let permits = Arc::clone(&self.permits);
        let span = tracing::debug_span!(
            "user_management.notifier.publish",
            event_name = event.event_name.as_str(),
            user_id = %event.user_id()
        );

        self.tracker.spawn(
            async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return;
                };
                let outcome = match serde_json::to_vec(&event) {
                    Ok(bytes) => port.publish(&topic, bytes).await,
                    Err(e) => Err(NotificationError::from(e)),
                };
                match outcome {
                    Ok(()) => debug!("User event published"),
                    Err(e) => sink.report(&event, &e),
                }
            }
            .instrument(span),
        );
    }

    /// Wait until every event dispatched so far has been attempted.
    /// The notifier stays usable afterwards.
    pub async fn flush(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }
}
