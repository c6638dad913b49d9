use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::instrument;
use url::Url;

use crate::domain::error::NotificationError;
use crate::domain::ports::NotificationPort;

/// HTTP adapter implementing the notification port.
/// Each event is POSTed as JSON to `<base>/topics/<topic>`.
pub struct HttpEventPublisher {
    client: reqwest::Client,
    base: Url,
}

impl HttpEventPublisher {
    pub fn new(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }

    /// Build with a dedicated client that gives up after `timeout`.
    pub fn with_timeout(base: Url, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client, base))
    }

    fn topic_url(&self, topic: &str) -> Result<Url, NotificationError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| NotificationError::transport("invalid broker base URL"))?
            .pop_if_empty()
            .extend(&["topics", topic]);
        Ok(url)
    }
}

#[async_trait]
impl NotificationPort for HttpEventPublisher {
    #[instrument(
        name = "user_management.http.broker.publish",
        skip_all,
        fields(broker = %self.base, topic = %topic)
    )]
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), NotificationError> {
        let url = self.topic_url(topic)?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| NotificationError::transport(e.to_string()))?;

        // Check HTTP status
        if !response.status().is_success() {
            return Err(NotificationError::Rejected {
                status: response.status().as_u16(),
            });
        }

        Ok(())
    }
}
