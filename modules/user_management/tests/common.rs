#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use user_management::contract::model::{NewUser, User};
use user_management::domain::credentials::BcryptHasher;
use user_management::domain::error::NotificationError;
use user_management::domain::events::UserEvent;
use user_management::domain::notifier::Notifier;
use user_management::domain::ports::{NotificationErrorSink, NotificationPort};
use user_management::domain::query::{UserFilter, Window};
use user_management::domain::repo::{QueryPage, UserChanges, UsersRepository};
use user_management::domain::service::{Service, ServiceConfig};
use user_management::infra::storage::InMemoryUsersRepository;

/// bcrypt's minimum work factor; keeps hashing fast in tests.
pub const TEST_COST: u32 = 4;

/// Captures every published event.
#[derive(Default)]
pub struct RecordingPort {
    published: Mutex<Vec<(String, serde_json::Value)>>,
}

impl RecordingPort {
    pub fn events(&self) -> Vec<(String, serde_json::Value)> {
        self.published.lock().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.published
            .lock()
            .iter()
            .map(|(_, v)| v["event_name"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

#[async_trait]
impl NotificationPort for RecordingPort {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), NotificationError> {
        let value = serde_json::from_slice(&payload)?;
        self.published.lock().push((topic.to_string(), value));
        Ok(())
    }
}

/// Broker that refuses everything.
pub struct FailingPort;

#[async_trait]
impl NotificationPort for FailingPort {
    async fn publish(&self, _topic: &str, _payload: Vec<u8>) -> Result<(), NotificationError> {
        Err(NotificationError::Rejected { status: 503 })
    }
}

#[derive(Default)]
pub struct CountingSink {
    pub failures: AtomicUsize,
}

impl NotificationErrorSink for CountingSink {
    fn report(&self, _event: &UserEvent, _error: &NotificationError) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }
}

/// In-memory store that counts how often it was touched.
#[derive(Default)]
pub struct CountingRepo {
    pub inner: InMemoryUsersRepository,
    calls: AtomicUsize,
}

impl CountingRepo {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UsersRepository for CountingRepo {
    async fn create_user(&self, user: User) -> anyhow::Result<String> {
        self.touch();
        self.inner.create_user(user).await
    }

    async fn update_user(&self, changes: UserChanges) -> anyhow::Result<Option<User>> {
        self.touch();
        self.inner.update_user(changes).await
    }

    async fn delete_user(&self, id: &str) -> anyhow::Result<Option<String>> {
        self.touch();
        self.inner.delete_user(id).await
    }

    async fn query_users(&self, filter: &UserFilter, window: Window) -> anyhow::Result<QueryPage> {
        self.touch();
        self.inner.query_users(filter, window).await
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        self.inner.health_check().await
    }

    async fn shutdown(&self) -> anyhow::Result<()> {
        self.inner.shutdown().await
    }
}

pub struct Harness {
    pub service: Service,
    pub repo: Arc<CountingRepo>,
    pub port: Arc<RecordingPort>,
}

pub fn harness() -> Harness {
    let repo = Arc::new(CountingRepo::default());
    let port = Arc::new(RecordingPort::default());
    let notifier = Notifier::with_defaults(port.clone());
    let service = Service::new(
        repo.clone(),
        notifier,
        Arc::new(BcryptHasher::new(TEST_COST)),
        ServiceConfig::default(),
    );
    Harness {
        service,
        repo,
        port,
    }
}

pub fn new_user(first: &str, last: &str, email: &str, country: &str) -> NewUser {
    NewUser {
        id: None,
        first_name: first.to_string(),
        last_name: last.to_string(),
        nickname: format!("{}{}", first.to_lowercase(), last.to_lowercase()),
        password: "s3cret-pass".to_string(),
        email: email.to_string(),
        country: country.to_string(),
    }
}
