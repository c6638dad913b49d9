use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::contract::model::User;
use crate::domain::query::{UserFilter, Window};

/// Field replacement applied by [`UsersRepository::update_user`].
///
/// `password_hash: None` leaves the stored hash untouched; `id` and
/// `created_at` are never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub password_hash: Option<String>,
    pub email: String,
    pub country: String,
    pub updated_at: DateTime<Utc>,
}

impl UserChanges {
    /// Apply onto a stored record.
    pub fn apply_to(&self, user: &mut User) {
        user.first_name.clone_from(&self.first_name);
        user.last_name.clone_from(&self.last_name);
        user.nickname.clone_from(&self.nickname);
        if let Some(hash) = &self.password_hash {
            user.password.clone_from(hash);
        }
        user.email.clone_from(&self.email);
        user.country.clone_from(&self.country);
        user.updated_at = self.updated_at;
    }
}

/// Matches for one window plus the count facet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryPage {
    pub items: Vec<User>,
    pub total: u64,
}

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
///
/// The store owns identity uniqueness: inserting an id that already exists
/// must fail.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Insert a fully-formed user. Returns the stored id.
    async fn create_user(&self, user: User) -> anyhow::Result<String>;
    /// Find-and-replace by `changes.id`. `None` when no record matches.
    async fn update_user(&self, changes: UserChanges) -> anyhow::Result<Option<User>>;
    /// Hard delete. `None` when no record matches.
    async fn delete_user(&self, id: &str) -> anyhow::Result<Option<String>>;
    /// At most `window.limit` matches after skipping `window.offset`, in
    /// store-native order.
    async fn query_users(&self, filter: &UserFilter, window: Window)
        -> anyhow::Result<QueryPage>;
    async fn health_check(&self) -> anyhow::Result<()>;
    async fn shutdown(&self) -> anyhow::Result<()>;
}
