use chrono::{DateTime, Utc};

/// Pure user model for inter-module communication (no serde).
///
/// `password` always holds the bcrypt hash once the record has been through
/// the service; plaintext never reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub password: String,
    pub email: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Draft accepted by `create`. An absent or empty `id` is generated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewUser {
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub password: String,
    pub email: String,
    pub country: String,
}

/// Replacement accepted by `update`, keyed by `id`.
///
/// `password: None` (or an empty string) keeps the stored hash.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserUpdate {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub password: Option<String>,
    pub email: String,
    pub country: String,
}

/// Equality filters plus a 1-based pagination window.
/// Absent filters impose no constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserQuery {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// One page of query results together with the count facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPage {
    pub items: Vec<User>,
    pub page: u64,
    pub size: u64,
    /// Number of matching records before pagination.
    pub total: u64,
}

impl UserPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
