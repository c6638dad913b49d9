use async_trait::async_trait;

use crate::contract::{
    error::UserManagementError,
    model::{NewUser, User, UserPage, UserQuery, UserUpdate},
};

/// Public API trait for the user_management module that transports and
/// other modules consume.
#[async_trait]
pub trait UserManagementApi: Send + Sync {
    /// Create a user, returning the assigned id
    async fn create(&self, draft: NewUser) -> Result<String, UserManagementError>;

    /// Replace a user's mutable fields, returning the stored record
    async fn update(&self, user: UserUpdate) -> Result<User, UserManagementError>;

    /// Hard-delete a user, returning the deleted id
    async fn delete(&self, id: &str) -> Result<String, UserManagementError>;

    /// Filtered, paginated read
    async fn query(&self, query: UserQuery) -> Result<UserPage, UserManagementError>;
}
