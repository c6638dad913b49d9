use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::UserManagementApi,
    error::UserManagementError,
    model::{NewUser, User, UserPage, UserQuery, UserUpdate},
};
use crate::domain::service::Service;

/// Local implementation of the UserManagementApi trait that delegates to the domain service
pub struct UserManagementLocalClient {
    service: Arc<Service>,
}

impl UserManagementLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UserManagementApi for UserManagementLocalClient {
    async fn create(&self, draft: NewUser) -> Result<String, UserManagementError> {
        self.service.create(draft).await.map_err(Into::into)
    }

    async fn update(&self, user: UserUpdate) -> Result<User, UserManagementError> {
        self.service.update(user).await.map_err(Into::into)
    }

    async fn delete(&self, id: &str) -> Result<String, UserManagementError> {
        self.service.delete(id).await.map_err(Into::into)
    }

    async fn query(&self, query: UserQuery) -> Result<UserPage, UserManagementError> {
        self.service.query(query).await.map_err(Into::into)
    }
}
