//! In-process document collection.
//!
//! Keeps users in insertion order, which is the natural order a query walks.
//! Used by tests and by the server's `--mock` mode.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::bail;
use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::contract::model::User;
use crate::domain::query::{UserFilter, Window};
use crate::domain::repo::{QueryPage, UserChanges, UsersRepository};

#[derive(Default)]
pub struct InMemoryUsersRepository {
    docs: RwLock<Vec<User>>,
    closed: AtomicBool,
}

impl InMemoryUsersRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }

    /// Raw stored document, bypassing the service. Test helper.
    pub fn get(&self, id: &str) -> Option<User> {
        self.docs.read().iter().find(|u| u.id == id).cloned()
    }

    fn ensure_open(&self) -> anyhow::Result<()> {
        if self.closed.load(Ordering::Acquire) {
            bail!("user store is shut down");
        }
        Ok(())
    }
}

#[async_trait]
impl UsersRepository for InMemoryUsersRepository {
    async fn create_user(&self, user: User) -> anyhow::Result<String> {
        self.ensure_open()?;
        let mut docs = self.docs.write();
        if docs.iter().any(|u| u.id == user.id) {
            bail!("duplicate key: user id '{}' already exists", user.id);
        }
        let id = user.id.clone();
        docs.push(user);
        debug!(user_id = %id, "Inserted user document");
        Ok(id)
    }

    async fn update_user(&self, changes: UserChanges) -> anyhow::Result<Option<User>> {
        self.ensure_open()?;
        let mut docs = self.docs.write();
        let Some(doc) = docs.iter_mut().find(|u| u.id == changes.id) else {
            return Ok(None);
        };
        changes.apply_to(doc);
        Ok(Some(doc.clone()))
    }

    async fn delete_user(&self, id: &str) -> anyhow::Result<Option<String>> {
        self.ensure_open()?;
        let mut docs = self.docs.write();
        match docs.iter().position(|u| u.id == id) {
            Some(pos) => Ok(Some(docs.remove(pos).id)),
            None => Ok(None),
        }
    }

    async fn query_users(
        &self,
        filter: &UserFilter,
        window: Window,
    ) -> anyhow::Result<QueryPage> {
        self.ensure_open()?;
        let docs = self.docs.read();
        let matching: Vec<&User> = docs.iter().filter(|u| filter.matches(u)).collect();
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(window.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(window.limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(QueryPage { items, total })
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        self.ensure_open()
    }

    async fn shutdown(&self) -> anyhow::Result<()> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}
