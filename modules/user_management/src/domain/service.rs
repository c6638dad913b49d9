use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use validator::ValidateEmail;

use crate::contract::model::{NewUser, User, UserPage, UserQuery, UserUpdate};
use crate::domain::credentials::CredentialHasher;
use crate::domain::error::DomainError;
use crate::domain::events::UserEvent;
use crate::domain::identity;
use crate::domain::names::title_case;
use crate::domain::notifier::Notifier;
use crate::domain::query;
use crate::domain::repo::{UserChanges, UsersRepository};

/// Lifecycle orchestrator for users: validation, identity, hashing,
/// persistence and detached notification.
/// Depends only on ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
    notifier: Notifier,
    hasher: Arc<dyn CredentialHasher>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 1000,
        }
    }
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(
        repo: Arc<dyn UsersRepository>,
        notifier: Notifier,
        hasher: Arc<dyn CredentialHasher>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            notifier,
            hasher,
            config,
        }
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    #[instrument(
        name = "user_management.service.create",
        skip(self, draft),
        fields(email = %draft.email)
    )]
    pub async fn create(&self, draft: NewUser) -> Result<String, DomainError> {
        info!("Creating new user");

        self.validate_email(&draft.email)?;

        let mut user = identity::assign(draft, Utc::now());
        user.first_name = title_case(&user.first_name);
        user.last_name = title_case(&user.last_name);
        user.password = self
            .hash_password(std::mem::take(&mut user.password))
            .await?;

        let id = self
            .repo
            .create_user(user.clone())
            .await
            .map_err(|e| DomainError::database(format!("{e:#}")))?;

        self.notifier.dispatch(UserEvent::created(&user));

        info!(user_id = %id, "Successfully created user");
        Ok(id)
    }

    #[instrument(
        name = "user_management.service.update",
        skip(self, update),
        fields(user_id = %update.id)
    )]
    pub async fn update(&self, update: UserUpdate) -> Result<User, DomainError> {
        info!("Updating user");

        self.validate_email(&update.email)?;
        if update.id.trim().is_empty() {
            return Err(DomainError::validation("id", "must not be empty"));
        }

        let password_hash = match update.password {
            Some(plaintext) if !plaintext.is_empty() => Some(self.hash_password(plaintext).await?),
            _ => None,
        };

        let changes = UserChanges {
            id: update.id,
            first_name: title_case(&update.first_name),
            last_name: title_case(&update.last_name),
            nickname: update.nickname,
            password_hash,
            email: update.email,
            country: update.country,
            updated_at: Utc::now(),
        };
        let id = changes.id.clone();

        let updated = self
            .repo
            .update_user(changes)
            .await
            .map_err(|e| DomainError::database(format!("{e:#}")))?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        self.notifier.dispatch(UserEvent::updated(&updated));

        info!("Successfully updated user");
        Ok(updated)
    }

    #[instrument(name = "user_management.service.delete", skip(self), fields(user_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<String, DomainError> {
        info!("Deleting user");

        let deleted = self
            .repo
            .delete_user(id)
            .await
            .map_err(|e| DomainError::database(format!("{e:#}")))?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        self.notifier.dispatch(UserEvent::deleted(deleted.clone()));

        info!("Successfully deleted user");
        Ok(deleted)
    }

    #[instrument(name = "user_management.service.query", skip(self, query))]
    pub async fn query(&self, query: UserQuery) -> Result<UserPage, DomainError> {
        debug!("Querying users");

        let built = query::build(
            &query,
            self.config.default_page_size,
            self.config.max_page_size,
        )?;
        debug!(
            filter = %built.filter,
            limit = built.window.limit,
            offset = built.window.offset,
            "Built store query"
        );

        let found = self
            .repo
            .query_users(&built.filter, built.window)
            .await
            .map_err(|e| DomainError::database(format!("{e:#}")))?;

        debug!("Query returned {} of {} users", found.items.len(), found.total);
        Ok(UserPage {
            items: found.items,
            page: built.page,
            size: built.size,
            total: found.total,
        })
    }

    #[instrument(name = "user_management.service.health_check", skip(self))]
    pub async fn health_check(&self) -> Result<(), DomainError> {
        self.repo
            .health_check()
            .await
            .map_err(|e| DomainError::database(format!("{e:#}")))
    }

    /// Drain pending notifications, then release the store.
    #[instrument(name = "user_management.service.shutdown", skip(self))]
    pub async fn shutdown(&self) -> Result<(), DomainError> {
        let pending = self.notifier.pending();
        if pending > 0 {
            info!("Waiting for {} pending user events", pending);
        }
        self.notifier.flush().await;
        self.repo
            .shutdown()
            .await
            .map_err(|e| DomainError::database(format!("{e:#}")))
    }

    // --- helpers ---

    fn validate_email(&self, email: &str) -> Result<(), DomainError> {
        if !email.validate_email() {
            warn!("Rejected invalid email");
            return Err(DomainError::invalid_email(email));
        }
        Ok(())
    }

    /// bcrypt is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, plaintext: String) -> Result<String, DomainError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| DomainError::hashing(e.to_string()))?
    }
}
