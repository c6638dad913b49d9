use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{debug, info};
use url::Url;

use crate::api::rest::routes;
use crate::config::UserManagementConfig;
use crate::contract::client::UserManagementApi;
use crate::domain::credentials::BcryptHasher;
use crate::domain::notifier::Notifier;
use crate::domain::ports::{LoggingErrorSink, NotificationPort};
use crate::domain::repo::UsersRepository;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::UserManagementLocalClient;
use crate::infra::broker::{HttpEventPublisher, LogEventPublisher};
use crate::infra::storage::{InMemoryUsersRepository, SeaOrmUsersRepository};

/// Which document store backs the module.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// Process-local collection; contents vanish on exit.
    InMemory,
    /// SeaORM connection (SQLite URL), migrated on start-up.
    Database { url: String, max_conns: Option<u32> },
}

/// Wired module: domain service plus the handles transports need.
#[derive(Clone)]
pub struct UserManagement {
    service: Arc<Service>,
    api: Arc<dyn UserManagementApi>,
}

impl UserManagement {
    /// Build adapters from configuration and wire them into the service.
    pub async fn init(cfg: &UserManagementConfig, store: StoreBackend) -> anyhow::Result<Self> {
        info!("Initializing user_management module");
        debug!(
            "Loaded user_management config: default_page_size={}, max_page_size={}, bcrypt_cost={}",
            cfg.default_page_size, cfg.max_page_size, cfg.bcrypt_cost
        );
        cfg.validate()
            .context("invalid user_management configuration")?;

        let repo: Arc<dyn UsersRepository> = match store {
            StoreBackend::InMemory => {
                info!("Using in-memory user store");
                Arc::new(InMemoryUsersRepository::new())
            }
            StoreBackend::Database { url, max_conns } => {
                Arc::new(SeaOrmUsersRepository::connect(&url, max_conns).await?)
            }
        };

        let port: Arc<dyn NotificationPort> = match &cfg.notifications.base_url {
            Some(base) => {
                let base = Url::parse(base)
                    .with_context(|| format!("invalid notifications.base_url '{}'", base))?;
                info!(broker = %base, "Publishing user events over HTTP");
                Arc::new(HttpEventPublisher::with_timeout(
                    base,
                    Duration::from_millis(cfg.notifications.timeout_ms),
                )?)
            }
            None => {
                info!("No broker configured; user events are logged only");
                Arc::new(LogEventPublisher)
            }
        };

        Ok(Self::from_parts(repo, port, cfg))
    }

    /// Wire already-built ports (used by tests and embedders).
    pub fn from_parts(
        repo: Arc<dyn UsersRepository>,
        port: Arc<dyn NotificationPort>,
        cfg: &UserManagementConfig,
    ) -> Self {
        let notifier = Notifier::new(
            port,
            Arc::new(LoggingErrorSink),
            cfg.notifications.topic.clone(),
            cfg.notifications.max_in_flight,
        );
        let service_config = ServiceConfig {
            default_page_size: cfg.default_page_size,
            max_page_size: cfg.max_page_size,
        };
        let service = Arc::new(Service::new(
            repo,
            notifier,
            Arc::new(BcryptHasher::new(cfg.bcrypt_cost)),
            service_config,
        ));

        let api: Arc<dyn UserManagementApi> =
            Arc::new(UserManagementLocalClient::new(Arc::clone(&service)));

        Self { service, api }
    }

    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    /// In-process client for other modules.
    pub fn client(&self) -> Arc<dyn UserManagementApi> {
        Arc::clone(&self.api)
    }

    /// REST routes for the module.
    pub fn router(&self) -> axum::Router {
        info!("Registering user_management REST routes");
        routes::register_routes(axum::Router::new(), self.service())
    }
}
