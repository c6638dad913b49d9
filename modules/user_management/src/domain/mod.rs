pub mod credentials;
pub mod error;
pub mod events;
pub mod identity;
pub mod names;
pub mod notifier;
pub mod ports;
pub mod query;
pub mod repo;
pub mod service;
