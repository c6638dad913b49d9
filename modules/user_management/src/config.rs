use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::domain::credentials::{MAX_COST, MIN_COST};

/// Configuration for the user_management module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserManagementConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

/// Where and how lifecycle events are published.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationsConfig {
    /// Broker HTTP endpoint. Events are only logged when unset.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_topic")]
    pub topic: String,
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for UserManagementConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            bcrypt_cost: default_bcrypt_cost(),
            notifications: NotificationsConfig::default(),
        }
    }
}

impl UserManagementConfig {
    /// Reject settings the service could only fail on at request time.
    pub fn validate(&self) -> Result<()> {
        if self.max_page_size == 0 || i64::try_from(self.max_page_size).is_err() {
            bail!(
                "max_page_size must be between 1 and {} (got {})",
                i64::MAX,
                self.max_page_size
            );
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            bail!(
                "default_page_size must be between 1 and max_page_size ({}) (got {})",
                self.max_page_size,
                self.default_page_size
            );
        }
        if !(MIN_COST..=MAX_COST).contains(&self.bcrypt_cost) {
            bail!(
                "bcrypt_cost must be between {} and {} (got {})",
                MIN_COST,
                MAX_COST,
                self.bcrypt_cost
            );
        }
        if self.notifications.max_in_flight == 0 {
            bail!("notifications.max_in_flight must be at least 1");
        }
        Ok(())
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            topic: default_topic(),
            max_in_flight: default_max_in_flight(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_page_size() -> u64 {
    10
}

fn default_max_page_size() -> u64 {
    1000
}

fn default_bcrypt_cost() -> u32 {
    crate::domain::credentials::DEFAULT_COST
}

fn default_topic() -> String {
    crate::domain::notifier::DEFAULT_TOPIC.to_string()
}

fn default_max_in_flight() -> usize {
    crate::domain::notifier::DEFAULT_MAX_IN_FLIGHT
}

fn default_timeout_ms() -> u64 {
    5000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(UserManagementConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_default_page_size_outside_bounds() {
        for size in [0, 1001] {
            let cfg = UserManagementConfig {
                default_page_size: size,
                ..UserManagementConfig::default()
            };
            let err = cfg.validate().unwrap_err();
            assert!(err.to_string().contains("default_page_size"), "{err}");
        }
    }

    #[test]
    fn rejects_max_page_size_beyond_signed_range() {
        let cfg = UserManagementConfig {
            max_page_size: u64::MAX,
            ..UserManagementConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_bcrypt_cost_outside_bcrypt_range() {
        for cost in [0, 3, 32] {
            let cfg = UserManagementConfig {
                bcrypt_cost: cost,
                ..UserManagementConfig::default()
            };
            let err = cfg.validate().unwrap_err();
            assert!(err.to_string().contains("bcrypt_cost"), "{err}");
        }
        let cfg = UserManagementConfig {
            bcrypt_cost: 4,
            ..UserManagementConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_zero_in_flight_notifications() {
        let mut cfg = UserManagementConfig::default();
        cfg.notifications.max_in_flight = 0;
        assert!(cfg.validate().is_err());
    }
}
