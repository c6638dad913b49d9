//! One-way credential hashing.

use crate::domain::error::DomainError;

/// Work factor used when nothing else is configured.
pub const DEFAULT_COST: u32 = 14;

/// Work factors bcrypt accepts.
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// Port for the salted one-way transform applied to passwords before they
/// leave the service.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, DomainError>;

    fn verify(&self, plaintext: &str, hashed: &str) -> Result<bool, DomainError>;
}

/// bcrypt with a fixed cost; every hash carries its own random salt.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl CredentialHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| DomainError::hashing(e.to_string()))
    }

    fn verify(&self, plaintext: &str, hashed: &str) -> Result<bool, DomainError> {
        bcrypt::verify(plaintext, hashed).map_err(|e| DomainError::hashing(e.to_string()))
    }
}
