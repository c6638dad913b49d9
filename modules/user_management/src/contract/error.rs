use std::fmt;

use thiserror::Error;

/// Status taxonomy exposed to transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    InvalidArgument,
    NotFound,
    Internal,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::InvalidArgument => "INVALID_ARGUMENT",
            Status::NotFound => "NOT_FOUND",
            Status::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserManagementError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("User not found: {id}")]
    NotFound { id: String },

    #[error("Internal error")]
    Internal,
}

impl UserManagementError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn internal() -> Self {
        Self::Internal
    }

    pub fn status(&self) -> Status {
        match self {
            Self::InvalidArgument { .. } => Status::InvalidArgument,
            Self::NotFound { .. } => Status::NotFound,
            Self::Internal => Status::Internal,
        }
    }
}

impl From<crate::domain::error::DomainError> for UserManagementError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            UserNotFound { id } => Self::not_found(id),
            InvalidEmail { email } => Self::invalid_argument(format!("Invalid email: {}", email)),
            Validation { field, message } => {
                Self::invalid_argument(format!("{}: {}", field, message))
            }
            Database { .. } | Hashing { .. } => Self::internal(),
        }
    }
}
