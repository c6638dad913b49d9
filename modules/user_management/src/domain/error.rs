use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {id}")]
    UserNotFound { id: String },

    #[error("Invalid email format: '{email}'")]
    InvalidEmail { email: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Password hashing failed: {message}")]
    Hashing { message: String },
}

impl DomainError {
    pub fn user_not_found(id: impl Into<String>) -> Self {
        Self::UserNotFound { id: id.into() }
    }

    pub fn invalid_email(email: impl Into<String>) -> Self {
        Self::InvalidEmail {
            email: email.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
        }
    }

    /// True for errors caused by caller input, detected before any store call.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidEmail { .. } | Self::Validation { .. })
    }
}

/// Failure to deliver a lifecycle event. Never propagated to callers;
/// handed to a [`NotificationErrorSink`](crate::domain::ports::NotificationErrorSink).
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Could not encode event: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Broker transport error: {message}")]
    Transport { message: String },

    #[error("Broker rejected event with HTTP {status}")]
    Rejected { status: u16 },
}

impl NotificationError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}
