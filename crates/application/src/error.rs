//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Requested record does not exist or belongs to another trainer
    #[error("{0} not found")]
    NotFound(String),

    /// User not authorized
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// A configured quota was reached
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    /// Delivering a reply to the chat platform failed
    #[error("Messenger error: {0}")]
    Messenger(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Messenger(_))
    }

    /// Whether the error is caused by the user's request rather than a fault
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::NotAuthorized(_) | Self::LimitExceeded(_) | Self::Domain(_)
        )
    }
}
