//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::error::{GENERIC_FAILURE, report_unexpected};
use crate::services::advisory::Advisory;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] wood_whimsy_core::EmailError),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Signup without a display name.
    #[error("name is required")]
    MissingName,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Repository/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// Whether this is a collaborator failure rather than a rejected request.
    #[must_use]
    pub const fn is_unexpected(&self) -> bool {
        matches!(self, Self::Repository(_) | Self::PasswordHash)
    }

    /// Message safe to show the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCredentials => "Invalid email or password. Please try again.".to_string(),
            Self::UserAlreadyExists => "An account with this email already exists.".to_string(),
            Self::InvalidEmail(_) => "Please enter a valid email address.".to_string(),
            Self::MissingName => "Please enter your name.".to_string(),
            Self::WeakPassword(msg) => msg.clone(),
            // Don't expose internal error details to users
            Self::Repository(_) | Self::PasswordHash => GENERIC_FAILURE.to_string(),
        }
    }

    /// Destructive advisory for this failure.
    ///
    /// Unexpected failures are reported to Sentry first.
    #[must_use]
    pub fn advisory(&self, title: &str) -> Advisory {
        if self.is_unexpected() {
            report_unexpected(self);
        }
        Advisory::destructive(title, self.user_message())
    }
}
