//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for the outer layers (application
//! state, command-line front end). Errors reach the user as an [`Advisory`];
//! internal failures are captured to Sentry before that happens and their
//! details never leave the log.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::db::{RepositoryError, StoreError};
use crate::services::advisory::Advisory;
use crate::services::auth::AuthError;
use crate::services::filter::FilterError;

/// Shown in place of internal error details.
pub const GENERIC_FAILURE: &str = "An unexpected error occurred. Please try again.";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Key-value store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Repository operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Filter parameters are invalid.
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether the error is a failure of the system rather than of the input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        match self {
            Self::Store(_)
            | Self::Repository(_)
            | Self::Catalog(_)
            | Self::Config(_)
            | Self::Internal(_) => true,
            Self::Auth(err) => err.is_unexpected(),
            Self::Filter(_) | Self::NotFound(_) | Self::BadRequest(_) => false,
        }
    }

    /// Message safe to show the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(err) => err.user_message(),
            // Don't expose internal error details to users
            _ if self.is_internal() => GENERIC_FAILURE.to_string(),
            Self::Filter(err) => err.to_string(),
            Self::NotFound(what) => format!("{what} was not found."),
            _ => self.to_string(),
        }
    }

    /// Destructive advisory for this error, reporting internal errors to
    /// Sentry first.
    #[must_use]
    pub fn advisory(&self, title: &str) -> Advisory {
        if self.is_internal() {
            report_unexpected(self);
        }
        Advisory::destructive(title, self.user_message())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Capture an unexpected error to Sentry and log it with the event ID.
pub fn report_unexpected(error: &(dyn std::error::Error + 'static)) {
    let event_id = sentry::capture_error(error);
    tracing::error!(
        error = %error,
        sentry_event_id = %event_id,
        "Unexpected error"
    );
}

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
