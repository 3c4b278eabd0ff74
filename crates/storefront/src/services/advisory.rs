//! User-facing notifications.
//!
//! An [`Advisory`] is fire-and-forget feedback ("Added to cart", "Login
//! failed"). Services emit them through an [`AdvisorySink`] and never branch
//! on the outcome.

use std::sync::{Mutex, PoisonError};

/// How prominently an advisory should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    /// Something the user asked for did not happen.
    Destructive,
}

/// A one-way notification for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Advisory {
    #[must_use]
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }

    #[must_use]
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }

    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }
}

/// Destination for advisories.
pub trait AdvisorySink: Send + Sync {
    fn emit(&self, advisory: Advisory);
}

/// Writes advisories to the log and nowhere else.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAdvisories;

impl AdvisorySink for LogAdvisories {
    fn emit(&self, advisory: Advisory) {
        match advisory.severity {
            Severity::Info => tracing::info!(
                title = %advisory.title,
                description = %advisory.description,
                "Advisory"
            ),
            Severity::Destructive => tracing::warn!(
                title = %advisory.title,
                description = %advisory.description,
                "Advisory"
            ),
        }
    }
}

/// Keeps advisories until someone drains them.
#[derive(Debug, Default)]
pub struct AdvisoryLog {
    entries: Mutex<Vec<Advisory>>,
}

impl AdvisoryLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything emitted so far.
    #[must_use]
    pub fn drain(&self) -> Vec<Advisory> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *entries)
    }

    /// Copy of everything emitted so far.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Advisory> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Title of the most recent advisory.
    #[must_use]
    pub fn last_title(&self) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .map(|a| a.title.clone())
    }
}

impl AdvisorySink for AdvisoryLog {
    fn emit(&self, advisory: Advisory) {
        tracing::debug!(title = %advisory.title, "Advisory recorded");
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(advisory);
    }
}
