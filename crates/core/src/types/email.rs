//! Account email addresses.
//!
//! Addresses are compared case-insensitively, so an [`Email`] only ever holds
//! the trimmed, lower-cased form. Two accounts typed as `Admin@Shop.com` and
//! `admin@shop.com` are the same `Email`.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why an address was refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,

    #[error("email must be at most {max} characters")]
    TooLong { max: usize },

    /// Not of the form `name@domain`.
    #[error("email must look like name@domain")]
    Malformed,
}

/// A lower-cased account email address.
///
/// ```
/// use wood_whimsy_core::Email;
///
/// let email = Email::parse("  Admin@WoodAndWhimsy.com ").unwrap();
/// assert_eq!(email.as_str(), "admin@woodandwhimsy.com");
/// assert!(Email::parse("no-at-symbol").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// RFC 5321 limit on a forward path.
    pub const MAX_LENGTH: usize = 254;

    /// Trim, validate and lower-case an address.
    ///
    /// Exactly one `@` is required, with text on both sides of it.
    ///
    /// # Errors
    ///
    /// Returns `EmailError` if the trimmed input is empty, longer than
    /// [`Self::MAX_LENGTH`], or not of the form `name@domain`.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        match s.split_once('@') {
            Some((name, domain))
                if !name.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(s.to_lowercase()))
            }
            _ => Err(EmailError::Malformed),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Stored accounts go back through `parse`, so hand-edited data is
// lower-cased on load too.
impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
