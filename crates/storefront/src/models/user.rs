//! User domain types.
//!
//! These types represent stored accounts. They are separate from
//! [`CurrentUser`](super::session::CurrentUser), which is what a session sees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wood_whimsy_core::{Email, UserId};

/// A storefront user (domain type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address, lower-cased.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Whether the user is an administrator.
    pub is_admin: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

/// A user together with their Argon2 password hash, as kept in the account
/// store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAccount {
    #[serde(flatten)]
    pub user: User,
    /// PHC-format Argon2id hash.
    pub password_hash: String,
}
