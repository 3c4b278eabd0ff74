//! Session-related types.
//!
//! Types persisted in the session store for authentication and cart state.

use serde::{Deserialize, Serialize};

use wood_whimsy_core::{Email, UserId};

use super::user::User;

/// Session-stored user identity.
///
/// The password hash never leaves the account store; this is the record
/// handed back from login and signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// User's ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Whether the user may use administrative views.
    pub is_admin: bool,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// Keys under which session data is persisted.
pub mod keys {
    /// Key for the cart item list.
    pub const CART: &str = "cart";

    /// Key for the signed-in user.
    pub const USER: &str = "user";

    /// Key for the account table.
    pub const ACCOUNTS: &str = "accounts";
}
