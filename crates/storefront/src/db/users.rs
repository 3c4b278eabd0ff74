//! User repository for account storage.
//!
//! Accounts live as one JSON array under the `accounts` key. Emails are
//! stored lower-cased and matched case-insensitively.

use chrono::Utc;

use wood_whimsy_core::{Email, UserId};

use super::{KeyValueStore, RepositoryError, load_json, save_json};
use crate::models::session_keys;
use crate::models::user::{StoredAccount, User};

/// Repository for user account operations.
pub struct UserRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    fn load(&self) -> Result<Vec<StoredAccount>, RepositoryError> {
        let accounts: Vec<StoredAccount> =
            load_json(self.store, session_keys::ACCOUNTS)?.unwrap_or_default();

        for (index, account) in accounts.iter().enumerate() {
            if accounts
                .iter()
                .take(index)
                .any(|earlier| earlier.user.email == account.user.email)
            {
                return Err(RepositoryError::DataCorruption(format!(
                    "duplicate account email: {}",
                    account.user.email
                )));
            }
        }
        Ok(accounts)
    }

    fn save(&self, accounts: &[StoredAccount]) -> Result<(), RepositoryError> {
        save_json(self.store, session_keys::ACCOUNTS, accounts)?;
        Ok(())
    }

    /// Whether no accounts exist yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the account table cannot be read.
    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.load()?.is_empty())
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the account table cannot be read.
    pub fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self.get_password_hash(email)?.map(|(user, _)| user))
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the account table cannot be read.
    pub fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .load()?
            .into_iter()
            .find(|a| a.user.id == id)
            .map(|a| a.user))
    }

    /// Get a user together with their password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the account table cannot be read.
    pub fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        Ok(self
            .load()?
            .into_iter()
            .find(|a| &a.user.email == email)
            .map(|a| (a.user, a.password_hash)))
    }

    /// Create a new user with a password hash.
    ///
    /// The new user gets the next ID after the highest existing one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Store` if the account table cannot be
    /// read or written.
    pub fn create_with_password(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<User, RepositoryError> {
        let mut accounts = self.load()?;

        if accounts.iter().any(|a| &a.user.email == email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let id = accounts
            .iter()
            .map(|a| a.user.id)
            .max()
            .map_or(UserId::new(1), |max| max.next());

        let user = User {
            id,
            email: email.clone(),
            name: name.to_owned(),
            is_admin,
            created_at: Utc::now(),
        };

        accounts.push(StoredAccount {
            user: user.clone(),
            password_hash: password_hash.to_owned(),
        });
        self.save(&accounts)?;

        tracing::info!(user_id = %user.id, "Account created");
        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::{MemoryStore, StoreError};

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let users = UserRepository::new(&store);
        assert!(users.is_empty().unwrap());

        let first = users
            .create_with_password("Admin", &email("admin@test.com"), "h1", true)
            .unwrap();
        let second = users
            .create_with_password("User", &email("user@test.com"), "h2", false)
            .unwrap();

        assert_eq!(first.id, UserId::new(1));
        assert_eq!(second.id, UserId::new(2));
        assert!(first.is_admin);
        assert!(!second.is_admin);
    }

    #[test]
    fn test_create_rejects_duplicate_email_any_case() {
        let store = MemoryStore::new();
        let users = UserRepository::new(&store);
        users
            .create_with_password("A", &email("user@test.com"), "h", false)
            .unwrap();

        let result = users.create_with_password("B", &email("USER@Test.com"), "h", false);
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let store = MemoryStore::new();
        let users = UserRepository::new(&store);
        let created = users
            .create_with_password("Mixed", &email("Mixed.Case@Test.com"), "hash", false)
            .unwrap();
        assert_eq!(created.email.as_str(), "mixed.case@test.com");

        let (user, hash) = users
            .get_password_hash(&email("MIXED.case@test.COM"))
            .unwrap()
            .unwrap();
        assert_eq!(user.id, created.id);
        assert_eq!(hash, "hash");
        assert_eq!(users.get_by_id(created.id).unwrap().unwrap().name, "Mixed");
        assert!(users.get_by_email(&email("nobody@test.com")).unwrap().is_none());
    }

    #[test]
    fn test_hand_edited_table_is_read_lower_cased() {
        let store = MemoryStore::new();
        store
            .set(
                session_keys::ACCOUNTS,
                r#"[{"id":4,"email":"Oak@Test.com","name":"Oak","isAdmin":false,
                     "createdAt":"2024-01-01T00:00:00Z","passwordHash":"h"}]"#,
            )
            .unwrap();
        let users = UserRepository::new(&store);
        let user = users.get_by_email(&email("oak@test.com")).unwrap().unwrap();
        assert_eq!(user.email.as_str(), "oak@test.com");

        store
            .set(
                session_keys::ACCOUNTS,
                r#"[{"id":1,"email":"Oak@Test.com","name":"A","isAdmin":false,
                     "createdAt":"2024-01-01T00:00:00Z","passwordHash":"h"},
                    {"id":2,"email":"oak@test.com","name":"B","isAdmin":false,
                     "createdAt":"2024-01-01T00:00:00Z","passwordHash":"h"}]"#,
            )
            .unwrap();
        assert!(matches!(
            users.is_empty(),
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_corrupt_table_is_reported() {
        let store = MemoryStore::new();
        store.set(session_keys::ACCOUNTS, "oops").unwrap();
        let users = UserRepository::new(&store);
        assert!(matches!(
            users.is_empty(),
            Err(RepositoryError::Store(StoreError::Corrupt { .. }))
        ));
    }
}
