//! Authentication service.
//!
//! Password login and signup against the account store, plus the signed-in
//! identity of the session. Passwords are only ever stored as Argon2id
//! hashes.
//!
//! Every outcome is reported through an advisory. `login` and `signup` also
//! return a `Result` so callers can branch on success, but failures are
//! never fatal: the session simply stays signed out.

mod error;

pub use error::AuthError;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use wood_whimsy_core::Email;

use crate::db::users::UserRepository;
use crate::db::{KeyValueStore, RepositoryError, StoreError, load_json, save_json};
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::models::session::CurrentUser;
use crate::models::session_keys;
use crate::services::advisory::{Advisory, AdvisorySink};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Password shared by the demo accounts.
pub const DEMO_PASSWORD: &str = "password123";

/// Accounts created on an empty account store: (name, email, is admin).
pub const DEMO_ACCOUNTS: [(&str, &str, bool); 2] = [
    ("Admin User", "admin@woodandwhimsy.com", true),
    ("Regular User", "user@example.com", false),
];

/// Authentication service for one session.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    store: &'a dyn KeyValueStore,
    advisories: &'a dyn AdvisorySink,
    latency: Duration,
    current: Mutex<Option<CurrentUser>>,
    loading: AtomicBool,
}

/// Clears the loading flag when an attempt finishes or is dropped.
struct LoadingGuard<'f>(&'f AtomicBool);

impl<'f> LoadingGuard<'f> {
    fn begin(flag: &'f AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<'a> AuthService<'a> {
    /// Create a signed-out authentication service.
    ///
    /// `latency` is awaited before every login and signup to stand in for
    /// the identity provider's round trip.
    #[must_use]
    pub fn new(
        store: &'a dyn KeyValueStore,
        advisories: &'a dyn AdvisorySink,
        latency: Duration,
    ) -> Self {
        Self {
            users: UserRepository::new(store),
            store,
            advisories,
            latency,
            current: Mutex::new(None),
            loading: AtomicBool::new(false),
        }
    }

    /// Create the service and pick up a signed-in user saved by an earlier
    /// session.
    ///
    /// A saved identity that fails to parse is logged and removed.
    #[must_use]
    pub fn restore(
        store: &'a dyn KeyValueStore,
        advisories: &'a dyn AdvisorySink,
        latency: Duration,
    ) -> Self {
        let service = Self::new(store, advisories, latency);
        match load_json::<CurrentUser>(store, session_keys::USER) {
            Ok(Some(user)) => {
                tracing::debug!(user_id = %user.id, "Session restored");
                set_sentry_user(&user.id, Some(user.email.as_str()));
                service.set_current(Some(user));
            }
            Ok(None) => {}
            Err(e @ StoreError::Corrupt { .. }) => {
                tracing::warn!(error = %e, "Discarding corrupt saved user");
                if let Err(e) = store.remove(session_keys::USER) {
                    tracing::error!(error = %e, "Failed to remove saved user");
                }
            }
            Err(e) => tracing::error!(error = %e, "Failed to read saved user"),
        }
        service
    }

    /// Create the demo accounts if the account store is empty.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the account store cannot be read or
    /// written, or `AuthError::PasswordHash` if hashing fails.
    pub fn ensure_demo_accounts(&self) -> Result<(), AuthError> {
        if !self.users.is_empty()? {
            return Ok(());
        }
        for (name, email, is_admin) in DEMO_ACCOUNTS {
            let email = Email::parse(email)?;
            let hash = hash_password(DEMO_PASSWORD)?;
            self.users
                .create_with_password(name, &email, &hash, is_admin)?;
        }
        tracing::info!(accounts = DEMO_ACCOUNTS.len(), "Demo accounts created");
        Ok(())
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Whether a login or signup is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    fn set_current(&self, user: Option<CurrentUser>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = user;
    }

    fn sign_in(&self, user: CurrentUser) {
        if let Err(e) = save_json(self.store, session_keys::USER, &user) {
            tracing::error!(error = %e, "Failed to persist signed-in user");
        }
        set_sentry_user(&user.id, Some(user.email.as_str()));
        self.set_current(Some(user));
    }

    /// Sign out and forget the saved identity.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        self.set_current(None);
        if let Err(e) = self.store.remove(session_keys::USER) {
            tracing::error!(error = %e, "Failed to remove saved user");
        }
        clear_sentry_user();
        tracing::info!("User logged out");
        self.advisories.emit(Advisory::info(
            "Logged out",
            "You have been successfully logged out.",
        ));
    }

    async fn simulate_round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    // =========================================================================
    // Password Authentication
    // =========================================================================

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is malformed,
    /// unknown, or the password does not match. Storage and hashing failures
    /// come back as their own variants and are reported with a generic
    /// advisory.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<CurrentUser, AuthError> {
        let _loading = LoadingGuard::begin(&self.loading);
        self.simulate_round_trip().await;

        match self.check_password(email, password) {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "User logged in");
                self.advisories.emit(Advisory::info(
                    "Login successful",
                    format!("Welcome back, {}!", user.name),
                ));
                self.sign_in(user.clone());
                Ok(user)
            }
            Err(e) => {
                let title = if e.is_unexpected() {
                    "Login error"
                } else {
                    tracing::info!("Login rejected");
                    "Login failed"
                };
                self.advisories.emit(e.advisory(title));
                Err(e)
            }
        }
    }

    fn check_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<CurrentUser, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;
        let (user, password_hash) = self
            .users
            .get_password_hash(&email)?
            .ok_or(AuthError::InvalidCredentials)?;
        verify_password(password.expose_secret(), &password_hash)?;
        Ok(CurrentUser::from(&user))
    }

    /// Register a new user and sign them in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingName` for a blank name,
    /// `AuthError::InvalidEmail` if the email format is invalid,
    /// `AuthError::WeakPassword` if the password is too short, and
    /// `AuthError::UserAlreadyExists` if the email is already registered.
    #[instrument(skip(self, name, password))]
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<CurrentUser, AuthError> {
        let _loading = LoadingGuard::begin(&self.loading);
        self.simulate_round_trip().await;

        match self.register(name, email, password) {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "User signed up");
                self.advisories.emit(Advisory::info(
                    "Account created",
                    format!(
                        "Welcome, {}! Your account has been created successfully.",
                        user.name
                    ),
                ));
                self.sign_in(user.clone());
                Ok(user)
            }
            Err(e) => {
                let title = if e.is_unexpected() {
                    "Signup error"
                } else {
                    tracing::info!(error = %e, "Signup rejected");
                    "Signup failed"
                };
                self.advisories.emit(e.advisory(title));
                Err(e)
            }
        }
    }

    fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<CurrentUser, AuthError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingName);
        }
        let email = Email::parse(email)?;
        validate_password(password.expose_secret())?;
        let password_hash = hash_password(password.expose_secret())?;

        let user = self
            .users
            .create_with_password(name, &email, &password_hash, false)
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(CurrentUser::from(&user))
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters."
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
