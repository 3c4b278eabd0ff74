//! Persistence for session state and accounts.
//!
//! Everything the storefront persists is a JSON blob under a fixed key (see
//! [`session_keys`](crate::models::session_keys)):
//!
//! - `cart` - the cart item list
//! - `user` - the signed-in user
//! - `accounts` - the account table behind [`users::UserRepository`]
//!
//! The store is injected, so the same services run against
//! [`MemoryStore`] in tests and [`FileStore`] from the command line.

mod store;
pub mod users;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use store::{FileStore, MemoryStore};

/// Errors from the key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key contains characters the backend cannot store.
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),

    /// A stored value did not parse as the expected JSON shape.
    #[error("corrupt value under {key:?}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized.
    #[error("failed to serialize value for {key:?}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from repositories built on the store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Stored data breaks an invariant.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Synchronous key-value storage of JSON text.
///
/// Methods take `&self`; implementations use interior mutability.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Insert or replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the value under `key`. Absent keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Read and parse a JSON value.
///
/// # Errors
///
/// Returns `StoreError::Corrupt` if the stored text is not valid JSON for
/// `T`, or any error from the store.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Corrupt {
            key: key.to_owned(),
            source,
        })
}

/// Serialize and write a JSON value.
///
/// # Errors
///
/// Returns `StoreError::Serialize` if `value` cannot be encoded, or any error
/// from the store.
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
        key: key.to_owned(),
        source,
    })?;
    store.set(key, &json)
}
