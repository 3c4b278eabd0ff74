//! Integration tests for Wood & Whimsy.
//!
//! Tests drive the storefront library through its public API against a
//! file-backed store in a temporary directory, the same way `ww-cli` does.
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart survives restarts, corrupt data recovery
//! - `session_flow` - Login, signup, logout across restarts
//! - `catalog_listing` - Filter pipeline over the built-in and JSON catalogs

use std::path::Path;

use tempfile::TempDir;

use wood_whimsy_storefront::config::StorefrontConfig;
use wood_whimsy_storefront::state::AppState;

/// A storefront rooted in its own temporary data directory.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Create an empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Configuration pointing at this context's data directory.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            data_dir: self.dir.path().join("data"),
            ..StorefrontConfig::default()
        }
    }

    /// Open the storefront as a fresh process would.
    ///
    /// # Panics
    ///
    /// Panics if the state cannot be built.
    #[must_use]
    pub fn start(&self) -> AppState {
        self.start_with(self.config())
    }

    /// Open the storefront with a custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if the state cannot be built.
    #[must_use]
    pub fn start_with(&self, config: StorefrontConfig) -> AppState {
        AppState::from_config(config).expect("Failed to build storefront state")
    }

    /// Write a file into the data directory, replacing the stored value for
    /// `key`.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write_raw(&self, key: &str, contents: &str) {
        let dir = self.dir.path().join("data");
        std::fs::create_dir_all(&dir).expect("Failed to create data dir");
        std::fs::write(dir.join(format!("{key}.json")), contents).expect("Failed to write value");
    }

    /// Read the raw stored value for `key`, if any.
    #[must_use]
    pub fn read_raw(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.dir.path().join("data").join(format!("{key}.json"))).ok()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
