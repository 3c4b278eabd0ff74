//! Application state shared across sessions.
//!
//! [`AppState`] owns the process-wide, read-only pieces (configuration,
//! catalog, store). Each user session borrows them through a
//! [`StorefrontSession`], which owns that session's cart and identity.

use std::sync::Arc;

use wood_whimsy_core::ProductId;

use crate::catalog::{CachedCatalog, Catalog, InMemoryCatalog, seed};
use crate::config::StorefrontConfig;
use crate::db::{FileStore, KeyValueStore};
use crate::error::{AppError, Result};
use crate::models::product::Product;
use crate::services::advisory::AdvisorySink;
use crate::services::auth::AuthService;
use crate::services::cart::CartEngine;
use crate::services::checkout::OrderSummary;
use crate::services::filter::FilterConfig;

/// Application state shared across all sessions.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CachedCatalog<InMemoryCatalog>,
    store: Box<dyn KeyValueStore>,
}

impl AppState {
    /// Create application state from its parts.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: InMemoryCatalog,
        store: impl KeyValueStore + 'static,
    ) -> Self {
        let catalog = CachedCatalog::new(catalog, config.cache_capacity);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                store: Box::new(store),
            }),
        }
    }

    /// Load the catalog and open the file store named by the configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if the catalog file cannot be loaded and
    /// `AppError::Store` if the data directory cannot be created.
    pub fn from_config(config: StorefrontConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => InMemoryCatalog::from_file(path)?,
            None => seed::catalog()?,
        };
        let store = FileStore::open(&config.data_dir)?;
        tracing::info!(
            data_dir = %config.data_dir.display(),
            products = catalog.products().len(),
            "Storefront state ready"
        );
        Ok(Self::new(config, catalog, store))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog.
    #[must_use]
    pub fn catalog(&self) -> &CachedCatalog<InMemoryCatalog> {
        &self.inner.catalog
    }

    /// Get a reference to the persistence store.
    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.inner.store.as_ref()
    }

    /// Look up a product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown ID.
    pub fn product(&self, id: &ProductId) -> Result<&Product> {
        self.catalog()
            .product(id)
            .ok_or_else(|| AppError::NotFound(format!("Product {id}")))
    }

    /// Related products, capped at the configured limit.
    #[must_use]
    pub fn related_products(&self, id: &ProductId) -> Arc<[Product]> {
        self.catalog()
            .related_cached(id, self.config().related_limit)
    }

    /// Run a listing query through the cached catalog.
    #[must_use]
    pub fn listing(&self, filter: &FilterConfig) -> Arc<[Product]> {
        self.catalog().filter(filter)
    }

    /// Rehydrate the saved cart and identity into a session.
    #[must_use]
    pub fn open_session<'s>(&'s self, advisories: &'s dyn AdvisorySink) -> StorefrontSession<'s> {
        let catalog: &dyn Catalog = self.catalog();
        StorefrontSession {
            cart: CartEngine::restore(catalog, self.store(), advisories),
            auth: AuthService::restore(self.store(), advisories, self.config().auth_latency),
        }
    }
}

/// Per-session state: one cart and one signed-in identity.
pub struct StorefrontSession<'s> {
    pub cart: CartEngine<'s>,
    pub auth: AuthService<'s>,
}

impl StorefrontSession<'_> {
    /// Price the current cart with a shipping option.
    #[must_use]
    pub fn checkout(&self, shipping_id: &str) -> OrderSummary {
        OrderSummary::for_cart(&self.cart, shipping_id)
    }
}
