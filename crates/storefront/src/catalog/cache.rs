//! Filter result cache.
//!
//! The catalog never changes while the process runs, so a filter result is
//! valid for as long as the cache keeps it.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use wood_whimsy_core::ProductId;

use super::Catalog;
use crate::models::product::{Category, Product};
use crate::services::filter::FilterConfig;

/// Idle entries are dropped after this long.
const CACHE_IDLE: Duration = Duration::from_secs(10 * 60);

/// Cache key for catalog queries.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Filter(FilterConfig),
    Related { id: ProductId, limit: usize },
}

/// A catalog that memoizes listing queries of another catalog.
pub struct CachedCatalog<C> {
    inner: C,
    cache: Cache<CacheKey, Arc<[Product]>>,
}

impl<C: Catalog> CachedCatalog<C> {
    /// Wrap `inner` with a cache holding at most `capacity` results.
    #[must_use]
    pub fn new(inner: C, capacity: u64) -> Self {
        Self {
            inner,
            cache: Cache::builder()
                .max_capacity(capacity)
                .time_to_idle(CACHE_IDLE)
                .build(),
        }
    }

    /// Related products as owned values, cached per product and limit.
    #[must_use]
    pub fn related_cached(&self, id: &ProductId, limit: usize) -> Arc<[Product]> {
        let key = CacheKey::Related {
            id: id.clone(),
            limit,
        };
        self.cache.get_with(key, || {
            self.inner
                .related_products(id, limit)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    /// Number of cached results.
    #[must_use]
    pub fn cached_entries(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    #[must_use]
    pub const fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Catalog> Catalog for CachedCatalog<C> {
    fn products(&self) -> &[Product] {
        self.inner.products()
    }

    fn categories(&self) -> &[Category] {
        self.inner.categories()
    }

    fn filter(&self, config: &FilterConfig) -> Arc<[Product]> {
        let key = CacheKey::Filter(config.clone());
        if let Some(hit) = self.cache.get(&key) {
            tracing::trace!(?config, "Filter cache hit");
            return hit;
        }
        let result = self.inner.filter(config);
        self.cache.insert(key, Arc::clone(&result));
        result
    }
}
