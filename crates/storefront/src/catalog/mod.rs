//! Read-only product catalog.
//!
//! The cart and the filter pipeline only see the catalog through the
//! [`Catalog`] trait, so the backing store can change without touching them.
//!
//! # Providers
//!
//! - [`InMemoryCatalog`] - validated product and category lists, built from
//!   the seed data or a JSON file
//! - [`CachedCatalog`] - memoizes filter results of another catalog

mod cache;
pub mod seed;

use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use wood_whimsy_core::{CategoryId, ProductId};

use crate::models::product::{Category, Product};
use crate::services::filter::{self, FilterConfig};

pub use cache::CachedCatalog;

/// Errors raised while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    #[error("duplicate category id: {0}")]
    DuplicateCategory(CategoryId),

    #[error("product {product} references unknown category {category}")]
    UnknownCategory {
        product: ProductId,
        category: CategoryId,
    },

    #[error("product {0} has an invalid price")]
    InvalidPrice(ProductId),

    #[error("product {0} has a discount price above its base price")]
    DiscountAboveBase(ProductId),

    #[error("product {0} has non-positive dimensions")]
    InvalidDimensions(ProductId),
}

/// Query interface over an immutable catalog.
pub trait Catalog: Send + Sync {
    /// All products, in natural catalog order.
    fn products(&self) -> &[Product];

    /// All categories, in display order.
    fn categories(&self) -> &[Category];

    /// Look up a product by ID.
    fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products().iter().find(|p| &p.id == id)
    }

    /// Products listed under a category.
    fn products_in_category(&self, category: &CategoryId) -> Vec<&Product> {
        self.products()
            .iter()
            .filter(|p| &p.category == category)
            .collect()
    }

    /// Other products in the same category, at most `limit` of them.
    ///
    /// Returns an empty list when the product is unknown.
    fn related_products(&self, id: &ProductId, limit: usize) -> Vec<&Product> {
        let Some(current) = self.product(id) else {
            return Vec::new();
        };
        self.products()
            .iter()
            .filter(|p| p.category == current.category && &p.id != id)
            .take(limit)
            .collect()
    }

    /// Products flagged for the home page.
    fn featured_products(&self) -> Vec<&Product> {
        self.products().iter().filter(|p| p.featured).collect()
    }

    fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories().iter().find(|c| &c.id == id)
    }

    /// Display name of a category, or `""` when unknown.
    fn category_name(&self, id: &CategoryId) -> &str {
        self.category(id).map_or("", |c| c.name.as_str())
    }

    /// Run the filter pipeline over the whole catalog.
    fn filter(&self, config: &FilterConfig) -> Arc<[Product]> {
        filter::apply(self.products(), config)
            .into_iter()
            .cloned()
            .collect()
    }
}

/// A validated, in-memory catalog.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    categories: Vec<Category>,
    products: Vec<Product>,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl InMemoryCatalog {
    /// Build a catalog, checking every product and category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if an ID repeats, a product names a category
    /// that does not exist, a price is negative, a discount exceeds the base
    /// price, or a dimension is not positive.
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> Result<Self, CatalogError> {
        for (index, category) in categories.iter().enumerate() {
            if categories
                .iter()
                .take(index)
                .any(|earlier| earlier.id == category.id)
            {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
        }

        for (index, product) in products.iter().enumerate() {
            if products
                .iter()
                .take(index)
                .any(|earlier| earlier.id == product.id)
            {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
            if !categories.is_empty() && !categories.iter().any(|c| c.id == product.category) {
                return Err(CatalogError::UnknownCategory {
                    product: product.id.clone(),
                    category: product.category.clone(),
                });
            }
            validate_product(product)?;
        }

        Ok(Self {
            categories,
            products,
        })
    }

    /// Build a catalog that has products but no category list.
    ///
    /// # Errors
    ///
    /// Same product checks as [`InMemoryCatalog::new`].
    pub fn without_categories(products: Vec<Product>) -> Result<Self, CatalogError> {
        Self::new(Vec::new(), products)
    }

    /// Parse a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON, or any validation
    /// error from [`InMemoryCatalog::new`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.categories, file.products)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, otherwise as
    /// [`InMemoryCatalog::from_json`].
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            products = catalog.products.len(),
            categories = catalog.categories.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }
}

impl Catalog for InMemoryCatalog {
    fn products(&self) -> &[Product] {
        &self.products
    }

    fn categories(&self) -> &[Category] {
        &self.categories
    }
}

fn validate_product(product: &Product) -> Result<(), CatalogError> {
    if product.price < Decimal::ZERO {
        return Err(CatalogError::InvalidPrice(product.id.clone()));
    }
    if let Some(discount) = product.discount_price {
        if discount < Decimal::ZERO {
            return Err(CatalogError::InvalidPrice(product.id.clone()));
        }
        if discount > product.price {
            return Err(CatalogError::DiscountAboveBase(product.id.clone()));
        }
    }
    if !product.dimensions.is_valid() {
        return Err(CatalogError::InvalidDimensions(product.id.clone()));
    }
    Ok(())
}
