//! Cart state.
//!
//! A [`Cart`] only records product references and quantities. Prices are
//! always resolved against the catalog, so totals follow the catalog rather
//! than whatever was current when an item was added.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use wood_whimsy_core::ProductId;

use crate::catalog::Catalog;
use crate::models::product::Product;

/// A product reference with a quantity of at least one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Ordered cart contents, one entry per product, in insertion order.
///
/// Only `Serialize` is derived; stored carts come back through
/// [`Cart::from_items`] so the invariants are checked on the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

/// Why a persisted cart was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartInvariantError {
    #[error("item {0} has a zero quantity")]
    ZeroQuantity(ProductId),
    #[error("product {0} appears more than once")]
    DuplicateProduct(ProductId),
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from stored items, checking the per-item invariants.
    ///
    /// # Errors
    ///
    /// Returns `CartInvariantError` if an item has a zero quantity or a product
    /// is listed twice.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, CartInvariantError> {
        for (index, item) in items.iter().enumerate() {
            if item.quantity == 0 {
                return Err(CartInvariantError::ZeroQuantity(item.product_id.clone()));
            }
            if items
                .iter()
                .take(index)
                .any(|earlier| earlier.product_id == item.product_id)
            {
                return Err(CartInvariantError::DuplicateProduct(
                    item.product_id.clone(),
                ));
            }
        }
        Ok(Self { items })
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.product_id == product_id)
    }

    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> Option<u32> {
        self.items
            .iter()
            .find(|item| &item.product_id == product_id)
            .map(|item| item.quantity)
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of effective unit price times quantity over every item that still
    /// resolves in the catalog.
    #[must_use]
    pub fn total(&self, catalog: &dyn Catalog) -> Decimal {
        self.lines(catalog).iter().map(CartLine::line_total).sum()
    }

    /// Resolve items against the catalog, skipping unknown products.
    #[must_use]
    pub fn lines<'c>(&self, catalog: &'c dyn Catalog) -> Vec<CartLine<'c>> {
        self.items
            .iter()
            .filter_map(|item| {
                catalog.product(&item.product_id).map(|product| CartLine {
                    product,
                    quantity: item.quantity,
                })
            })
            .collect()
    }

    /// Increase the quantity of an existing item, or append a new one.
    ///
    /// A zero quantity leaves the cart untouched and returns `false`.
    pub(crate) fn add(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        match self
            .items
            .iter_mut()
            .find(|item| &item.product_id == product_id)
        {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.items.push(CartItem {
                product_id: product_id.clone(),
                quantity,
            }),
        }
        true
    }

    /// Remove an item. Returns whether one was present.
    pub(crate) fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.product_id != product_id);
        self.items.len() != before
    }

    /// Replace the quantity of an existing item in place.
    pub(crate) fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        self.items
            .iter_mut()
            .find(|item| &item.product_id == product_id)
            .is_some_and(|item| {
                item.quantity = quantity;
                true
            })
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}

/// A cart item joined with its catalog product.
#[derive(Debug, Clone, Copy)]
pub struct CartLine<'c> {
    pub product: &'c Product,
    pub quantity: u32,
}

impl CartLine<'_> {
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.product.effective_price()
    }

    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }
}
