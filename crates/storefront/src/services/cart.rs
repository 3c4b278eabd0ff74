//! Cart engine.
//!
//! Owns one session's [`Cart`], keeps the derived count and total current,
//! and writes the full item list to the store after every mutation.
//!
//! Invalid operations (unknown product, out of stock, zero quantity) are
//! no-ops. There is no error channel: the user hears about outcomes through
//! advisories, and persistence failures only reach the log.

use rust_decimal::Decimal;
use tracing::instrument;

use wood_whimsy_core::ProductId;

use crate::catalog::Catalog;
use crate::db::{KeyValueStore, StoreError, load_json, save_json};
use crate::error::add_breadcrumb;
use crate::models::cart::{Cart, CartItem, CartLine};
use crate::models::session_keys;
use crate::services::advisory::{Advisory, AdvisorySink};

/// Cart state for a single session.
pub struct CartEngine<'a> {
    catalog: &'a dyn Catalog,
    store: &'a dyn KeyValueStore,
    advisories: &'a dyn AdvisorySink,
    cart: Cart,
    count: u64,
    total: Decimal,
}

impl<'a> CartEngine<'a> {
    /// Start with an empty cart. Nothing is written until the first mutation.
    #[must_use]
    pub fn new(
        catalog: &'a dyn Catalog,
        store: &'a dyn KeyValueStore,
        advisories: &'a dyn AdvisorySink,
    ) -> Self {
        Self {
            catalog,
            store,
            advisories,
            cart: Cart::new(),
            count: 0,
            total: Decimal::ZERO,
        }
    }

    /// Rehydrate the cart persisted under the `cart` key.
    ///
    /// A value that is not valid JSON, or that breaks the cart invariants, is
    /// logged and removed; the session starts with an empty cart instead.
    #[must_use]
    pub fn restore(
        catalog: &'a dyn Catalog,
        store: &'a dyn KeyValueStore,
        advisories: &'a dyn AdvisorySink,
    ) -> Self {
        let mut engine = Self::new(catalog, store, advisories);
        if let Some(cart) = engine.load() {
            engine.cart = cart;
            engine.recompute();
            tracing::debug!(
                items = engine.cart.len(),
                count = engine.count,
                "Cart restored"
            );
        }
        engine
    }

    fn load(&self) -> Option<Cart> {
        let items = match load_json::<Vec<CartItem>>(self.store, session_keys::CART) {
            Ok(items) => items?,
            Err(e @ StoreError::Corrupt { .. }) => {
                tracing::warn!(error = %e, "Discarding corrupt saved cart");
                self.discard();
                return None;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read saved cart");
                return None;
            }
        };

        match Cart::from_items(items) {
            Ok(cart) => Some(cart),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding invalid saved cart");
                self.discard();
                None
            }
        }
    }

    fn discard(&self) {
        if let Err(e) = self.store.remove(session_keys::CART) {
            tracing::error!(error = %e, "Failed to remove saved cart");
        }
    }

    /// Add `quantity` of a product, merging with an existing item.
    ///
    /// Unknown products and a zero quantity are ignored. An out-of-stock
    /// product is refused with a destructive advisory. Returns whether the
    /// cart changed.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn add_item(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        let Some(product) = self.catalog.product(product_id) else {
            tracing::debug!("Ignoring add of unknown product");
            return false;
        };

        if !product.in_stock {
            tracing::debug!("Refusing add of out-of-stock product");
            self.advisories.emit(Advisory::destructive(
                "Cannot add to cart",
                "This item is currently out of stock.",
            ));
            return false;
        }

        if !self.cart.add(product_id, quantity) {
            tracing::debug!("Ignoring add with zero quantity");
            return false;
        }

        let name = product.name.clone();
        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[("product_id", product_id.as_str())]),
        );
        self.commit();
        self.advisories.emit(Advisory::info(
            "Added to cart",
            format!("{name} has been added to your cart."),
        ));
        true
    }

    /// Remove a product's item. Returns whether one was present.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        if !self.cart.remove(product_id) {
            tracing::debug!("Ignoring remove of product not in cart");
            return false;
        }

        add_breadcrumb(
            "cart",
            "Removed from cart",
            Some(&[("product_id", product_id.as_str())]),
        );
        self.commit();
        if let Some(product) = self.catalog.product(product_id) {
            self.advisories.emit(Advisory::info(
                "Removed from cart",
                format!("{} has been removed from your cart.", product.name),
            ));
        }
        true
    }

    /// Replace the quantity of an item already in the cart, keeping its
    /// position. Zero and absent items are ignored.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        if !self.cart.set_quantity(product_id, quantity) {
            tracing::debug!("Ignoring quantity update");
            return false;
        }

        let quantity = quantity.to_string();
        add_breadcrumb(
            "cart",
            "Updated quantity",
            Some(&[
                ("product_id", product_id.as_str()),
                ("quantity", quantity.as_str()),
            ]),
        );
        self.commit();
        true
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.cart.clear();
        add_breadcrumb("cart", "Cleared cart", None);
        self.commit();
        self.advisories.emit(Advisory::info(
            "Cart cleared",
            "All items have been removed from your cart.",
        ));
    }

    #[must_use]
    pub fn is_in_cart(&self, product_id: &ProductId) -> bool {
        self.cart.contains(product_id)
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    /// Sum of all item quantities.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Sum of effective price times quantity over resolvable items.
    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.total
    }

    /// Items joined with their products, for display.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine<'a>> {
        self.cart.lines(self.catalog)
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    fn recompute(&mut self) {
        self.count = self.cart.count();
        self.total = self.cart.total(self.catalog);
    }

    fn commit(&mut self) {
        self.recompute();
        if let Err(e) = save_json(self.store, session_keys::CART, &self.cart) {
            tracing::error!(error = %e, "Failed to persist cart");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::db::MemoryStore;
    use crate::models::product::fixtures::product;
    use crate::services::advisory::AdvisoryLog;

    fn catalog() -> InMemoryCatalog {
        let mut sold_out = product("3", "bedroom", dec!(1299.99), None);
        sold_out.in_stock = false;
        InMemoryCatalog::without_categories(vec![
            product("1", "living-room", dec!(50), None),
            product("2", "living-room", dec!(100), Some(dec!(80))),
            sold_out,
        ])
        .unwrap()
    }

    fn id(s: &str) -> ProductId {
        ProductId::from(s)
    }

    /// Store that refuses every write.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("read-only")))
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("read-only")))
        }
    }

    #[test]
    fn test_add_same_product_merges() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let log = AdvisoryLog::new();
        let mut cart = CartEngine::new(&catalog, &store, &log);

        assert!(cart.add_item(&id("1"), 2));
        assert!(cart.add_item(&id("1"), 1));

        assert_eq!(
            cart.items(),
            &[CartItem {
                product_id: id("1"),
                quantity: 3
            }]
        );
        assert_eq!(cart.count(), 3);
        assert_eq!(cart.total(), dec!(150));
        assert_eq!(log.last_title().as_deref(), Some("Added to cart"));
    }

    #[test]
    fn test_add_unknown_or_out_of_stock_is_noop() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let log = AdvisoryLog::new();
        let mut cart = CartEngine::new(&catalog, &store, &log);

        assert!(!cart.add_item(&id("missing"), 1));
        assert!(log.drain().is_empty());

        assert!(!cart.add_item(&id("3"), 1));
        let advisories = log.drain();
        assert_eq!(advisories.len(), 1);
        assert!(advisories.first().is_some_and(Advisory::is_destructive));

        assert!(cart.items().is_empty());
        assert_eq!(store.get(session_keys::CART).unwrap(), None);
    }

    #[test]
    fn test_add_zero_quantity_is_noop() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let log = AdvisoryLog::new();
        let mut cart = CartEngine::new(&catalog, &store, &log);

        assert!(!cart.add_item(&id("1"), 0));
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_update_quantity_zero_keeps_value() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let log = AdvisoryLog::new();
        let mut cart = CartEngine::new(&catalog, &store, &log);
        cart.add_item(&id("1"), 1);
        cart.add_item(&id("2"), 1);

        assert!(!cart.update_quantity(&id("1"), 0));
        assert!(cart.update_quantity(&id("1"), 5));
        assert!(!cart.update_quantity(&id("missing"), 5));

        let ids: Vec<_> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
        assert_eq!(cart.count(), 6);
        assert_eq!(cart.total(), dec!(330));
    }

    #[test]
    fn test_remove_emits_only_when_present() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let log = AdvisoryLog::new();
        let mut cart = CartEngine::new(&catalog, &store, &log);
        cart.add_item(&id("2"), 1);
        log.drain();

        assert!(!cart.remove_item(&id("1")));
        assert!(log.drain().is_empty());

        assert!(cart.remove_item(&id("2")));
        assert_eq!(log.last_title().as_deref(), Some("Removed from cart"));
        assert!(!cart.is_in_cart(&id("2")));
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_clear_always_empties() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let log = AdvisoryLog::new();
        let mut cart = CartEngine::new(&catalog, &store, &log);

        cart.clear();
        assert_eq!(log.last_title().as_deref(), Some("Cart cleared"));

        cart.add_item(&id("1"), 4);
        cart.add_item(&id("2"), 2);
        cart.clear();
        assert!(cart.items().is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(store.get(session_keys::CART).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_count_tracks_quantities_over_op_sequence() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let log = AdvisoryLog::new();
        let mut cart = CartEngine::new(&catalog, &store, &log);

        let ops: [(&str, &str, u32); 8] = [
            ("add", "1", 2),
            ("add", "2", 3),
            ("update", "1", 0),
            ("add", "3", 1),
            ("update", "2", 7),
            ("remove", "1", 0),
            ("add", "1", 1),
            ("remove", "missing", 0),
        ];
        for (op, product, quantity) in ops {
            match op {
                "add" => {
                    cart.add_item(&id(product), quantity);
                }
                "update" => {
                    cart.update_quantity(&id(product), quantity);
                }
                _ => {
                    cart.remove_item(&id(product));
                }
            }
            let sum: u64 = cart.items().iter().map(|i| u64::from(i.quantity)).sum();
            assert_eq!(cart.count(), sum);
            assert!(cart.items().iter().all(|i| i.quantity >= 1));
        }
        assert_eq!(cart.count(), 8);
    }

    #[test]
    fn test_every_mutation_persists() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let log = AdvisoryLog::new();

        {
            let mut cart = CartEngine::new(&catalog, &store, &log);
            cart.add_item(&id("2"), 1);
            cart.add_item(&id("1"), 2);
            cart.update_quantity(&id("2"), 4);
        }

        let restored = CartEngine::restore(&catalog, &store, &log);
        let ids: Vec<_> = restored
            .items()
            .iter()
            .map(|i| (i.product_id.as_str(), i.quantity))
            .collect();
        assert_eq!(ids, [("2", 4), ("1", 2)]);
        assert_eq!(restored.count(), 6);
        assert_eq!(restored.total(), dec!(420));
    }

    #[test]
    fn test_restore_invalid_json_gives_empty_cart() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let log = AdvisoryLog::new();
        store.set(session_keys::CART, "{definitely not json").unwrap();

        let cart = CartEngine::restore(&catalog, &store, &log);
        assert!(cart.items().is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(store.get(session_keys::CART).unwrap(), None);
    }

    #[test]
    fn test_restore_rejects_duplicate_items() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let log = AdvisoryLog::new();
        store
            .set(
                session_keys::CART,
                r#"[{"productId":"1","quantity":1},{"productId":"1","quantity":2}]"#,
            )
            .unwrap();

        let cart = CartEngine::restore(&catalog, &store, &log);
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_restore_keeps_unresolved_items_out_of_total() {
        let catalog = catalog();
        let store = MemoryStore::new();
        let log = AdvisoryLog::new();
        store
            .set(
                session_keys::CART,
                r#"[{"productId":"1","quantity":1},{"productId":"retired","quantity":2}]"#,
            )
            .unwrap();

        let cart = CartEngine::restore(&catalog, &store, &log);
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total(), dec!(50));
    }

    #[test]
    fn test_write_failure_keeps_in_memory_state() {
        let catalog = catalog();
        let store = ReadOnlyStore;
        let log = AdvisoryLog::new();
        let mut cart = CartEngine::new(&catalog, &store, &log);

        assert!(cart.add_item(&id("1"), 1));
        assert_eq!(cart.count(), 1);
        assert_eq!(log.last_title().as_deref(), Some("Added to cart"));
    }
}
