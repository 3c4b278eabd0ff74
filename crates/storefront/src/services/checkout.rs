//! Checkout summary.
//!
//! There is no payment step. Checkout only prices the cart against a
//! shipping option.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use wood_whimsy_core::Price;

use crate::services::cart::CartEngine;

/// A delivery choice offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingOption {
    pub id: &'static str,
    pub name: &'static str,
    pub price: Decimal,
    pub estimated_days: &'static str,
}

pub const FREE_SHIPPING: ShippingOption = ShippingOption {
    id: "free",
    name: "Free Shipping",
    price: Decimal::ZERO,
    estimated_days: "7-14 business days",
};

pub const STANDARD_SHIPPING: ShippingOption = ShippingOption {
    id: "standard",
    name: "Standard Shipping",
    price: dec!(10),
    estimated_days: "5-7 business days",
};

pub const EXPRESS_SHIPPING: ShippingOption = ShippingOption {
    id: "express",
    name: "Express Shipping",
    price: dec!(25),
    estimated_days: "2-3 business days",
};

/// All shipping options, cheapest first.
#[must_use]
pub const fn shipping_options() -> [ShippingOption; 3] {
    [FREE_SHIPPING, STANDARD_SHIPPING, EXPRESS_SHIPPING]
}

/// Look up a shipping option, falling back to free shipping.
#[must_use]
pub fn shipping_option(id: &str) -> ShippingOption {
    shipping_options()
        .into_iter()
        .find(|option| option.id.eq_ignore_ascii_case(id.trim()))
        .unwrap_or_else(|| {
            tracing::debug!(shipping = id, "Unknown shipping option, using free");
            FREE_SHIPPING
        })
}

/// Priced order for the current cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub shipping: ShippingOption,
    pub subtotal: Decimal,
    pub total: Decimal,
}

impl OrderSummary {
    /// Price the cart with the given shipping option id.
    #[must_use]
    pub fn for_cart(cart: &CartEngine<'_>, shipping_id: &str) -> Self {
        Self::new(cart.total(), shipping_option(shipping_id))
    }

    #[must_use]
    pub fn new(subtotal: Decimal, shipping: ShippingOption) -> Self {
        Self {
            shipping,
            subtotal,
            total: subtotal + shipping.price,
        }
    }

    #[must_use]
    pub const fn shipping_price(&self) -> Decimal {
        self.shipping.price
    }

    #[must_use]
    pub fn total_display(&self) -> Price {
        Price::usd(self.total)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wood_whimsy_core::ProductId;

    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::db::MemoryStore;
    use crate::models::product::fixtures::product;
    use crate::services::advisory::AdvisoryLog;

    #[test]
    fn test_unknown_option_falls_back_to_free() {
        assert_eq!(shipping_option("teleport"), FREE_SHIPPING);
        assert_eq!(shipping_option("EXPRESS"), EXPRESS_SHIPPING);
    }

    #[test]
    fn test_summary_adds_shipping() {
        let catalog = InMemoryCatalog::without_categories(vec![product(
            "2",
            "dining-room",
            dec!(899.99),
            Some(dec!(799.99)),
        )])
        .unwrap();
        let store = MemoryStore::new();
        let log = AdvisoryLog::new();
        let mut cart = CartEngine::new(&catalog, &store, &log);
        cart.add_item(&ProductId::from("2"), 2);

        let summary = OrderSummary::for_cart(&cart, "standard");
        assert_eq!(summary.subtotal, dec!(1599.98));
        assert_eq!(summary.shipping_price(), dec!(10));
        assert_eq!(summary.total, dec!(1609.98));
        assert_eq!(summary.total_display().display(), "$1609.98");
    }

    #[test]
    fn test_empty_cart_free_shipping_is_zero() {
        let summary = OrderSummary::new(Decimal::ZERO, shipping_option("free"));
        assert_eq!(summary.total, Decimal::ZERO);
    }
}
