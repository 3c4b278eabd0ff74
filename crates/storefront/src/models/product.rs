//! Catalog domain types.
//!
//! Field names serialize in camelCase so catalog files stay compatible with
//! the storefront's existing JSON data.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use wood_whimsy_core::{CategoryId, CurrencyCode, Price, ProductId};

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category this product is listed under.
    pub category: CategoryId,
    /// Base price.
    pub price: Decimal,
    /// Sale price, at most the base price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Decimal>,
    /// Primary image reference.
    pub image: String,
    /// Gallery image references, in display order.
    #[serde(default)]
    pub images: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub dimensions: Dimensions,
    pub in_stock: bool,
    #[serde(default)]
    pub featured: bool,
}

impl Product {
    /// The price a customer pays: the discount price when set, otherwise the
    /// base price.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.discount_price.unwrap_or(self.price)
    }

    /// Whether a discount price is set.
    #[must_use]
    pub const fn is_discounted(&self) -> bool {
        self.discount_price.is_some()
    }

    /// Effective price as a displayable [`Price`].
    #[must_use]
    pub fn display_price(&self) -> Price {
        Price::new(self.effective_price(), CurrencyCode::USD)
    }
}

/// Product dimensions in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: Decimal,
    pub depth: Decimal,
    pub height: Decimal,
}

impl Dimensions {
    /// Whether every side is strictly positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width > Decimal::ZERO && self.depth > Decimal::ZERO && self.height > Decimal::ZERO
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub image: String,
}
