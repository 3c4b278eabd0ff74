//! Product listing filter and sort pipeline.
//!
//! [`apply`] is a pure function over a product slice. The order of steps is
//! fixed: category, base-price range, stock, featured, then sort.

use std::cmp::Reverse;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use wood_whimsy_core::CategoryId;

use crate::models::product::Product;

/// Upper bound of the default price range.
pub const DEFAULT_PRICE_CEILING: Decimal = dec!(1500);

/// Errors building a filter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("price range lower bound {low} exceeds upper bound {high}")]
    InvertedPriceRange { low: Decimal, high: Decimal },

    #[error("unknown sort key: {0}")]
    UnknownSort(String),
}

/// Inclusive price bounds, `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PriceRange {
    low: Decimal,
    high: Decimal,
}

impl PriceRange {
    /// # Errors
    ///
    /// Returns `FilterError::InvertedPriceRange` if `low > high`.
    pub fn new(low: Decimal, high: Decimal) -> Result<Self, FilterError> {
        if low > high {
            return Err(FilterError::InvertedPriceRange { low, high });
        }
        Ok(Self { low, high })
    }

    /// `[0, ceiling]`, or `[ceiling, ceiling]` for a negative ceiling.
    #[must_use]
    pub fn up_to(ceiling: Decimal) -> Self {
        Self {
            low: Decimal::ZERO.min(ceiling),
            high: ceiling,
        }
    }

    #[must_use]
    pub const fn low(&self) -> Decimal {
        self.low
    }

    #[must_use]
    pub const fn high(&self) -> Decimal {
        self.high
    }

    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.low && price <= self.high
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::up_to(DEFAULT_PRICE_CEILING)
    }
}

/// Listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Catalog order.
    #[default]
    None,
    /// Cheapest effective price first.
    PriceAscending,
    /// Most expensive effective price first.
    PriceDescending,
    /// Highest numeric product ID first.
    Newest,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::PriceAscending => "price-asc",
            Self::PriceDescending => "price-desc",
            Self::Newest => "newest",
        }
    }
}

impl FromStr for SortKey {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(Self::None),
            "price-asc" => Ok(Self::PriceAscending),
            "price-desc" => Ok(Self::PriceDescending),
            "newest" => Ok(Self::Newest),
            other => Err(FilterError::UnknownSort(other.to_owned())),
        }
    }
}

/// What the product listing shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterConfig {
    /// Only this category; `None` or an empty ID means every category.
    pub category: Option<CategoryId>,
    pub price_range: PriceRange,
    pub in_stock_only: bool,
    pub featured_only: bool,
    pub sort: SortKey,
}

impl FilterConfig {
    /// Everything in the default price range, catalog order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<CategoryId>) -> Self {
        let category = category.into();
        self.category = (!category.is_empty()).then_some(category);
        self
    }

    #[must_use]
    pub const fn price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    #[must_use]
    pub const fn in_stock_only(mut self, in_stock_only: bool) -> Self {
        self.in_stock_only = in_stock_only;
        self
    }

    #[must_use]
    pub const fn featured_only(mut self, featured_only: bool) -> Self {
        self.featured_only = featured_only;
        self
    }

    #[must_use]
    pub const fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    fn category_filter(&self) -> Option<&CategoryId> {
        self.category.as_ref().filter(|c| !c.is_empty())
    }
}

/// Filter and order `products` for a listing.
///
/// The price range is checked against the base price, not the discount
/// price. Sorts are stable, so equal keys keep catalog order. An empty result
/// is not an error.
#[must_use]
pub fn apply<'p>(products: &'p [Product], config: &FilterConfig) -> Vec<&'p Product> {
    let category = config.category_filter();

    let mut result: Vec<&Product> = products
        .iter()
        .filter(|p| category.is_none_or(|c| &p.category == c))
        .filter(|p| config.price_range.contains(p.price))
        .filter(|p| !config.in_stock_only || p.in_stock)
        .filter(|p| !config.featured_only || p.featured)
        .collect();

    match config.sort {
        SortKey::None => {}
        SortKey::PriceAscending => result.sort_by_key(|p| p.effective_price()),
        SortKey::PriceDescending => result.sort_by_key(|p| Reverse(p.effective_price())),
        // Non-numeric IDs map to None, which Reverse puts last
        SortKey::Newest => result.sort_by_key(|p| Reverse(p.id.sequence())),
    }

    tracing::debug!(
        category = ?category,
        sort = config.sort.as_str(),
        matched = result.len(),
        "Filtered products"
    );
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::product::fixtures::product;

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    fn owned(products: &[&Product]) -> Vec<Product> {
        products.iter().map(|p| (*p).clone()).collect()
    }

    fn sample() -> Vec<Product> {
        let mut out_of_stock = product("4", "bedroom", dec!(300), None);
        out_of_stock.in_stock = false;
        vec![
            product("1", "living-room", dec!(400), None),
            product("2", "dining-room", dec!(900), Some(dec!(200))),
            product("3", "living-room", dec!(250), None),
            out_of_stock,
            product("5", "living-room", dec!(400), None),
        ]
    }

    #[test]
    fn test_default_config_keeps_catalog_order() {
        let products = sample();
        assert_eq!(ids(&apply(&products, &FilterConfig::new())), ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_category_filter() {
        let products = sample();
        let config = FilterConfig::new().category("living-room");
        assert_eq!(ids(&apply(&products, &config)), ["1", "3", "5"]);
    }

    #[test]
    fn test_empty_category_means_all() {
        let products = sample();
        let config = FilterConfig::new().category("");
        assert!(config.category.is_none());
        assert_eq!(apply(&products, &config).len(), 5);

        let raw = FilterConfig {
            category: Some(CategoryId::from("")),
            ..FilterConfig::default()
        };
        assert_eq!(apply(&products, &raw).len(), 5);
    }

    #[test]
    fn test_price_range_uses_base_price() {
        let products = vec![product("1", "a", dec!(100), Some(dec!(50)))];

        let inside = FilterConfig::new().price_range(PriceRange::new(dec!(60), dec!(150)).unwrap());
        assert_eq!(apply(&products, &inside).len(), 1);

        let discount_only =
            FilterConfig::new().price_range(PriceRange::new(dec!(10), dec!(59)).unwrap());
        assert!(apply(&products, &discount_only).is_empty());
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let products = vec![
            product("1", "a", dec!(100), None),
            product("2", "a", dec!(200), None),
        ];
        let config = FilterConfig::new().price_range(PriceRange::new(dec!(100), dec!(200)).unwrap());
        assert_eq!(ids(&apply(&products, &config)), ["1", "2"]);
    }

    #[test]
    fn test_in_stock_only() {
        let products = sample();
        let config = FilterConfig::new().in_stock_only(true);
        assert_eq!(ids(&apply(&products, &config)), ["1", "2", "3", "5"]);
    }

    #[test]
    fn test_featured_only() {
        let mut products = sample();
        for p in &mut products {
            p.featured = matches!(p.id.as_str(), "2" | "4" | "5");
        }
        let config = FilterConfig::new()
            .featured_only(true)
            .in_stock_only(true)
            .sort(SortKey::PriceAscending);
        assert_eq!(ids(&apply(&products, &config)), ["2", "5"]);
        assert_ne!(config, config.clone().featured_only(false));
    }

    #[test]
    fn test_sort_price_ascending_uses_effective_price() {
        let products = vec![
            product("2", "a", dec!(100), Some(dec!(80))),
            product("1", "a", dec!(50), None),
        ];
        let config = FilterConfig::new().sort(SortKey::PriceAscending);
        assert_eq!(ids(&apply(&products, &config)), ["1", "2"]);
    }

    #[test]
    fn test_price_sorts_are_stable() {
        let products = sample();
        let asc = FilterConfig::new().sort(SortKey::PriceAscending);
        assert_eq!(ids(&apply(&products, &asc)), ["2", "3", "4", "1", "5"]);

        let desc = FilterConfig::new().sort(SortKey::PriceDescending);
        assert_eq!(ids(&apply(&products, &desc)), ["1", "5", "4", "3", "2"]);
    }

    #[test]
    fn test_sort_newest_by_numeric_id() {
        let products = vec![
            product("2", "a", dec!(1), None),
            product("10", "a", dec!(1), None),
            product("oak", "a", dec!(1), None),
            product("9", "a", dec!(1), None),
            product("ash", "a", dec!(1), None),
        ];
        let config = FilterConfig::new().sort(SortKey::Newest);
        assert_eq!(ids(&apply(&products, &config)), ["10", "9", "2", "oak", "ash"]);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let products = sample();
        let config = FilterConfig::new()
            .category("living-room")
            .in_stock_only(true)
            .sort(SortKey::PriceDescending);
        let once = owned(&apply(&products, &config));
        let twice = owned(&apply(&once, &config));
        assert_eq!(once, twice);

        let passthrough = FilterConfig::new().price_range(PriceRange::up_to(dec!(100000)));
        assert_eq!(owned(&apply(&once, &passthrough)), once);
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let products = sample();
        let config = FilterConfig::new().category("garden");
        assert!(apply(&products, &config).is_empty());
    }

    #[test]
    fn test_price_range_rejects_inverted_bounds() {
        assert!(matches!(
            PriceRange::new(dec!(10), dec!(5)),
            Err(FilterError::InvertedPriceRange { .. })
        ));
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("price-asc".parse::<SortKey>().unwrap(), SortKey::PriceAscending);
        assert_eq!("".parse::<SortKey>().unwrap(), SortKey::None);
        assert_eq!("newest".parse::<SortKey>().unwrap(), SortKey::Newest);
        assert!("cheapest".parse::<SortKey>().is_err());
    }
}
