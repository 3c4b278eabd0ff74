//! Listing queries over the built-in and file-loaded catalogs.

#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use wood_whimsy_core::ProductId;
use wood_whimsy_integration_tests::TestContext;
use wood_whimsy_storefront::catalog::Catalog;
use wood_whimsy_storefront::config::StorefrontConfig;
use wood_whimsy_storefront::services::filter::{FilterConfig, PriceRange, SortKey};

fn ids(products: &[wood_whimsy_storefront::models::Product]) -> Vec<&str> {
    products.iter().map(|p| p.id.as_str()).collect()
}

#[test]
fn test_default_listing_is_catalog_order() {
    let ctx = TestContext::new();
    let state = ctx.start();
    let listing = state.listing(&state.config().default_filter());
    assert_eq!(ids(&listing), ["1", "2", "3", "4", "5", "6"]);
}

#[test]
fn test_newest_first() {
    let ctx = TestContext::new();
    let state = ctx.start();
    let listing = state.listing(&FilterConfig::new().sort(SortKey::Newest));
    assert_eq!(ids(&listing), ["6", "5", "4", "3", "2", "1"]);
}

#[test]
fn test_price_range_uses_base_price() {
    let ctx = TestContext::new();
    let state = ctx.start();

    // Product 2: base 899.99, discounted to 799.99
    let range = PriceRange::new(dec!(700), dec!(850)).unwrap();
    let listing = state.listing(&FilterConfig::new().price_range(range));
    assert_eq!(ids(&listing), ["5"]);
}

#[test]
fn test_in_stock_price_descending() {
    let ctx = TestContext::new();
    let state = ctx.start();
    let listing = state.listing(
        &FilterConfig::new()
            .in_stock_only(true)
            .sort(SortKey::PriceDescending),
    );
    // Effective prices: 2 => 799.99, 5 => 749.99
    assert_eq!(ids(&listing), ["2", "5", "4", "1", "6"]);
}

#[test]
fn test_related_products_limit_from_config() {
    let ctx = TestContext::new();
    let state = ctx.start_with(StorefrontConfig {
        related_limit: 1,
        ..ctx.config()
    });
    let related = state.related_products(&ProductId::from("1"));
    assert_eq!(ids(&related), ["4"]);
}

#[test]
fn test_catalog_from_json_file() {
    let ctx = TestContext::new();
    let path = ctx.data_dir().join("catalog.json");
    std::fs::write(
        &path,
        r#"{
            "categories": [{"id": "garden", "name": "Garden", "image": "g.jpg"}],
            "products": [
                {"id": "10", "name": "Cedar Bench", "category": "garden", "price": "150",
                 "image": "b.jpg", "description": "", "inStock": true,
                 "dimensions": {"width": 120, "depth": 40, "height": 45}},
                {"id": "11", "name": "Teak Planter", "category": "garden", "price": "90",
                 "discountPrice": "60", "image": "p.jpg", "description": "", "inStock": false,
                 "dimensions": {"width": 40, "depth": 40, "height": 50}}
            ]
        }"#,
    )
    .unwrap();

    let state = ctx.start_with(StorefrontConfig {
        catalog_path: Some(path),
        ..ctx.config()
    });
    assert_eq!(state.catalog().category_name(&"garden".into()), "Garden");

    let listing = state.listing(&FilterConfig::new().sort(SortKey::PriceAscending));
    assert_eq!(ids(&listing), ["11", "10"]);
}
