//! Built-in catalog for the Wood & Whimsy shop.
//!
//! Used when no catalog file is configured.

use rust_decimal_macros::dec;

use wood_whimsy_core::{CategoryId, ProductId};

use super::{CatalogError, InMemoryCatalog};
use crate::models::product::{Category, Dimensions, Product};

/// Build the seed catalog.
///
/// # Errors
///
/// Only fails if the seed data itself breaks a catalog invariant, which the
/// tests below rule out.
pub fn catalog() -> Result<InMemoryCatalog, CatalogError> {
    InMemoryCatalog::new(categories(), products())
}

fn category(id: &str, name: &str, image: &str) -> Category {
    Category {
        id: CategoryId::from(id),
        name: name.to_owned(),
        image: image.to_owned(),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

fn categories() -> Vec<Category> {
    vec![
        category(
            "living-room",
            "Living Room",
            "https://images.unsplash.com/photo-1618160472028-15b1902d646d",
        ),
        category(
            "dining-room",
            "Dining Room",
            "https://images.unsplash.com/photo-1615968679312-9b7ed9f04e79",
        ),
        category(
            "bedroom",
            "Bedroom",
            "https://images.unsplash.com/photo-1615874959474-d609969a20ed",
        ),
        category(
            "office",
            "Home Office",
            "https://images.unsplash.com/photo-1593062096033-9a26b09da705",
        ),
    ]
}

#[allow(clippy::too_many_lines)]
fn products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::from("1"),
            name: "Enchanted Oak Coffee Table".to_owned(),
            category: CategoryId::from("living-room"),
            price: dec!(399.99),
            discount_price: None,
            image: "https://images.unsplash.com/photo-1592078615290-033ee584e267".to_owned(),
            images: strings(&[
                "https://images.unsplash.com/photo-1592078615290-033ee584e267",
                "https://images.unsplash.com/photo-1631057426096-3d59e1c94414",
                "https://images.unsplash.com/photo-1581428982868-e410dd047a90",
            ]),
            description: "This whimsical coffee table features hand-carved details with organic, flowing lines that bring a touch of enchantment to your living space. Crafted from sustainable oak with a natural finish that highlights the wood's beautiful grain.".to_owned(),
            features: strings(&[
                "Handcrafted from sustainable oak",
                "Natural, food-safe finish",
                "Unique, one-of-a-kind carvings",
                "Sturdy construction",
                "Includes felt pads to protect floors",
            ]),
            dimensions: Dimensions {
                width: dec!(120),
                depth: dec!(70),
                height: dec!(45),
            },
            in_stock: true,
            featured: true,
        },
        Product {
            id: ProductId::from("2"),
            name: "Woodland Dining Table".to_owned(),
            category: CategoryId::from("dining-room"),
            price: dec!(899.99),
            discount_price: Some(dec!(799.99)),
            image: "https://images.unsplash.com/photo-1615874959474-d609969a20ed".to_owned(),
            images: strings(&[
                "https://images.unsplash.com/photo-1615874959474-d609969a20ed",
                "https://images.unsplash.com/photo-1617104678098-de229db51182",
                "https://images.unsplash.com/photo-1594131302763-c9771d65d764",
            ]),
            description: "Gather around our Woodland Dining Table for memorable meals and moments. The live-edge design and organic shape celebrate the natural beauty of wood, while the sturdy construction ensures this piece will last for generations.".to_owned(),
            features: strings(&[
                "Live-edge design with natural wood slab",
                "Hand-finished with eco-friendly oils",
                "Metal hairpin legs for modern contrast",
                "Seats 6-8 people comfortably",
                "Each piece is unique due to natural wood variations",
            ]),
            dimensions: Dimensions {
                width: dec!(180),
                depth: dec!(90),
                height: dec!(75),
            },
            in_stock: true,
            featured: true,
        },
        Product {
            id: ProductId::from("3"),
            name: "Fairytale Four-Poster Bed".to_owned(),
            category: CategoryId::from("bedroom"),
            price: dec!(1299.99),
            discount_price: None,
            image: "https://images.unsplash.com/photo-1505693416388-ac5ce068fe85".to_owned(),
            images: strings(&[
                "https://images.unsplash.com/photo-1505693416388-ac5ce068fe85",
                "https://images.unsplash.com/photo-1588046130717-0eb0c9a3ba15",
                "https://images.unsplash.com/photo-1618220048045-10a6dbdf83e0",
            ]),
            description: "Transform your bedroom into a storybook retreat with our Fairytale Four-Poster Bed. Delicate, twisted wooden posts create a dreamy canopy frame, while the solid wood platform provides sturdy support for a restful night's sleep.".to_owned(),
            features: strings(&[
                "Handcrafted twisted wooden posts",
                "Solid wood platform (no box spring needed)",
                "Available in Queen and King sizes",
                "Non-toxic, water-based finishes",
                "Made to order with customization options available",
            ]),
            dimensions: Dimensions {
                width: dec!(160),
                depth: dec!(200),
                height: dec!(190),
            },
            in_stock: false,
            featured: true,
        },
        Product {
            id: ProductId::from("4"),
            name: "Whispering Willow Bookshelf".to_owned(),
            category: CategoryId::from("living-room"),
            price: dec!(599.99),
            discount_price: None,
            image: "https://images.unsplash.com/photo-1602172884306-b28bde61c2a2".to_owned(),
            images: strings(&[
                "https://images.unsplash.com/photo-1602172884306-b28bde61c2a2",
                "https://images.unsplash.com/photo-1583944000409-00dd1a71d8d8",
                "https://images.unsplash.com/photo-1615529162924-f8605388461d",
            ]),
            description: "Our Whispering Willow Bookshelf combines function with fantasy through its asymmetrical design and branch-like supports. Each shelf is spaced to accommodate books of various sizes, with special nooks for treasured objects.".to_owned(),
            features: strings(&[
                "Sustainably harvested maple wood",
                "Asymmetrical, organic design",
                "Five adjustable shelves",
                "Anti-tip safety wall anchors included",
                "Holds up to 200 books depending on size",
            ]),
            dimensions: Dimensions {
                width: dec!(100),
                depth: dec!(35),
                height: dec!(180),
            },
            in_stock: true,
            featured: false,
        },
        Product {
            id: ProductId::from("5"),
            name: "Enchanted Forest Desk".to_owned(),
            category: CategoryId::from("office"),
            price: dec!(749.99),
            discount_price: None,
            image: "https://images.unsplash.com/photo-1593062096033-9a26b09da705".to_owned(),
            images: strings(&[
                "https://images.unsplash.com/photo-1593062096033-9a26b09da705",
                "https://images.unsplash.com/photo-1629054607333-3d3ca80f665f",
                "https://images.unsplash.com/photo-1593062096066-02efdf45ddc9",
            ]),
            description: "Bring imagination to your workspace with our Enchanted Forest Desk. The curved edges and integrated storage solutions are inspired by woodland elements, creating a functional yet fantastical place for creativity to flourish.".to_owned(),
            features: strings(&[
                "Solid wood construction with walnut veneer",
                "Integrated cable management system",
                "Two hidden storage drawers",
                "Curved ergonomic edge",
                "Brass leaf-shaped drawer pulls",
            ]),
            dimensions: Dimensions {
                width: dec!(140),
                depth: dec!(70),
                height: dec!(75),
            },
            in_stock: true,
            featured: true,
        },
        Product {
            id: ProductId::from("6"),
            name: "Moss Garden Side Table".to_owned(),
            category: CategoryId::from("living-room"),
            price: dec!(249.99),
            discount_price: None,
            image: "https://images.unsplash.com/photo-1634712282287-14ed57b9cc89".to_owned(),
            images: strings(&[
                "https://images.unsplash.com/photo-1634712282287-14ed57b9cc89",
                "https://images.unsplash.com/photo-1594131302763-c9771d65d764",
                "https://images.unsplash.com/photo-1631057426096-3d59e1c94414",
            ]),
            description: "Add a touch of whimsy to any room with our Moss Garden Side Table. The glass-topped design reveals a miniature landscape beneath, bringing the outdoors inside with zero maintenance required.".to_owned(),
            features: strings(&[
                "Tempered glass top",
                "Preserved moss and miniature landscape (no watering needed)",
                "Solid wood base",
                "LED lighting with touch activation",
                "Each piece is unique and handcrafted",
            ]),
            dimensions: Dimensions {
                width: dec!(45),
                depth: dec!(45),
                height: dec!(55),
            },
            in_stock: true,
            featured: false,
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_seed_catalog_is_valid() {
        let catalog = catalog().unwrap();
        assert_eq!(catalog.products().len(), 6);
        assert_eq!(catalog.categories().len(), 4);
    }

    #[test]
    fn test_seed_featured_products() {
        let catalog = catalog().unwrap();
        let featured: Vec<_> = catalog
            .featured_products()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(featured, ["1", "2", "3", "5"]);
    }

    #[test]
    fn test_seed_bed_is_out_of_stock() {
        let catalog = catalog().unwrap();
        assert!(!catalog.product(&ProductId::from("3")).unwrap().in_stock);
    }

    #[test]
    fn test_seed_living_room_related() {
        let catalog = catalog().unwrap();
        let related: Vec<_> = catalog
            .related_products(&ProductId::from("1"), 3)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(related, ["4", "6"]);
    }
}
