//! Catalog browsing commands.

use std::io::Write;

use clap::Args;
use rust_decimal::Decimal;

use wood_whimsy_core::ProductId;
use wood_whimsy_storefront::catalog::Catalog;
use wood_whimsy_storefront::error::AppError;
use wood_whimsy_storefront::services::filter::{FilterConfig, PriceRange, SortKey};
use wood_whimsy_storefront::state::AppState;

use super::{CliError, Output, price_label};

/// Listing filters.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only this category (e.g. `living-room`)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Lowest base price
    #[arg(long)]
    pub min: Option<Decimal>,

    /// Highest base price (default: configured ceiling)
    #[arg(long)]
    pub max: Option<Decimal>,

    /// Hide out-of-stock products
    #[arg(long)]
    pub in_stock: bool,

    /// Sort order (`price-asc`, `price-desc`, `newest`)
    #[arg(short, long, default_value = "none")]
    pub sort: SortKey,

    /// Only featured products
    #[arg(long)]
    pub featured: bool,
}

impl ListArgs {
    fn filter(&self, state: &AppState) -> Result<FilterConfig, AppError> {
        let low = self.min.unwrap_or(Decimal::ZERO);
        let high = self.max.unwrap_or(state.config().price_ceiling);
        let mut filter = state
            .config()
            .default_filter()
            .price_range(PriceRange::new(low, high)?)
            .in_stock_only(self.in_stock)
            .featured_only(self.featured)
            .sort(self.sort);
        if let Some(category) = &self.category {
            filter = filter.category(category.as_str());
        }
        Ok(filter)
    }
}

/// `products`: filtered product listing.
pub fn list(
    state: &AppState,
    args: &ListArgs,
    out: &mut Output<impl Write>,
) -> Result<(), CliError> {
    let filter = args.filter(state)?;
    let products = state.listing(&filter);

    for product in products.iter() {
        out.product_row(product)?;
    }
    if products.is_empty() {
        out.line("No products match these filters.")?;
    }
    tracing::debug!(shown = products.len(), "Listed products");
    Ok(())
}

/// `product <id>`: detail view with related products.
pub fn show(state: &AppState, id: &str, out: &mut Output<impl Write>) -> Result<(), CliError> {
    let id = ProductId::from(id);
    let product = state.product(&id)?;

    out.line(&product.name)?;
    out.line(format!(
        "Category: {}",
        state.catalog().category_name(&product.category)
    ))?;
    out.line(format!("Price: {}", price_label(product)))?;
    out.line(if product.in_stock {
        "In stock"
    } else {
        "Out of stock"
    })?;
    out.line(format!(
        "Dimensions: {} x {} x {} cm (W x D x H)",
        product.dimensions.width, product.dimensions.depth, product.dimensions.height
    ))?;
    if !product.description.is_empty() {
        out.line("")?;
        out.line(&product.description)?;
    }
    if !product.features.is_empty() {
        out.line("")?;
        for feature in &product.features {
            out.line(format!("  - {feature}"))?;
        }
    }

    let related = state.related_products(&id);
    if !related.is_empty() {
        out.line("")?;
        out.line("You may also like:")?;
        for product in related.iter() {
            out.product_row(product)?;
        }
    }
    Ok(())
}

/// `categories`: category list with product counts.
pub fn categories(state: &AppState, out: &mut Output<impl Write>) -> Result<(), CliError> {
    let catalog = state.catalog();
    for category in catalog.categories() {
        let count = catalog.products_in_category(&category.id).len();
        out.line(format!(
            "{:<14} {:<14} {count} products",
            category.id.as_str(),
            category.name
        ))?;
    }
    Ok(())
}
