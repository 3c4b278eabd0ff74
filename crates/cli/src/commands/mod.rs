//! Subcommand implementations.
//!
//! Commands write to an [`Output`] rather than to stdout directly, so they
//! can be exercised against a buffer.

pub mod auth;
pub mod cart;
pub mod catalog;

use std::io::{self, Write};

use thiserror::Error;

use wood_whimsy_core::Price;
use wood_whimsy_storefront::error::AppError;
use wood_whimsy_storefront::models::Product;
use wood_whimsy_storefront::services::advisory::Advisory;

/// Errors that can end a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Storefront operation failed.
    #[error(transparent)]
    App(#[from] AppError),

    /// Writing output failed.
    #[error("output error: {0}")]
    Io(#[from] io::Error),
}

/// Line-oriented command output.
pub struct Output<W> {
    writer: W,
}

impl Output<io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            writer: io::stdout(),
        }
    }
}

impl<W: Write> Output<W> {
    #[cfg(test)]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn line(&mut self, text: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.writer, "{text}")
    }

    /// One-line product summary: id, name, price, stock.
    pub fn product_row(&mut self, product: &Product) -> io::Result<()> {
        let stock = if product.in_stock { "" } else { "  (out of stock)" };
        writeln!(
            self.writer,
            "{:>4}  {:<28} {}{stock}",
            product.id.as_str(),
            product.name,
            price_label(product),
        )
    }

    pub fn advisories(&mut self, advisories: &[Advisory]) -> io::Result<()> {
        for advisory in advisories {
            let marker = if advisory.is_destructive() { "!" } else { "*" };
            writeln!(
                self.writer,
                "{marker} {}: {}",
                advisory.title, advisory.description
            )?;
        }
        Ok(())
    }
}

/// Effective price, with the base price when discounted.
pub fn price_label(product: &Product) -> String {
    if product.is_discounted() {
        format!(
            "{} (was {})",
            product.display_price(),
            Price::usd(product.price)
        )
    } else {
        product.display_price().to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub mod test_support {
    use wood_whimsy_storefront::catalog::seed;
    use wood_whimsy_storefront::config::StorefrontConfig;
    use wood_whimsy_storefront::db::MemoryStore;
    use wood_whimsy_storefront::state::AppState;

    use super::Output;

    pub fn state() -> AppState {
        AppState::new(
            StorefrontConfig::default(),
            seed::catalog().unwrap(),
            MemoryStore::new(),
        )
    }

    pub fn buffer() -> Output<Vec<u8>> {
        Output::new(Vec::new())
    }

    pub fn text(out: Output<Vec<u8>>) -> String {
        String::from_utf8(out.into_inner()).unwrap()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::test_support::{buffer, text};
    use super::*;

    #[test]
    fn test_advisory_markers() {
        let mut out = buffer();
        out.advisories(&[
            Advisory::info("Added to cart", "Oak Chair has been added to your cart."),
            Advisory::destructive("Cannot add to cart", "This item is currently out of stock."),
        ])
        .unwrap();
        let text = text(out);
        assert!(text.contains("* Added to cart: Oak Chair"));
        assert!(text.contains("! Cannot add to cart: This item"));
    }
}
