//! Cart and checkout commands.

use std::io::Write;

use clap::Subcommand;

use wood_whimsy_core::{Price, ProductId};
use wood_whimsy_storefront::services::checkout::shipping_options;
use wood_whimsy_storefront::state::StorefrontSession;

use super::{CliError, Output};

#[derive(Debug, Subcommand)]
pub enum CartAction {
    /// Show cart contents and total
    Show,
    /// Add a product
    Add {
        /// Product ID
        id: String,
        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product
    Remove {
        /// Product ID
        id: String,
    },
    /// Set the quantity of a product already in the cart
    Update {
        /// Product ID
        id: String,
        /// New quantity; zero or less leaves the cart unchanged
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove everything
    Clear,
}

/// Run a cart subcommand, then show the cart.
pub fn run(
    session: &mut StorefrontSession<'_>,
    action: CartAction,
    out: &mut Output<impl Write>,
) -> Result<(), CliError> {
    let cart = &mut session.cart;
    match action {
        CartAction::Show => {}
        CartAction::Add { id, quantity } => {
            cart.add_item(&ProductId::from(id), quantity);
        }
        CartAction::Remove { id } => {
            cart.remove_item(&ProductId::from(id));
        }
        CartAction::Update { id, quantity } => {
            // Non-positive quantities become zero, which the cart ignores
            let quantity = u32::try_from(quantity).unwrap_or(0);
            cart.update_quantity(&ProductId::from(id), quantity);
        }
        CartAction::Clear => cart.clear(),
    }
    show(session, out)
}

fn show(session: &StorefrontSession<'_>, out: &mut Output<impl Write>) -> Result<(), CliError> {
    let cart = &session.cart;
    if cart.items().is_empty() {
        out.line("Your cart is empty.")?;
        return Ok(());
    }

    for line in cart.lines() {
        out.line(format!(
            "{:>4}  {:<28} {} x {} = {}",
            line.product.id.as_str(),
            line.product.name,
            line.quantity,
            Price::usd(line.unit_price()),
            Price::usd(line.line_total()),
        ))?;
    }
    out.line(format!(
        "{} item(s), total {}",
        cart.count(),
        Price::usd(cart.total())
    ))?;
    Ok(())
}

/// `checkout`: order summary for a shipping option.
pub fn checkout(
    session: &StorefrontSession<'_>,
    shipping: &str,
    out: &mut Output<impl Write>,
) -> Result<(), CliError> {
    if session.cart.items().is_empty() {
        out.line("Your cart is empty.")?;
        return Ok(());
    }

    let summary = session.checkout(shipping);
    for option in shipping_options() {
        let marker = if option.id == summary.shipping.id {
            ">"
        } else {
            " "
        };
        out.line(format!(
            "{marker} {:<9} {:<18} {:>8}  {}",
            option.id,
            option.name,
            Price::usd(option.price).display(),
            option.estimated_days
        ))?;
    }
    out.line("")?;
    out.line(format!("Subtotal: {}", Price::usd(summary.subtotal)))?;
    out.line(format!("Shipping: {}", Price::usd(summary.shipping_price())))?;
    out.line(format!("Total:    {}", summary.total_display()))?;
    Ok(())
}
