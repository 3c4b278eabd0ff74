//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Cart engine with persistence and derived totals
//! - `filter` - Catalog filter and sort pipeline
//! - `auth` - Password login, signup, and session identity
//! - `checkout` - Shipping options and order summary
//! - `advisory` - User-facing notifications

pub mod advisory;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod filter;
