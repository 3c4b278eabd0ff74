//! Domain models for the storefront.
//!
//! - [`product`] - Catalog products and categories
//! - [`cart`] - Cart items and derived totals
//! - [`user`] - Stored accounts
//! - [`session`] - Session identity and persistence keys

pub mod cart;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{Cart, CartInvariantError, CartItem, CartLine};
pub use product::{Category, Dimensions, Product};
pub use session::{CurrentUser, keys as session_keys};
pub use user::{StoredAccount, User};
