//! Wood & Whimsy Core - Shared types library.
//!
//! This crate provides common types used across all Wood & Whimsy components:
//! - `storefront` - Catalog, cart and identity services
//! - `cli` - Command-line front end for browsing, cart and account actions
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no persistence,
//! no clocks. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
