//! Wood & Whimsy storefront library.
//!
//! Catalog browsing and filtering, a persisted shopping cart, and demo
//! authentication. Front ends (the `ww-cli` binary, tests) drive it through
//! [`state::AppState`] and [`state::StorefrontSession`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
