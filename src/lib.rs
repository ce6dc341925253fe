//! Shopping cart state for a product list view.
//!
//! A [`store::CartStore`] owns the cart, applies one user action at a time and
//! hands a fully recomputed [`view::CartFrame`] to its renderer after each
//! mutation, so the list, totals and per-product controls never drift from
//! the cart itself.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod price;
pub mod store;
pub mod utils;
pub mod view;

pub use error::{CartError, PriceError};
pub use store::{Action, CartStore};
