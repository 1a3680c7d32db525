//! Coachkit Storefront library.
//!
//! The cart behind the brand site: a [`CartStore`] holding product quantities,
//! kept in sync with a key/value persistence slot, priced against a read-only
//! catalog, and projected into a [`CartView`] for display.
//!
//! # Architecture
//!
//! Every collaborator is injected:
//! - [`storage::KeyValueStore`] - where the cart is persisted
//! - [`catalog::Catalog`] - product names and prices
//! - [`view::CartDisplay`] - what shows the cart to the shopper
//! - [`checkout::CheckoutProvider`] - where checkout goes next
//!
//! ```
//! use coachkit_core::CurrencyCode;
//! use coachkit_storefront::{CartStore, MemoryStore, StaticCatalog};
//!
//! let mut cart = CartStore::open(MemoryStore::new(), StaticCatalog::builtin(CurrencyCode::USD));
//! cart.add("hr-policy-kit");
//! cart.add("hr-policy-kit");
//! assert_eq!(cart.total().to_string(), "$498.00");
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod storage;
pub mod view;

pub use cart::{CART_STORAGE_KEY, CartState, CartStore};
pub use catalog::{Catalog, Product, StaticCatalog};
pub use checkout::{CheckoutLine, CheckoutProvider, CheckoutSession, LinkCheckout};
pub use config::StorefrontConfig;
pub use error::{CartError, EMPTY_CART_NOTICE};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use view::{CartDisplay, CartView, EMPTY_CART_TEXT};
