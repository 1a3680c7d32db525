//! Unified error handling for the cart.
//!
//! Only [`CartError`] reaches callers of the cart store. Malformed persisted
//! state and failed writes are recovered inside the store and logged instead.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;

/// Notice shown when checkout is attempted with nothing in the cart.
pub const EMPTY_CART_NOTICE: &str = "Your cart is empty. Add a product first.";

/// Errors surfaced by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Checkout attempted on an empty cart. Non-fatal; show the notice.
    #[error("{}", EMPTY_CART_NOTICE)]
    EmptyCart,

    /// The checkout collaborator refused or failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

impl CartError {
    /// Returns `true` for errors that should be shown to the shopper as a
    /// notice rather than treated as a failure.
    #[must_use]
    pub const fn is_notice(&self) -> bool {
        matches!(self, Self::EmptyCart)
    }
}

/// Errors from a persistence backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the slot failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used as a slot name.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cart_message() {
        assert_eq!(CartError::EmptyCart.to_string(), EMPTY_CART_NOTICE);
        assert_eq!(
            CartError::EmptyCart.to_string(),
            "Your cart is empty. Add a product first."
        );
        assert!(CartError::EmptyCart.is_notice());
    }

    #[test]
    fn test_checkout_error_is_not_notice() {
        let err = CartError::from(CheckoutError::Unavailable("down".to_string()));
        assert_eq!(err.to_string(), "Checkout error: checkout unavailable: down");
        assert!(!err.is_notice());
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::InvalidKey("../etc".to_string());
        assert_eq!(err.to_string(), "Invalid storage key: \"../etc\"");
    }
}
