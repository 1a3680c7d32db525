//! Integration tests for the Coachkit storefront cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p coachkit-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Shopper flows over an in-memory slot
//! - `cart_persistence` - Carts surviving a restart via the file-backed slot
//!
//! This crate only holds shared fixtures; the tests live in `tests/`.

use coachkit_core::CurrencyCode;
use coachkit_storefront::{Product, StaticCatalog};

/// Product id of the HR policy kit fixture (249 minor units).
pub const HR_POLICY_KIT: &str = "hr-policy-kit";

/// Product id of the org design pack fixture (299 minor units).
pub const ORG_DESIGN_PACK: &str = "org-design-pack";

/// Two-product catalog priced in minor units.
///
/// # Panics
///
/// Never; the fixture ids are distinct.
#[must_use]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
pub fn test_catalog() -> StaticCatalog {
    StaticCatalog::new(
        CurrencyCode::USD,
        vec![
            Product::new(HR_POLICY_KIT, "HR Policy Kit", 249, CurrencyCode::USD),
            Product::new(ORG_DESIGN_PACK, "Org Design Pack", 299, CurrencyCode::USD),
        ],
    )
    .unwrap()
}
