//! Integration tests for shopper flows through the cart store.
//!
//! These run against an in-memory persistence slot and the two-product test
//! catalog (HR Policy Kit at 249, Org Design Pack at 299).

#![allow(clippy::unwrap_used)]

use coachkit_integration_tests::{HR_POLICY_KIT, ORG_DESIGN_PACK, test_catalog};
use coachkit_storefront::checkout::CheckoutError;
use coachkit_storefront::{
    CART_STORAGE_KEY, CartError, CartStore, CartView, CheckoutLine, CheckoutProvider,
    CheckoutSession, EMPTY_CART_NOTICE, EMPTY_CART_TEXT, LinkCheckout, MemoryStore, StaticCatalog,
};

fn new_cart() -> CartStore<MemoryStore, StaticCatalog> {
    CartStore::open(MemoryStore::new(), test_catalog())
}

/// Checkout provider that must never be reached.
struct UnreachableCheckout;

impl CheckoutProvider for UnreachableCheckout {
    fn begin(&self, _lines: &[CheckoutLine]) -> Result<CheckoutSession, CheckoutError> {
        Err(CheckoutError::Unavailable("should not be called".to_string()))
    }
}

// =============================================================================
// Adding Products
// =============================================================================

#[test]
fn test_add_single_product() {
    let mut cart = new_cart();
    cart.add(HR_POLICY_KIT);

    assert_eq!(cart.total().minor_units(), 249);
    assert_eq!(cart.state().len(), 1);
    assert_eq!(cart.quantity(HR_POLICY_KIT).unwrap().get(), 1);
}

#[test]
fn test_add_same_product_twice() {
    let mut cart = new_cart();
    cart.add(HR_POLICY_KIT);
    cart.add(HR_POLICY_KIT);

    assert_eq!(cart.quantity(HR_POLICY_KIT).unwrap().get(), 2);
    assert_eq!(cart.total().minor_units(), 498);
}

#[test]
fn test_add_two_products() {
    let mut cart = new_cart();
    cart.add(HR_POLICY_KIT);
    cart.add(ORG_DESIGN_PACK);

    assert_eq!(cart.state().len(), 2);
    assert_eq!(cart.total().minor_units(), 548);
}

#[test]
fn test_add_unknown_product_leaves_cart_unchanged() {
    let mut cart = new_cart();
    cart.add(ORG_DESIGN_PACK);
    let before = cart.state().clone();

    cart.add("executive-retreat");

    assert_eq!(cart.state(), &before);
}

// =============================================================================
// Removing Products
// =============================================================================

#[test]
fn test_decrement_single_item_empties_cart() {
    let mut cart = new_cart();
    cart.add(HR_POLICY_KIT);
    cart.decrement(HR_POLICY_KIT);

    assert!(cart.is_empty());
    assert_eq!(cart.total().minor_units(), 0);
    assert_eq!(cart.render().to_text(), EMPTY_CART_TEXT);
}

#[test]
fn test_decrement_every_line_to_zero() {
    let mut cart = new_cart();
    cart.add(HR_POLICY_KIT);
    cart.add(HR_POLICY_KIT);
    cart.add(ORG_DESIGN_PACK);

    cart.decrement(HR_POLICY_KIT);
    assert_eq!(cart.state().len(), 2);
    cart.decrement(HR_POLICY_KIT);
    assert_eq!(cart.state().len(), 1);
    cart.decrement(ORG_DESIGN_PACK);

    assert!(cart.is_empty());
    assert!(cart.render().is_empty());
}

#[test]
fn test_decrement_unknown_is_noop() {
    let mut cart = new_cart();
    cart.add(ORG_DESIGN_PACK);

    cart.decrement("executive-retreat");
    cart.increment("executive-retreat");

    assert_eq!(cart.state().len(), 1);
    assert_eq!(cart.total().minor_units(), 299);
}

#[test]
fn test_clear_from_any_state() {
    let mut cart = new_cart();
    cart.add(HR_POLICY_KIT);
    cart.increment(HR_POLICY_KIT);
    cart.add(ORG_DESIGN_PACK);

    cart.clear();

    assert!(cart.is_empty());
    assert_eq!(cart.item_count(), 0);
}

// =============================================================================
// Totals
// =============================================================================

#[test]
fn test_total_matches_lines_over_mixed_sequence() {
    let mut cart = new_cart();
    let ids = [HR_POLICY_KIT, ORG_DESIGN_PACK, "unknown"];

    // Deterministic pseudo-random walk over the four mutations.
    let mut seed: u32 = 7;
    for _ in 0..200 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let id = ids[(seed as usize >> 4) % ids.len()];
        match (seed >> 8) % 7 {
            0 | 1 | 2 => cart.add(id),
            3 => cart.increment(id),
            4 | 5 => cart.decrement(id),
            _ => {
                if (seed >> 12) % 5 == 0 {
                    cart.clear();
                }
            }
        }

        let expected: u64 = cart
            .state()
            .iter()
            .map(|(id, qty)| {
                let unit = if id.as_str() == HR_POLICY_KIT { 249 } else { 299 };
                unit * u64::from(qty.get())
            })
            .sum();
        assert_eq!(cart.total().minor_units(), expected);
        assert_eq!(cart.render().total_minor_units, expected);
        assert!(cart.quantity("unknown").is_none());
    }
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_render_lines_and_total() {
    let mut cart = new_cart();
    cart.add(ORG_DESIGN_PACK);
    cart.add(ORG_DESIGN_PACK);
    cart.add(HR_POLICY_KIT);

    let view = cart.render();
    assert_eq!(view.items.len(), 2);
    assert_eq!(view.item_count, 3);
    assert_eq!(view.total, "$8.47");
    assert_eq!(
        view.to_text(),
        "HR Policy Kit x1: $2.49\nOrg Design Pack x2: $5.98\nTotal: $8.47"
    );
}

#[test]
fn test_render_to_closure_display() {
    let mut cart = new_cart();
    let mut frames: Vec<CartView> = Vec::new();

    cart.render_to(&mut |view: &CartView| frames.push(view.clone()));
    cart.add(HR_POLICY_KIT);
    cart.render_to(&mut |view: &CartView| frames.push(view.clone()));

    assert_eq!(frames.len(), 2);
    assert!(frames[0].is_empty());
    assert_eq!(frames[1].total_minor_units, 249);
}

#[test]
fn test_render_html_fragment() {
    let mut cart = new_cart();
    cart.add(HR_POLICY_KIT);

    let html = cart.render().to_html().unwrap();
    assert!(html.contains("HR Policy Kit"));
    assert!(html.contains("Total: <strong>$2.49</strong>"));
}

// =============================================================================
// Checkout
// =============================================================================

#[test]
fn test_checkout_empty_cart_shows_notice() {
    let cart = new_cart();

    let err = cart.checkout(&UnreachableCheckout).unwrap_err();

    assert!(matches!(err, CartError::EmptyCart));
    assert_eq!(err.to_string(), "Your cart is empty. Add a product first.");
    assert_eq!(err.to_string(), EMPTY_CART_NOTICE);
}

#[test]
fn test_checkout_via_payment_link() {
    let mut cart = new_cart();
    cart.add(HR_POLICY_KIT);
    cart.add(ORG_DESIGN_PACK);
    cart.add(ORG_DESIGN_PACK);

    let provider = LinkCheckout::new("https://pay.example.com/buy".parse().unwrap());
    let session = cart.checkout(&provider).unwrap();

    assert_eq!(
        session.url.as_str(),
        "https://pay.example.com/buy?item=hr-policy-kit%3A1&item=org-design-pack%3A2"
    );
}

#[test]
fn test_checkout_provider_failure_is_surfaced() {
    let mut cart = new_cart();
    cart.add(HR_POLICY_KIT);

    let err = cart.checkout(&UnreachableCheckout).unwrap_err();
    assert!(matches!(err, CartError::Checkout(_)));
    assert!(!err.is_notice());
}

#[test]
fn test_default_slot_key() {
    let mut cart = new_cart();
    cart.add(HR_POLICY_KIT);
    assert!(cart.storage().slot(CART_STORAGE_KEY).is_some());
    assert_eq!(CART_STORAGE_KEY, "cart_v1");
}
