//! Cart commands.
//!
//! Each invocation opens the persisted cart once, applies one action, and
//! prints the result. Mutations print the updated cart.
//!
//! # Environment Variables
//!
//! - `COACHKIT_DATA_DIR` - Directory holding the cart slot
//! - `COACHKIT_CART_KEY` - Slot key
//! - `COACHKIT_CATALOG_PATH` - YAML catalog (default: built-in product line)
//! - `COACHKIT_CHECKOUT_URL` - Checkout link

#![allow(clippy::print_stdout)]

use coachkit_storefront::error::ConfigError;
use coachkit_storefront::{
    CartDisplay, CartStore, CartView, Catalog, CheckoutProvider, FileStore, StaticCatalog,
    StorefrontConfig,
};

/// The cart as the CLI sees it.
pub type Cart = CartStore<FileStore, StaticCatalog>;

/// Prints the cart to stdout.
struct StdoutDisplay;

impl CartDisplay for StdoutDisplay {
    fn show(&mut self, view: &CartView) {
        println!("{}", view.to_text());
    }
}

/// Open the configured cart and load it from disk.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub fn open(config: &StorefrontConfig) -> Result<Cart, ConfigError> {
    let catalog = config.load_catalog()?;
    let mut cart = CartStore::new(config.file_store(), catalog).with_key(config.cart_key.as_str());
    cart.load();

    tracing::debug!(
        dir = %config.data_dir.display(),
        key = %config.cart_key,
        items = cart.item_count(),
        "Cart opened"
    );
    Ok(cart)
}

/// Print the cart.
pub fn show(cart: &Cart) {
    cart.render_to(&mut StdoutDisplay);
}

/// Print the cart panel HTML fragment.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn html(cart: &Cart) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", cart.render().to_html()?);
    Ok(())
}

/// Add one of `product_id`.
pub fn add(cart: &mut Cart, product_id: &str) {
    if cart.catalog().product(product_id).is_none() {
        tracing::warn!(product_id, "Unknown product; run `ck-cli catalog list` for ids");
    }
    cart.add(product_id);
    show(cart);
}

/// One more of `product_id`.
pub fn increment(cart: &mut Cart, product_id: &str) {
    cart.increment(product_id);
    show(cart);
}

/// One fewer of `product_id`.
pub fn decrement(cart: &mut Cart, product_id: &str) {
    cart.decrement(product_id);
    show(cart);
}

/// Drop `product_id` from the cart.
pub fn remove(cart: &mut Cart, product_id: &str) {
    cart.remove(product_id);
    show(cart);
}

/// Empty the cart.
pub fn clear(cart: &mut Cart) {
    cart.clear();
    show(cart);
}

/// Print the cart total.
pub fn total(cart: &Cart) {
    println!("{}", cart.total());
}

/// Start checkout. An empty cart prints the notice instead of failing.
///
/// # Errors
///
/// Returns an error if the checkout provider fails.
pub fn checkout(cart: &Cart, provider: &impl CheckoutProvider) -> Result<(), Box<dyn std::error::Error>> {
    match cart.checkout(provider) {
        Ok(session) => {
            println!("Continue to checkout: {}", session.url);
            Ok(())
        }
        Err(e) if e.is_notice() => {
            println!("{e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
