//! Catalog commands.

#![allow(clippy::print_stdout)]

use coachkit_storefront::error::ConfigError;
use coachkit_storefront::{Catalog, StorefrontConfig};

/// List every product with its id and price.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub fn list(config: &StorefrontConfig) -> Result<(), ConfigError> {
    let catalog = config.load_catalog()?;

    for product in catalog.products() {
        println!("{:<24} {:>10}  {}", product.id.as_str(), product.price.to_string(), product.name);
    }

    tracing::info!(
        products = catalog.products().len(),
        currency = %catalog.currency(),
        "Catalog listed"
    );
    Ok(())
}
