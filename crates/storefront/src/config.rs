//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `COACHKIT_DATA_DIR` - Directory for the persisted cart (default: .coachkit)
//! - `COACHKIT_CART_KEY` - Persistence slot key (default: `cart_v1`)
//! - `COACHKIT_CATALOG_PATH` - YAML catalog file (default: built-in product line)
//! - `COACHKIT_CURRENCY` - Currency for the built-in catalog (default: USD)
//! - `COACHKIT_CHECKOUT_URL` - Hosted checkout link the cart hands off to

use std::path::PathBuf;

use url::Url;

use coachkit_core::CurrencyCode;

use crate::cart::CART_STORAGE_KEY;
use crate::catalog::StaticCatalog;
use crate::checkout::LinkCheckout;
use crate::error::ConfigError;
use crate::storage::{FileStore, validate_key};

const DEFAULT_DATA_DIR: &str = ".coachkit";
const DEFAULT_CHECKOUT_URL: &str = "https://checkout.coachkit.example/cart";

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the file-backed persistence slot
    pub data_dir: PathBuf,
    /// Persistence slot key
    pub cart_key: String,
    /// Catalog file; `None` means the built-in product line
    pub catalog_path: Option<PathBuf>,
    /// Currency used by the built-in catalog
    pub currency: CurrencyCode,
    /// Hosted checkout link
    pub checkout_url: Url,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let data_dir = PathBuf::from(get_or_default("COACHKIT_DATA_DIR", DEFAULT_DATA_DIR));

        let cart_key = get_or_default("COACHKIT_CART_KEY", CART_STORAGE_KEY);
        validate_key(&cart_key).map_err(|e| invalid("COACHKIT_CART_KEY", &e))?;

        let catalog_path = lookup("COACHKIT_CATALOG_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let currency = get_or_default("COACHKIT_CURRENCY", "USD")
            .parse::<CurrencyCode>()
            .map_err(|e| invalid("COACHKIT_CURRENCY", &e))?;

        let checkout_url = Url::parse(&get_or_default("COACHKIT_CHECKOUT_URL", DEFAULT_CHECKOUT_URL))
            .map_err(|e| invalid("COACHKIT_CHECKOUT_URL", &e))?;

        Ok(Self {
            data_dir,
            cart_key,
            catalog_path,
            currency,
            checkout_url,
        })
    }

    /// Load the configured catalog.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Catalog` if the catalog file cannot be read or
    /// parsed.
    pub fn load_catalog(&self) -> Result<StaticCatalog, ConfigError> {
        match &self.catalog_path {
            Some(path) => Ok(StaticCatalog::load(path)?),
            None => Ok(StaticCatalog::builtin(self.currency)),
        }
    }

    /// File-backed persistence rooted at the data directory.
    #[must_use]
    pub fn file_store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }

    /// Checkout provider for the configured link.
    #[must_use]
    pub fn checkout(&self) -> LinkCheckout {
        LinkCheckout::new(self.checkout_url.clone())
    }
}

fn invalid(key: &str, err: &impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::catalog::{Catalog, CatalogError};

    fn config_from(pairs: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".coachkit"));
        assert_eq!(config.cart_key, "cart_v1");
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.currency, CurrencyCode::USD);
        assert_eq!(config.checkout_url.as_str(), DEFAULT_CHECKOUT_URL);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("COACHKIT_DATA_DIR", "/var/lib/coachkit"),
            ("COACHKIT_CART_KEY", "cart_v2"),
            ("COACHKIT_CATALOG_PATH", "catalog.yaml"),
            ("COACHKIT_CURRENCY", "gbp"),
            ("COACHKIT_CHECKOUT_URL", "https://pay.example.com/c"),
        ])
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/coachkit"));
        assert_eq!(config.cart_key, "cart_v2");
        assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.yaml")));
        assert_eq!(config.currency, CurrencyCode::GBP);
        assert_eq!(config.checkout_url.as_str(), "https://pay.example.com/c");
    }

    #[test]
    fn test_blank_catalog_path_uses_builtin() {
        let config = config_from(&[("COACHKIT_CATALOG_PATH", "  ")]).unwrap();
        assert_eq!(config.catalog_path, None);
        assert!(config.load_catalog().is_ok());
    }

    #[test]
    fn test_invalid_currency() {
        let err = config_from(&[("COACHKIT_CURRENCY", "DOGE")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "COACHKIT_CURRENCY"));
    }

    #[test]
    fn test_invalid_checkout_url() {
        let err = config_from(&[("COACHKIT_CHECKOUT_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "COACHKIT_CHECKOUT_URL"));
    }

    #[test]
    fn test_invalid_cart_key() {
        let err = config_from(&[("COACHKIT_CART_KEY", "../cart")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "COACHKIT_CART_KEY"));
    }

    #[test]
    fn test_builtin_catalog_uses_configured_currency() {
        let config = config_from(&[("COACHKIT_CURRENCY", "EUR")]).unwrap();
        let catalog = config.load_catalog().unwrap();
        assert_eq!(catalog.currency(), CurrencyCode::EUR);
    }

    #[test]
    fn test_missing_catalog_file() {
        let config = config_from(&[("COACHKIT_CATALOG_PATH", "/nonexistent/catalog.yaml")]).unwrap();
        assert!(matches!(
            config.load_catalog(),
            Err(ConfigError::Catalog(CatalogError::Io(_)))
        ));
    }
}
