//! Product catalog.
//!
//! The catalog is read-only to the cart: it answers "what is this product
//! called and what does it cost". Catalogs are loaded once at startup, either
//! from the built-in product line or from a YAML file:
//!
//! ```yaml
//! currency: USD
//! products:
//!   - id: hr-policy-kit
//!     name: HR Policy Starter Kit
//!     price: 24900   # minor units
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use coachkit_core::{CurrencyCode, Price, ProductId};

/// Errors that can occur when loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),
    #[error("Product {product} is priced in {found}, catalog currency is {expected}")]
    CurrencyMismatch {
        product: ProductId,
        expected: CurrencyCode,
        found: CurrencyCode,
    },
}

/// A product the shopper can put in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
}

impl Product {
    /// Create a product priced in minor units.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price_minor_units: u64,
        currency: CurrencyCode,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: Price::from_minor_units(price_minor_units, currency),
        }
    }
}

/// Read-only product lookup.
pub trait Catalog {
    /// Look up a product by id.
    fn product(&self, id: &str) -> Option<&Product>;

    /// All products in listing order.
    fn products(&self) -> &[Product];

    /// Currency every price in this catalog is quoted in.
    fn currency(&self) -> CurrencyCode;
}

impl<T: Catalog + ?Sized> Catalog for &T {
    fn product(&self, id: &str) -> Option<&Product> {
        (**self).product(id)
    }

    fn products(&self) -> &[Product] {
        (**self).products()
    }

    fn currency(&self) -> CurrencyCode {
        (**self).currency()
    }
}

/// On-disk catalog layout.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    currency: CurrencyCode,
    products: Vec<ProductRecord>,
}

#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: ProductId,
    name: String,
    /// Unit price in minor units.
    price: u64,
}

/// Catalog held in memory, keyed by product id.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    currency: CurrencyCode,
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl StaticCatalog {
    /// Build a catalog from a product list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateProduct` if two products share an id,
    /// or `CatalogError::CurrencyMismatch` if a price is not quoted in
    /// `currency`.
    pub fn new(currency: CurrencyCode, products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if product.price.currency() != currency {
                return Err(CatalogError::CurrencyMismatch {
                    product: product.id.clone(),
                    expected: currency,
                    found: product.price.currency(),
                });
            }
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }

        Ok(Self {
            currency,
            products,
            index,
        })
    }

    /// The brand's standard product line.
    #[must_use]
    pub fn builtin(currency: CurrencyCode) -> Self {
        let products = vec![
            Product::new("hr-policy-kit", "HR Policy Starter Kit", 24_900, currency),
            Product::new("org-design-pack", "Org Design Toolkit", 29_900, currency),
            Product::new(
                "leadership-coaching",
                "Leadership Coaching Session (60 min)",
                18_000,
                currency,
            ),
            Product::new("onboarding-toolkit", "Onboarding Playbook", 14_900, currency),
        ];

        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id.clone(), position))
            .collect();

        Self {
            currency,
            products,
            index,
        }
    }

    /// Parse a catalog from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or contains duplicate ids.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_yaml::from_str(yaml).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let currency = file.currency;
        let products = file
            .products
            .into_iter()
            .map(|record| Product {
                id: record.id,
                name: record.name,
                price: Price::from_minor_units(record.price, currency),
            })
            .collect();

        Self::new(currency, products)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        let catalog = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            products = catalog.products.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }
}

impl Catalog for StaticCatalog {
    fn product(&self, id: &str) -> Option<&Product> {
        self.index
            .get(id)
            .and_then(|&position| self.products.get(position))
    }

    fn products(&self) -> &[Product] {
        &self.products
    }

    fn currency(&self) -> CurrencyCode {
        self.currency
    }
}
