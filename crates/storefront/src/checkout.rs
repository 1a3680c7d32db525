//! Checkout hand-off.
//!
//! The cart does not take payment itself. When the shopper checks out, the
//! cart lines are handed to a [`CheckoutProvider`] which returns where to send
//! them next.

use thiserror::Error;
use url::Url;

use coachkit_core::{ProductId, Quantity};

/// Errors from a checkout provider.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The provider could not start a checkout.
    #[error("checkout unavailable: {0}")]
    Unavailable(String),
}

/// One cart line as handed to checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLine {
    pub product_id: ProductId,
    pub quantity: Quantity,
}

/// Where to send the shopper to complete their purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub url: Url,
}

/// External checkout collaborator. Never called with an empty line list.
pub trait CheckoutProvider {
    /// Start a checkout for `lines`.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` if the checkout cannot be started.
    fn begin(&self, lines: &[CheckoutLine]) -> Result<CheckoutSession, CheckoutError>;
}

/// Checkout via a hosted payment link.
///
/// Appends one `item=<product id>:<quantity>` query pair per line to the
/// configured base URL.
#[derive(Debug, Clone)]
pub struct LinkCheckout {
    base_url: Url,
}

impl LinkCheckout {
    /// Create a provider that links to `base_url`.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Base URL of the payment link.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl CheckoutProvider for LinkCheckout {
    fn begin(&self, lines: &[CheckoutLine]) -> Result<CheckoutSession, CheckoutError> {
        if self.base_url.cannot_be_a_base() {
            return Err(CheckoutError::Unavailable(format!(
                "checkout link is not a base URL: {}",
                self.base_url
            )));
        }

        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            for line in lines {
                query.append_pair("item", &format!("{}:{}", line.product_id, line.quantity));
            }
        }

        tracing::info!(lines = lines.len(), "Checkout link created");
        Ok(CheckoutSession { url })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: &str, qty: u32) -> CheckoutLine {
        CheckoutLine {
            product_id: ProductId::new(id),
            quantity: Quantity::new(qty).unwrap(),
        }
    }

    #[test]
    fn test_link_checkout_appends_items() {
        let provider = LinkCheckout::new(Url::parse("https://pay.example.com/cart").unwrap());
        let session = provider
            .begin(&[line("hr-policy-kit", 2), line("org-design-pack", 1)])
            .unwrap();

        assert_eq!(
            session.url.as_str(),
            "https://pay.example.com/cart?item=hr-policy-kit%3A2&item=org-design-pack%3A1"
        );
    }

    #[test]
    fn test_link_checkout_keeps_existing_query() {
        let provider =
            LinkCheckout::new(Url::parse("https://pay.example.com/cart?ref=site").unwrap());
        let session = provider.begin(&[line("hr-policy-kit", 1)]).unwrap();

        let pairs: Vec<(String, String)> = session.url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            [
                ("ref".to_string(), "site".to_string()),
                ("item".to_string(), "hr-policy-kit:1".to_string()),
            ]
        );
    }

    #[test]
    fn test_link_checkout_rejects_non_base_url() {
        let provider = LinkCheckout::new(Url::parse("mailto:orders@example.com").unwrap());
        assert!(matches!(
            provider.begin(&[line("hr-policy-kit", 1)]),
            Err(CheckoutError::Unavailable(_))
        ));
    }
}
