//! Cart display data.
//!
//! [`CartView`] is a pure projection of cart state through the catalog. It
//! carries pre-formatted prices so displays never do arithmetic.

use std::fmt::Write as _;

use askama::Template;

use coachkit_core::{CurrencyCode, Price};

use crate::cart::CartState;
use crate::catalog::Catalog;

/// Indicator shown in place of the line list when the cart has no items.
pub const EMPTY_CART_TEXT: &str = "Your cart is empty.";

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
    pub line_total_minor_units: u64,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total: String,
    pub total_minor_units: u64,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart view priced in `currency`.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            total: Price::zero(currency).to_string(),
            total_minor_units: 0,
            item_count: 0,
        }
    }

    /// Project cart state through the catalog.
    ///
    /// Lines whose product is missing from the catalog are skipped.
    #[must_use]
    pub fn project<C: Catalog + ?Sized>(state: &CartState, catalog: &C) -> Self {
        let mut total = Price::zero(catalog.currency());
        let mut item_count = 0u32;
        let mut items = Vec::with_capacity(state.len());

        for (id, quantity) in state.iter() {
            let Some(product) = catalog.product(id.as_str()) else {
                continue;
            };
            let line_total = product.price.times(quantity);
            total = total.plus(line_total);
            item_count = item_count.saturating_add(quantity.get());

            items.push(CartLineView {
                id: id.to_string(),
                name: product.name.clone(),
                quantity: quantity.get(),
                unit_price: product.price.to_string(),
                line_total: line_total.to_string(),
                line_total_minor_units: line_total.minor_units(),
            });
        }

        if items.is_empty() {
            return Self::empty(catalog.currency());
        }

        Self {
            items,
            total: total.to_string(),
            total_minor_units: total.minor_units(),
            item_count,
        }
    }

    /// Returns `true` if there are no lines to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn line(&self, id: &str) -> Option<&CartLineView> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Plain-text rendering, one line per item followed by the total.
    #[must_use]
    pub fn to_text(&self) -> String {
        if self.is_empty() {
            return EMPTY_CART_TEXT.to_string();
        }

        let mut out = String::new();
        for item in &self.items {
            let _ = writeln!(out, "{} x{}: {}", item.name, item.quantity, item.line_total);
        }
        let _ = write!(out, "Total: {}", self.total);
        out
    }

    /// HTML fragment for the page's cart panel.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn to_html(&self) -> askama::Result<String> {
        CartItemsTemplate {
            cart: self,
            empty_text: EMPTY_CART_TEXT,
        }
        .render()
    }
}

/// Cart items fragment template.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate<'a> {
    pub cart: &'a CartView,
    pub empty_text: &'a str,
}

/// Receives the cart projection whenever the visible cart should update.
pub trait CartDisplay {
    /// Show `view` to the shopper.
    fn show(&mut self, view: &CartView);
}

impl<F: FnMut(&CartView)> CartDisplay for F {
    fn show(&mut self, view: &CartView) {
        self(view);
    }
}
