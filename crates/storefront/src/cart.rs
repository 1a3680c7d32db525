//! Cart state and the store that keeps it in sync with storage.
//!
//! [`CartState`] is the plain id → quantity mapping. [`CartStore`] owns one,
//! together with the persistence slot and catalog it was opened with, and is
//! the only thing that mutates it. There is no global cart: the caller
//! constructs a store once at startup and passes it by reference.
//!
//! # Persistence
//!
//! The state is written to the slot as a JSON object (`{"hr-policy-kit": 2}`)
//! after every change. A missing or malformed slot loads as an empty cart.
//! Write failures are logged and otherwise ignored; the in-memory state stays
//! authoritative for the rest of the session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use coachkit_core::{Price, ProductId, Quantity};

use crate::catalog::Catalog;
use crate::checkout::{CheckoutLine, CheckoutProvider, CheckoutSession};
use crate::error::{CartError, Result};
use crate::storage::KeyValueStore;
use crate::view::{CartDisplay, CartView};

/// Default persistence slot key.
pub const CART_STORAGE_KEY: &str = "cart_v1";

/// Product id → quantity. Never holds a zero-quantity line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartState {
    lines: BTreeMap<ProductId, Quantity>,
}

impl CartState {
    /// Quantity of `id`, if it is in the cart.
    #[must_use]
    pub fn quantity(&self, id: &str) -> Option<Quantity> {
        self.lines.get(id).copied()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in product id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, Quantity)> {
        self.lines.iter().map(|(id, &quantity)| (id, quantity))
    }

    /// Total number of items across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .values()
            .fold(0u32, |count, quantity| count.saturating_add(quantity.get()))
    }

    /// Add one of `id`, inserting the line if needed.
    fn add(&mut self, id: ProductId) {
        self.lines
            .entry(id)
            .and_modify(|quantity| *quantity = quantity.increment())
            .or_insert(Quantity::ONE);
    }

    /// One more of an existing line. Returns `false` if `id` is not in the cart.
    fn increment(&mut self, id: &str) -> bool {
        self.lines.get_mut(id).is_some_and(|quantity| {
            *quantity = quantity.increment();
            true
        })
    }

    /// One fewer of an existing line, dropping it at zero. Returns `false`
    /// if `id` is not in the cart.
    fn decrement(&mut self, id: &str) -> bool {
        let Some(quantity) = self.lines.get_mut(id) else {
            return false;
        };

        match quantity.decrement() {
            Some(lower) => *quantity = lower,
            None => {
                self.lines.remove(id);
            }
        }
        true
    }

    /// Drop a line entirely. Returns `false` if `id` is not in the cart.
    fn remove(&mut self, id: &str) -> bool {
        self.lines.remove(id).is_some()
    }

    fn clear(&mut self) {
        self.lines.clear();
    }

    /// Keep only lines matching `keep`.
    fn retain(&mut self, mut keep: impl FnMut(&ProductId) -> bool) {
        self.lines.retain(|id, _| keep(id));
    }
}

impl FromIterator<(ProductId, Quantity)> for CartState {
    fn from_iter<I: IntoIterator<Item = (ProductId, Quantity)>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

/// Serialize cart state for the persistence slot.
///
/// # Errors
///
/// Returns an error only if serialization itself fails, which cannot happen
/// for string keys and integer values.
pub fn serialize_state(state: &CartState) -> serde_json::Result<String> {
    serde_json::to_string(state)
}

/// Parse a persistence slot value. Any zero, negative, or non-integer
/// quantity makes the whole value malformed.
///
/// # Errors
///
/// Returns the JSON error if the value is malformed.
pub fn deserialize_state(raw: &str) -> serde_json::Result<CartState> {
    serde_json::from_str(raw)
}

/// The cart: state plus the slot it persists to and the catalog it prices
/// against.
#[derive(Debug)]
pub struct CartStore<S, C> {
    state: CartState,
    storage: S,
    catalog: C,
    key: String,
}

impl<S: KeyValueStore, C: Catalog> CartStore<S, C> {
    /// Create a store with an empty cart under the default key. Nothing is
    /// read from storage until [`load`](Self::load).
    #[must_use]
    pub fn new(storage: S, catalog: C) -> Self {
        Self {
            state: CartState::default(),
            storage,
            catalog,
            key: CART_STORAGE_KEY.to_string(),
        }
    }

    /// Use a different persistence slot key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Create a store under the default key and hydrate it from storage.
    pub fn open(storage: S, catalog: C) -> Self {
        let mut store = Self::new(storage, catalog);
        store.load();
        store
    }

    /// Replace the in-memory cart with whatever the slot holds.
    ///
    /// An empty, unreadable, or malformed slot yields an empty cart. Lines
    /// for products no longer in the catalog are dropped.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn load(&mut self) {
        let raw = match self.storage.get(&self.key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to read cart slot: {e}");
                None
            }
        };

        let mut state = match raw.as_deref().map(deserialize_state) {
            None => CartState::default(),
            Some(Ok(state)) => state,
            Some(Err(e)) => {
                tracing::warn!("Discarding malformed cart state: {e}");
                CartState::default()
            }
        };

        let catalog = &self.catalog;
        state.retain(|id| {
            let known = catalog.product(id.as_str()).is_some();
            if !known {
                tracing::debug!(product_id = %id, "Dropping cart line for unknown product");
            }
            known
        });

        tracing::debug!(lines = state.len(), "Cart loaded");
        self.state = state;
    }

    /// Add one of `id`. Unknown products are ignored.
    #[instrument(skip(self))]
    pub fn add(&mut self, id: &str) {
        let Some(product) = self.catalog.product(id) else {
            tracing::debug!("Ignoring add for unknown product");
            return;
        };

        self.state.add(product.id.clone());
        self.persist();
    }

    /// One more of a line already in the cart.
    #[instrument(skip(self))]
    pub fn increment(&mut self, id: &str) {
        if self.state.increment(id) {
            self.persist();
        }
    }

    /// One fewer of a line already in the cart; the line is removed at zero.
    #[instrument(skip(self))]
    pub fn decrement(&mut self, id: &str) {
        if self.state.decrement(id) {
            self.persist();
        }
    }

    /// Remove a line regardless of its quantity.
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: &str) {
        if self.state.remove(id) {
            self.persist();
        }
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.state.clear();
        self.persist();
    }

    /// Current cart state.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Quantity of `id`, if it is in the cart.
    #[must_use]
    pub fn quantity(&self, id: &str) -> Option<Quantity> {
        self.state.quantity(id)
    }

    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Total number of items (the header badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.state.item_count()
    }

    /// Sum of quantity × unit price over all lines. Zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Price {
        self.state
            .iter()
            .filter_map(|(id, quantity)| {
                self.catalog
                    .product(id.as_str())
                    .map(|product| product.price.times(quantity))
            })
            .fold(Price::zero(self.catalog.currency()), Price::plus)
    }

    /// Display projection of the cart. Does not touch state or storage.
    #[must_use]
    pub fn render(&self) -> CartView {
        CartView::project(&self.state, &self.catalog)
    }

    /// Hand the current projection to a display.
    pub fn render_to<D: CartDisplay + ?Sized>(&self, display: &mut D) {
        display.show(&self.render());
    }

    /// Send the cart to checkout.
    ///
    /// # Errors
    ///
    /// Returns `CartError::EmptyCart` without calling `provider` if the cart
    /// is empty, or `CartError::Checkout` if the provider fails.
    #[instrument(skip(self, provider))]
    pub fn checkout<P: CheckoutProvider + ?Sized>(&self, provider: &P) -> Result<CheckoutSession> {
        if self.state.is_empty() {
            tracing::info!("Checkout attempted with an empty cart");
            return Err(CartError::EmptyCart);
        }

        let lines: Vec<CheckoutLine> = self
            .state
            .iter()
            .map(|(id, quantity)| CheckoutLine {
                product_id: id.clone(),
                quantity,
            })
            .collect();

        Ok(provider.begin(&lines)?)
    }

    /// The catalog this cart prices against.
    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// The persistence backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Persistence slot key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Tear the store apart, returning its storage and catalog.
    pub fn into_parts(self) -> (S, C) {
        (self.storage, self.catalog)
    }

    fn persist(&mut self) {
        let result = if self.state.is_empty() {
            self.storage.remove(&self.key)
        } else {
            match serialize_state(&self.state) {
                Ok(json) => self.storage.set(&self.key, &json),
                Err(e) => {
                    tracing::warn!("Failed to serialize cart state: {e}");
                    return;
                }
            }
        };

        if let Err(e) = result {
            tracing::warn!(key = %self.key, "Failed to persist cart: {e}");
        }
    }
}
