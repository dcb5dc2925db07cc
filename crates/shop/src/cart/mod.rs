//! The cart ledger.
//!
//! A mapping from product id to quantity, kept in the order entries were
//! first added. Quantities are decimals to support by-weight products. The
//! ledger enforces the minimum-quantity rules on entry and persists itself
//! in full after every mutation; it never stores a zero, negative, or
//! sub-minimum quantity.

mod store;

use minimart_core::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};

pub use store::{CartStore, FileCartStore, MemoryCartStore, StoreError};

/// One ledger line: a product id and its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub id: ProductId,
    pub quantity: Decimal,
}

/// The cart ledger.
///
/// Owns the entry collection exclusively; every mutating operation writes
/// the serialized ledger through to the store.
pub struct CartLedger<S: CartStore> {
    entries: Vec<CartEntry>,
    store: S,
}

impl<S: CartStore> CartLedger<S> {
    /// Create an empty ledger backed by the given store.
    pub fn new(store: S) -> Self {
        Self {
            entries: Vec::new(),
            store,
        }
    }

    /// Restore the ledger from its persisted slot.
    ///
    /// A missing slot or an unreadable snapshot yields an empty ledger.
    /// Entries referencing ids absent from the catalog are silently
    /// dropped.
    pub fn restore(store: S, catalog: &Catalog) -> Self {
        let entries = match store.load() {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<CartEntry>>(&blob) {
                Ok(entries) => entries
                    .into_iter()
                    .filter(|entry| catalog.contains(entry.id))
                    .collect(),
                Err(e) => {
                    tracing::warn!("discarding unreadable cart snapshot: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("cart restore failed, starting empty: {e}");
                Vec::new()
            }
        };

        Self { entries, store }
    }

    /// Add one whole unit of a product, creating the entry at quantity 1
    /// if absent.
    ///
    /// Always adds a whole unit, including for by-weight products; their
    /// fractional granularity applies only to explicit quantity entry via
    /// [`Self::set_quantity`].
    pub fn increment(&mut self, id: ProductId) {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => entry.quantity += Decimal::ONE,
            None => self.entries.push(CartEntry {
                id,
                quantity: Decimal::ONE,
            }),
        }
        self.persist();
    }

    /// Remove one whole unit of a product; at quantity 1 the entry is
    /// removed entirely. No-op when the entry is absent.
    pub fn decrement(&mut self, id: ProductId) {
        let Some(index) = self.entries.iter().position(|entry| entry.id == id) else {
            return;
        };

        if let Some(entry) = self.entries.get_mut(index) {
            if entry.quantity > Decimal::ONE {
                entry.quantity -= Decimal::ONE;
            } else {
                self.entries.remove(index);
            }
        }
        self.persist();
    }

    /// Set a product's quantity from raw user input.
    ///
    /// Unparseable input is silently ignored. A positive value below the
    /// product's minimum is clamped up to it; a final value at or below
    /// zero removes the entry.
    pub fn set_quantity(&mut self, product: &Product, raw: &str) {
        let Ok(parsed) = raw.trim().parse::<Decimal>() else {
            return;
        };

        let quantity = if parsed > Decimal::ZERO && parsed < product.min_quantity {
            product.min_quantity
        } else {
            parsed
        };

        if quantity <= Decimal::ZERO {
            self.entries.retain(|entry| entry.id != product.id);
        } else {
            match self
                .entries
                .iter_mut()
                .find(|entry| entry.id == product.id)
            {
                Some(entry) => entry.quantity = quantity,
                None => self.entries.push(CartEntry {
                    id: product.id,
                    quantity,
                }),
            }
        }
        self.persist();
    }

    /// Delete a product's entry if present.
    pub fn remove(&mut self, id: ProductId) {
        self.entries.retain(|entry| entry.id != id);
        self.persist();
    }

    /// The stored quantity for a product, or zero when absent.
    #[must_use]
    pub fn quantity(&self, id: ProductId) -> Decimal {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map_or(Decimal::ZERO, |entry| entry.quantity)
    }

    /// Sum of `quantity x price` over all entries.
    ///
    /// Products no longer in the catalog resolve to the zero-priced
    /// placeholder and contribute nothing.
    #[must_use]
    pub fn total(&self, catalog: &Catalog) -> Decimal {
        self.entries
            .iter()
            .map(|entry| catalog.product(entry.id).price * entry.quantity)
            .sum()
    }

    /// Remove all entries and persist the empty ledger.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    /// The entries in the order they were first added.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Write the whole ledger through to the store. Failures are logged
    /// and otherwise ignored.
    fn persist(&self) {
        let blob = match serde_json::to_string(&self.entries) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::warn!("cart serialization failed, skipping persist: {e}");
                return;
            }
        };

        if let Err(e) = self.store.save(&blob) {
            tracing::warn!("cart persistence failed: {e}");
        }
    }
}
