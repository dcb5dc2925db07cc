//! The shop coordinator.
//!
//! [`Shop`] composes one catalog, one cart ledger, and one projector with
//! the host channel and the delivery selection, and exposes the discrete
//! user actions as thin delegating operations. All state is exclusively
//! owned here; there is no shared mutable state.

use chrono::{Days, Utc};
use minimart_core::ProductId;
use rust_decimal::Decimal;

use crate::cart::{CartEntry, CartLedger, CartStore};
use crate::catalog::{Catalog, CatalogSource, Category, Product};
use crate::host::{Delivery, HostChannel};
use crate::order::{self, DeliveryChoice, OrderRecord};
use crate::views::{Projector, Tab};

/// A shop session.
///
/// Built once via [`Shop::init`]; afterwards every operation runs to
/// completion on the caller's thread in response to a discrete user
/// action.
pub struct Shop<P: CartStore> {
    catalog: Catalog,
    ledger: CartLedger<P>,
    views: Projector,
    channel: HostChannel,
    delivery: DeliveryChoice,
    custom_date: String,
    comment: String,
}

impl<P: CartStore> Shop<P> {
    /// Initialize a session: load the catalog, restore the persisted
    /// cart, default the custom delivery date to tomorrow, and request
    /// the maximal viewport from the host.
    ///
    /// A catalog load failure is logged and the session starts with empty
    /// collections; the projector never computes against a partially
    /// loaded catalog.
    pub async fn init<S: CatalogSource>(
        source: &S,
        store: P,
        channel: HostChannel,
        page_size: usize,
    ) -> Self {
        let catalog = match Catalog::load(source).await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!("catalog load failed, starting with empty collections: {e}");
                Catalog::default()
            }
        };

        let ledger = CartLedger::restore(store, &catalog);
        let views = Projector::new(&catalog, page_size);
        let custom_date = (Utc::now().date_naive() + Days::new(1))
            .format("%Y-%m-%d")
            .to_string();

        channel.expand();

        Self {
            catalog,
            ledger,
            views,
            channel,
            delivery: DeliveryChoice::default(),
            custom_date,
            comment: String::new(),
        }
    }

    // =========================================================================
    // Catalog access
    // =========================================================================

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Fail-safe product lookup; unknown ids resolve to the placeholder.
    #[must_use]
    pub fn product(&self, id: ProductId) -> &Product {
        self.catalog.product(id)
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        self.catalog.categories()
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Apply a search query (every keystroke re-derives the filtered
    /// list and resets pagination).
    pub fn search(&mut self, query: &str) {
        self.views.search(&self.catalog, query);
    }

    /// Browse a category. Independent of the search view.
    pub fn select_category(&mut self, key: &str) {
        self.views.select_category(&self.catalog, key);
    }

    /// Reveal the next page of the filtered list.
    pub fn load_more(&mut self) {
        self.views.load_more();
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.views.has_more()
    }

    /// The currently visible products, resolved against the catalog.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        self.views
            .visible()
            .iter()
            .map(|&id| self.catalog.product(id))
            .collect()
    }

    /// Products of the selected category, resolved against the catalog.
    #[must_use]
    pub fn category_products(&self) -> Vec<&Product> {
        self.views
            .category_products()
            .iter()
            .map(|&id| self.catalog.product(id))
            .collect()
    }

    #[must_use]
    pub const fn tab(&self) -> Tab {
        self.views.tab()
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.views.set_tab(tab);
    }

    #[must_use]
    pub const fn views(&self) -> &Projector {
        &self.views
    }

    // =========================================================================
    // Cart
    // =========================================================================

    pub fn increment(&mut self, id: ProductId) {
        self.ledger.increment(id);
    }

    pub fn decrement(&mut self, id: ProductId) {
        self.ledger.decrement(id);
    }

    /// Set a quantity from raw user input, applying the product's
    /// minimum-quantity rule. Unparseable input is ignored.
    pub fn set_quantity(&mut self, id: ProductId, raw: &str) {
        let product = self.catalog.product(id);
        self.ledger.set_quantity(product, raw);
    }

    pub fn remove(&mut self, id: ProductId) {
        self.ledger.remove(id);
    }

    #[must_use]
    pub fn quantity(&self, id: ProductId) -> Decimal {
        self.ledger.quantity(id)
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.ledger.total(&self.catalog)
    }

    #[must_use]
    pub fn cart_entries(&self) -> &[CartEntry] {
        self.ledger.entries()
    }

    #[must_use]
    pub fn cart_is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    // =========================================================================
    // Delivery and order
    // =========================================================================

    pub fn set_delivery(&mut self, choice: DeliveryChoice) {
        self.delivery = choice;
    }

    #[must_use]
    pub const fn delivery(&self) -> DeliveryChoice {
        self.delivery
    }

    pub fn set_custom_date(&mut self, date: &str) {
        self.custom_date = date.to_string();
    }

    #[must_use]
    pub fn custom_date(&self) -> &str {
        &self.custom_date
    }

    pub fn set_comment(&mut self, comment: &str) {
        self.comment = comment.to_string();
    }

    /// Compose the order, hand it to the host, then clear and persist the
    /// ledger.
    ///
    /// The ledger is cleared unconditionally: composing an order is
    /// destructive to cart state regardless of delivery outcome.
    pub async fn submit_order(&mut self) -> (OrderRecord, Delivery) {
        let record = order::compose(
            &self.ledger,
            &self.catalog,
            self.delivery,
            &self.custom_date,
            &self.comment,
        );

        let outcome = self.channel.deliver(&record).await;
        self.ledger.clear();

        (record, outcome)
    }
}
