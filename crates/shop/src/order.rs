//! Order composition.
//!
//! Converts the cart ledger plus the delivery selection into the payload
//! transmitted to the host application. The [`OrderRecord`] field names
//! are contractual for the host channel.

use chrono::{SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::{CartLedger, CartStore};
use crate::catalog::{Catalog, Product};

/// Delivery date selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryChoice {
    #[default]
    Today,
    Tomorrow,
    /// Deliver on an explicit date; the raw date string is carried
    /// separately.
    Custom,
    Unspecified,
}

impl DeliveryChoice {
    /// Parse from a selection identifier.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "today" => Self::Today,
            "tomorrow" => Self::Tomorrow,
            "custom" => Self::Custom,
            _ => Self::Unspecified,
        }
    }

    /// Convert to a selection identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::Custom => "custom",
            Self::Unspecified => "unspecified",
        }
    }

    /// The delivery label carried in the order payload.
    fn label(self, custom_date: &str) -> String {
        match self {
            Self::Today => "Today".to_string(),
            Self::Tomorrow => "Tomorrow".to_string(),
            Self::Custom => custom_date.to_string(),
            Self::Unspecified => "Unspecified".to_string(),
        }
    }
}

/// The order payload sent to the host application.
///
/// All fields are strings; `items` joins `"<article> <quantity>"` pairs
/// with commas and `amount` carries the total formatted to two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub delivery_date: String,
    pub amount: String,
    pub items: String,
    pub comment: String,
    /// ISO-8601 UTC composition time.
    pub timestamp: String,
}

/// Quantity input granularity for a product: 0.1 for by-weight products,
/// 1 otherwise.
///
/// Used by presentation layers; the ledger itself does not snap
/// quantities to this step.
#[must_use]
pub fn step_for(product: &Product) -> Decimal {
    if product.by_weight {
        Decimal::new(1, 1)
    } else {
        Decimal::ONE
    }
}

/// Compose the order payload from the current ledger.
///
/// Quantities render in their natural decimal form (no trailing zeros);
/// entries appear in the order they were added to the cart.
#[must_use]
pub fn compose<S: CartStore>(
    ledger: &CartLedger<S>,
    catalog: &Catalog,
    delivery: DeliveryChoice,
    custom_date: &str,
    comment: &str,
) -> OrderRecord {
    let items = ledger
        .entries()
        .iter()
        .map(|entry| {
            let product = catalog.product(entry.id);
            format!("{} {}", product.article, entry.quantity.normalize())
        })
        .collect::<Vec<_>>()
        .join(",");

    let total = ledger.total(catalog).round_dp(2);

    OrderRecord {
        delivery_date: delivery.label(custom_date),
        amount: format!("{total:.2}"),
        items,
        comment: comment.to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}
