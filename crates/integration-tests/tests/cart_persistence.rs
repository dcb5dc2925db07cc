//! Integration tests for ledger rules and persistence round-trips.

use minimart_core::ProductId;
use minimart_integration_tests::fixture_catalog;
use minimart_shop::cart::{CartLedger, MemoryCartStore};
use rust_decimal::Decimal;

// =============================================================================
// Quantity rules
// =============================================================================

#[tokio::test]
async fn test_set_then_get_honors_minimum() {
    let catalog = fixture_catalog().await;
    let mut cart = CartLedger::new(MemoryCartStore::new());
    let cheddar = ProductId::new(2);

    // Below-minimum positive values clamp up.
    cart.set_quantity(catalog.product(cheddar), "0.05");
    assert_eq!(cart.quantity(cheddar), Decimal::new(2, 1));

    // At or above the minimum the value is stored as given.
    cart.set_quantity(catalog.product(cheddar), "1.5");
    assert_eq!(cart.quantity(cheddar), Decimal::new(15, 1));

    // Non-positive values remove the entry.
    cart.set_quantity(catalog.product(cheddar), "0");
    assert_eq!(cart.quantity(cheddar), Decimal::ZERO);
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_increment_then_decrement_restores_prior_state() {
    let catalog = fixture_catalog().await;
    let mut cart = CartLedger::new(MemoryCartStore::new());
    let milk = ProductId::new(1);

    cart.increment(milk);
    cart.decrement(milk);

    assert!(cart.is_empty());
    assert_eq!(cart.quantity(milk), Decimal::ZERO);
    assert_eq!(cart.total(&catalog), Decimal::ZERO);
}

// =============================================================================
// Persistence round-trips
// =============================================================================

#[tokio::test]
async fn test_persist_and_restore_yields_identical_ledger() {
    let catalog = fixture_catalog().await;
    let store = MemoryCartStore::new();
    let mut cart = CartLedger::new(store);

    cart.increment(ProductId::new(1));
    cart.increment(ProductId::new(1));
    cart.set_quantity(catalog.product(ProductId::new(2)), "0.4");

    let entries = cart.entries().to_vec();
    let blob = MemoryCartStore::with_blob(
        serde_json::to_string(&entries).expect("serializable entries"),
    );
    let restored = CartLedger::restore(blob, &catalog);

    assert_eq!(restored.entries(), entries.as_slice());
}

#[tokio::test]
async fn test_restore_drops_ids_absent_from_catalog() {
    let catalog = fixture_catalog().await;
    // Id 4 is hidden and id 99 never existed; both must be pruned.
    let blob = r#"[
        {"id": 1, "quantity": "2"},
        {"id": 4, "quantity": "1"},
        {"id": 99, "quantity": "3"}
    ]"#;
    let restored = CartLedger::restore(MemoryCartStore::with_blob(blob), &catalog);

    assert_eq!(restored.len(), 1);
    assert_eq!(restored.quantity(ProductId::new(1)), Decimal::from(2));
}

#[tokio::test]
async fn test_restore_resets_on_malformed_blob() {
    let catalog = fixture_catalog().await;

    for blob in ["{not json", "42", r#"{"id": 1}"#] {
        let restored = CartLedger::restore(MemoryCartStore::with_blob(blob), &catalog);
        assert!(restored.is_empty(), "blob {blob:?} should reset the ledger");
    }
}

#[tokio::test]
async fn test_every_mutation_writes_the_slot() {
    let catalog = fixture_catalog().await;
    let mut cart = CartLedger::new(MemoryCartStore::new());
    let milk = ProductId::new(1);

    let snapshot = |cart: &CartLedger<MemoryCartStore>| {
        cart.store().snapshot().expect("readable slot")
    };

    cart.increment(milk);
    let after_add = snapshot(&cart).expect("slot written");

    cart.set_quantity(catalog.product(milk), "3");
    let after_set = snapshot(&cart).expect("slot written");
    assert_ne!(after_add, after_set);

    cart.remove(milk);
    assert_eq!(snapshot(&cart).as_deref(), Some("[]"));
}
