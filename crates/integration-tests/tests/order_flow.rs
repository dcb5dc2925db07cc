//! Integration tests for full session scenarios through order submission.

use minimart_core::ProductId;
use minimart_integration_tests::{fixtures_dir, temp_cart_path};
use minimart_shop::app::Shop;
use minimart_shop::cart::{FileCartStore, MemoryCartStore};
use minimart_shop::catalog::FileCatalogSource;
use minimart_shop::host::{Delivery, HostChannel, WebhookChannel};
use minimart_shop::order::DeliveryChoice;
use rust_decimal::Decimal;

async fn start_session<P: minimart_shop::cart::CartStore>(
    store: P,
    channel: HostChannel,
) -> Shop<P> {
    let source = FileCatalogSource::new(fixtures_dir());
    Shop::init(&source, store, channel, 20).await
}

// =============================================================================
// The worked scenario
// =============================================================================

#[tokio::test]
async fn test_order_scenario_items_and_amount() {
    let mut shop = start_session(MemoryCartStore::new(), HostChannel::Null).await;

    shop.increment(ProductId::new(1));
    shop.increment(ProductId::new(1));
    shop.set_quantity(ProductId::new(2), "0.05"); // clamps to 0.2

    assert_eq!(shop.total(), Decimal::new(2050, 2)); // 2 x 10.00 + 0.2 x 2.50

    shop.set_delivery(DeliveryChoice::Today);
    let (record, _) = shop.submit_order().await;

    assert_eq!(record.items, "000001 2,000002 0.2");
    assert_eq!(record.amount, "20.50");
    assert_eq!(record.delivery_date, "Today");
}

// =============================================================================
// Composition always clears the ledger
// =============================================================================

#[tokio::test]
async fn test_submit_clears_cart_without_host() {
    let mut shop = start_session(MemoryCartStore::new(), HostChannel::Null).await;
    shop.increment(ProductId::new(1));

    let (record, outcome) = shop.submit_order().await;
    match outcome {
        Delivery::Notified(text) => assert!(text.contains(&record.items)),
        Delivery::Sent => panic!("null channel cannot send"),
    }
    assert!(shop.cart_is_empty());
}

#[tokio::test]
async fn test_submit_clears_cart_when_host_unreachable() {
    // Port 1 refuses connections; delivery fails and falls back to the
    // notification path, which must still clear the cart.
    let endpoint = "http://127.0.0.1:1/orders".parse().expect("valid url");
    let channel = HostChannel::Webhook(WebhookChannel::new(endpoint));
    let mut shop = start_session(MemoryCartStore::new(), channel).await;

    shop.increment(ProductId::new(3));
    let (_, outcome) = shop.submit_order().await;

    assert!(matches!(outcome, Delivery::Notified(_)));
    assert!(shop.cart_is_empty());
}

#[tokio::test]
async fn test_submit_persists_the_empty_ledger() {
    let path = temp_cart_path("submit");
    let mut shop = start_session(FileCartStore::new(&path), HostChannel::Null).await;

    shop.increment(ProductId::new(1));
    shop.submit_order().await;

    let blob = std::fs::read_to_string(&path).expect("slot written");
    assert_eq!(blob, "[]");
    std::fs::remove_file(&path).ok();
}

// =============================================================================
// Cross-session persistence
// =============================================================================

#[tokio::test]
async fn test_cart_survives_session_restart() {
    let path = temp_cart_path("restart");

    {
        let mut shop = start_session(FileCartStore::new(&path), HostChannel::Null).await;
        shop.increment(ProductId::new(1));
        shop.set_quantity(ProductId::new(2), "0.6");
    }

    let shop = start_session(FileCartStore::new(&path), HostChannel::Null).await;
    assert_eq!(shop.quantity(ProductId::new(1)), Decimal::ONE);
    assert_eq!(shop.quantity(ProductId::new(2)), Decimal::new(6, 1));
    assert_eq!(shop.total(), Decimal::new(1150, 2)); // 10.00 + 0.6 x 2.50

    std::fs::remove_file(&path).ok();
}

// =============================================================================
// Order comment and delivery selection
// =============================================================================

#[tokio::test]
async fn test_custom_delivery_date_flows_into_payload() {
    let mut shop = start_session(MemoryCartStore::new(), HostChannel::Null).await;

    shop.set_delivery(DeliveryChoice::Custom);
    shop.set_custom_date("2026-09-01");
    shop.set_comment("call on arrival");
    let (record, _) = shop.submit_order().await;

    assert_eq!(record.delivery_date, "2026-09-01");
    assert_eq!(record.comment, "call on arrival");
}
