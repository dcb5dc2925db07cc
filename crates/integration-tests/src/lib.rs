//! Integration tests for Minimart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p minimart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_views` - Catalog loading, normalization, and derived views
//! - `cart_persistence` - Ledger rules and persistence round-trips
//! - `order_flow` - Full session scenarios through order submission
//!
//! Tests run against the file catalog source (fixtures under
//! `tests/fixtures/`) and in-memory or temp-file cart stores; no network
//! access is required.

use std::path::PathBuf;

use minimart_shop::catalog::{Catalog, FileCatalogSource};

/// Directory holding the catalog fixture files.
#[must_use]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Load the fixture catalog.
///
/// # Panics
///
/// Panics if the fixture files are missing or malformed; fixtures are part
/// of the test suite.
#[allow(clippy::unwrap_used)]
pub async fn fixture_catalog() -> Catalog {
    Catalog::load(&FileCatalogSource::new(fixtures_dir()))
        .await
        .unwrap()
}

/// A unique temp file path for a cart slot.
#[must_use]
pub fn temp_cart_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("minimart-{tag}-{}.json", std::process::id()))
}
