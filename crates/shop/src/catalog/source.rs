//! Catalog data sources.
//!
//! A [`CatalogSource`] yields the two raw collections the shop loads once
//! at startup: a products array and a categories array. Optional fields in
//! the raw records mean "apply default"; defaults are filled by the
//! normalization pass in [`super::Catalog`], never here.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Errors that can occur while fetching catalog data.
///
/// Load failures are never fatal: the caller substitutes an empty catalog
/// and the session proceeds.
#[derive(Debug, Error)]
pub enum LoadError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned a non-success status.
    #[error("unexpected status {status} fetching {resource}")]
    Status {
        resource: &'static str,
        status: u16,
    },

    /// Response body was not a valid collection.
    #[error("JSON parse error in {resource}: {source}")]
    Parse {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Reading a local data file failed.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A product record as found in the catalog data, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProduct {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub article: Option<String>,
    #[serde(default, rename = "byWeight")]
    pub by_weight: Option<bool>,
    #[serde(default, rename = "minQuantity")]
    pub min_quantity: Option<Decimal>,
    #[serde(default)]
    pub hidden: bool,
}

/// A category record as found in the catalog data, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCategory {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Source of the two catalog collections.
///
/// Implementations fetch raw records; they do not normalize or filter.
pub trait CatalogSource {
    /// Fetch the raw products array.
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<RawProduct>, LoadError>>;

    /// Fetch the raw categories array.
    fn fetch_categories(&self) -> impl Future<Output = Result<Vec<RawCategory>, LoadError>>;
}

// =============================================================================
// HTTP source
// =============================================================================

/// Catalog source backed by two HTTP endpoints returning JSON arrays.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    products_url: Url,
    categories_url: Url,
}

impl HttpCatalogSource {
    /// Create a source for the given endpoints.
    #[must_use]
    pub fn new(products_url: Url, categories_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            products_url,
            categories_url,
        }
    }

    /// GET a JSON array, checking the status before parsing.
    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        url: &Url,
        resource: &'static str,
    ) -> Result<Vec<T>, LoadError> {
        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                resource,
                status: status.as_u16(),
            });
        }

        // Read the body as text first for better parse diagnostics
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| LoadError::Parse { resource, source })
    }
}

impl CatalogSource for HttpCatalogSource {
    async fn fetch_products(&self) -> Result<Vec<RawProduct>, LoadError> {
        self.fetch(&self.products_url, "products").await
    }

    async fn fetch_categories(&self) -> Result<Vec<RawCategory>, LoadError> {
        self.fetch(&self.categories_url, "categories").await
    }
}

// =============================================================================
// File source
// =============================================================================

/// Catalog source backed by `products.json` and `categories.json` in a
/// local directory. Used for offline sessions and test fixtures.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    dir: PathBuf,
}

impl FileCatalogSource {
    /// Create a source reading from the given directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn read<T: serde::de::DeserializeOwned>(
        path: &Path,
        resource: &'static str,
    ) -> Result<Vec<T>, LoadError> {
        let body = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&body).map_err(|source| LoadError::Parse { resource, source })
    }
}

impl CatalogSource for FileCatalogSource {
    async fn fetch_products(&self) -> Result<Vec<RawProduct>, LoadError> {
        Self::read(&self.dir.join("products.json"), "products").await
    }

    async fn fetch_categories(&self) -> Result<Vec<RawCategory>, LoadError> {
        Self::read(&self.dir.join("categories.json"), "categories").await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_product_optional_fields_default() {
        let raw: RawProduct = serde_json::from_str(
            r#"{"id": 3, "name": "Rye bread", "price": 4.2, "category": "bakery"}"#,
        )
        .unwrap();
        assert_eq!(raw.id, 3);
        assert!(raw.description.is_none());
        assert!(raw.article.is_none());
        assert!(raw.by_weight.is_none());
        assert!(raw.min_quantity.is_none());
        assert!(!raw.hidden);
    }

    #[test]
    fn test_raw_product_camel_case_fields() {
        let raw: RawProduct = serde_json::from_str(
            r#"{"id": 7, "name": "Cheese", "price": 12, "byWeight": true, "minQuantity": 0.2}"#,
        )
        .unwrap();
        assert_eq!(raw.by_weight, Some(true));
        assert_eq!(raw.min_quantity, Some(Decimal::new(2, 1)));
    }

    #[test]
    fn test_raw_product_numeric_price_parses() {
        let raw: RawProduct =
            serde_json::from_str(r#"{"id": 1, "name": "Milk", "price": 2.50}"#).unwrap();
        assert_eq!(raw.price, Decimal::new(250, 2));
    }

    #[tokio::test]
    async fn test_file_source_missing_file_is_io_error() {
        let source = FileCatalogSource::new("/nonexistent/minimart-data");
        let err = source.fetch_products().await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
