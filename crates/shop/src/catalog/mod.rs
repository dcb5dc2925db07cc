//! Normalized product and category catalog.
//!
//! The catalog is loaded once at startup from a [`CatalogSource`] and
//! normalized in a single pass: hidden products are dropped, missing
//! articles are derived from the product id, by-weight defaults are filled,
//! and image references are rewritten to the canonical format. After load
//! the collections never change for the lifetime of the session.

mod source;

use minimart_core::{Article, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use source::{
    CatalogSource, FileCatalogSource, HttpCatalogSource, LoadError, RawCategory, RawProduct,
};

/// Canonical image extension all catalog image references are rewritten to.
const IMAGE_EXT: &str = "webp";

/// Image reference carried by the placeholder product.
const PLACEHOLDER_IMAGE: &str = "images/noimage.webp";

/// Display name carried by the placeholder product.
const REMOVED_PRODUCT_NAME: &str = "Removed product";

/// A normalized catalog product.
///
/// Every product exposed by the catalog has `article`, `by_weight`, and
/// `min_quantity` populated; consumers never re-apply defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    /// Key of the category this product belongs to; empty when the record
    /// carried none.
    pub category: String,
    pub image: Option<String>,
    pub article: Article,
    pub by_weight: bool,
    pub min_quantity: Decimal,
}

impl Product {
    /// The deterministic placeholder returned for ids not in the catalog.
    ///
    /// Zero-priced so removed products contribute nothing to cart totals.
    #[must_use]
    pub fn removed() -> Self {
        Self {
            id: ProductId::REMOVED,
            name: REMOVED_PRODUCT_NAME.to_string(),
            description: None,
            price: Decimal::ZERO,
            category: String::new(),
            image: Some(PLACEHOLDER_IMAGE.to_string()),
            article: Article::from_id(ProductId::REMOVED),
            by_weight: false,
            min_quantity: Decimal::ONE,
        }
    }
}

/// A normalized catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    pub title: String,
    pub image: Option<String>,
}

/// The loaded catalog.
///
/// Owns the product and category collections exclusively after load.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    placeholder: Product,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::from_raw(Vec::new(), Vec::new())
    }
}

impl Catalog {
    /// Load and normalize both collections from a source.
    ///
    /// Fetches products, then categories; both must complete before the
    /// catalog is ready. A failure in either propagates and the caller is
    /// expected to fall back to an empty catalog for both halves.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if either fetch fails or returns an
    /// unparseable body.
    pub async fn load<S: CatalogSource>(source: &S) -> Result<Self, LoadError> {
        let products = source.fetch_products().await?;
        let categories = source.fetch_categories().await?;

        let catalog = Self::from_raw(products, categories);
        tracing::info!(
            products = catalog.products.len(),
            categories = catalog.categories.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Build a catalog from raw records: drop hidden products, normalize
    /// the rest.
    #[must_use]
    pub fn from_raw(products: Vec<RawProduct>, categories: Vec<RawCategory>) -> Self {
        let products = products
            .into_iter()
            .filter(|raw| !raw.hidden)
            .map(normalize_product)
            .collect();
        let categories = categories.into_iter().map(normalize_category).collect();

        Self {
            products,
            categories,
            placeholder: Product::removed(),
        }
    }

    /// All visible products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All categories, in catalog order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a product by id.
    ///
    /// Never fails: unknown ids resolve to the [`Product::removed`]
    /// placeholder, so callers need not branch on absence.
    #[must_use]
    pub fn product(&self, id: ProductId) -> &Product {
        self.products
            .iter()
            .find(|p| p.id == id)
            .unwrap_or(&self.placeholder)
    }

    /// Whether the catalog holds a product with this id.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.products.iter().any(|p| p.id == id)
    }

    /// Look up a category by key.
    #[must_use]
    pub fn category(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.key == key)
    }

    /// Whether both collections are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.categories.is_empty()
    }
}

// =============================================================================
// Normalization
// =============================================================================

/// Normalize a raw product record, filling defaults exactly once.
fn normalize_product(raw: RawProduct) -> Product {
    let id = ProductId::new(raw.id);
    let article = raw
        .article
        .and_then(|a| Article::parse(&a).ok())
        .unwrap_or_else(|| Article::from_id(id));
    let by_weight = raw.by_weight.unwrap_or(false);
    let min_quantity = raw.min_quantity.unwrap_or_else(|| default_min_quantity(by_weight));

    Product {
        id,
        name: raw.name,
        description: raw.description,
        price: raw.price,
        category: raw.category.unwrap_or_default(),
        image: raw.image.map(canonicalize_image),
        article,
        by_weight,
        min_quantity,
    }
}

fn normalize_category(raw: RawCategory) -> Category {
    Category {
        key: raw.key,
        title: raw.title,
        image: raw.image.map(canonicalize_image),
    }
}

/// Minimum orderable quantity when the record carries none.
fn default_min_quantity(by_weight: bool) -> Decimal {
    if by_weight {
        Decimal::new(1, 1) // 0.1
    } else {
        Decimal::ONE
    }
}

/// Rewrite an image path's extension to the canonical format.
///
/// The suffix after the last `.` is replaced, provided it is non-empty and
/// belongs to the file name rather than a directory component. Paths
/// without an extension pass through unmodified.
fn canonicalize_image(path: String) -> String {
    if path.ends_with(&format!(".{IMAGE_EXT}")) {
        return path;
    }
    match path.rfind('.') {
        Some(pos) => {
            let ext = &path[pos + 1..];
            if ext.is_empty() || ext.contains('/') {
                path
            } else {
                format!("{}.{IMAGE_EXT}", &path[..pos])
            }
        }
        None => path,
    }
}
