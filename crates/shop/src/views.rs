//! Derived product views.
//!
//! The projector owns the view state (search query, active category,
//! pagination cursor, active tab) and the derived id lists computed from
//! it. It holds no products of its own: every list is recomputed from the
//! catalog on a query or category change, and the visible slice is a
//! deterministic prefix of the filtered list.
//!
//! Search browsing and category browsing are two independent derived
//! lists; selecting a category never disturbs the search list or its
//! cursor.

use minimart_core::ProductId;

use crate::catalog::{Catalog, Product};

/// The mini-application's top-level tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Shop,
    Categories,
    CategoryProducts,
    Cart,
}

impl Tab {
    /// Parse from a tab identifier.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "categories" => Self::Categories,
            "category-products" => Self::CategoryProducts,
            "cart" => Self::Cart,
            _ => Self::Shop,
        }
    }

    /// Convert to a tab identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shop => "shop",
            Self::Categories => "categories",
            Self::CategoryProducts => "category-products",
            Self::Cart => "cart",
        }
    }
}

/// Derived-view state over a loaded catalog.
#[derive(Debug, Clone)]
pub struct Projector {
    page_size: usize,
    query: String,
    page: u32,
    tab: Tab,
    filtered: Vec<ProductId>,
    active_category: Option<String>,
    category_filtered: Vec<ProductId>,
}

impl Projector {
    /// Create a projector over a catalog, with the filtered list starting
    /// as the full catalog and the cursor on page 1.
    #[must_use]
    pub fn new(catalog: &Catalog, page_size: usize) -> Self {
        Self {
            page_size,
            query: String::new(),
            page: 1,
            tab: Tab::default(),
            filtered: all_ids(catalog),
            active_category: None,
            category_filtered: Vec::new(),
        }
    }

    /// Recompute the filtered list for a search query and reset the
    /// cursor to page 1.
    ///
    /// The query is trimmed and case-folded; an empty query restores the
    /// full catalog in original order. A non-empty query keeps products
    /// whose name, description, or category key contains it.
    pub fn search(&mut self, catalog: &Catalog, query: &str) {
        self.query = query.to_string();
        let folded = query.trim().to_lowercase();

        self.filtered = if folded.is_empty() {
            all_ids(catalog)
        } else {
            catalog
                .products()
                .iter()
                .filter(|p| matches_query(p, &folded))
                .map(|p| p.id)
                .collect()
        };
        self.page = 1;
    }

    /// Select a category: recompute the category-scoped list and switch to
    /// the category-products tab. The search list and its cursor are
    /// untouched.
    pub fn select_category(&mut self, catalog: &Catalog, key: &str) {
        self.active_category = Some(key.to_string());
        self.category_filtered = catalog
            .products()
            .iter()
            .filter(|p| p.category == key)
            .map(|p| p.id)
            .collect();
        self.tab = Tab::CategoryProducts;
    }

    /// The visible slice: the first `page x page_size` ids of the
    /// filtered list.
    #[must_use]
    pub fn visible(&self) -> &[ProductId] {
        let len = self
            .filtered
            .len()
            .min(self.page as usize * self.page_size);
        self.filtered.get(..len).unwrap_or(&[])
    }

    /// Advance the pagination cursor by one page.
    pub fn load_more(&mut self) {
        self.page += 1;
    }

    /// Whether the filtered list extends beyond the visible slice.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.visible().len() < self.filtered.len()
    }

    /// Ids of products in the selected category, in catalog order.
    #[must_use]
    pub fn category_products(&self) -> &[ProductId] {
        &self.category_filtered
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    #[must_use]
    pub fn active_category(&self) -> Option<&str> {
        self.active_category.as_deref()
    }
}

fn all_ids(catalog: &Catalog) -> Vec<ProductId> {
    catalog.products().iter().map(|p| p.id).collect()
}

/// OR-match over the three searchable fields, all case-folded.
fn matches_query(product: &Product, folded: &str) -> bool {
    product.name.to_lowercase().contains(folded)
        || product
            .description
            .as_ref()
            .is_some_and(|d| d.to_lowercase().contains(folded))
        || product.category.to_lowercase().contains(folded)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{RawCategory, RawProduct};

    fn catalog() -> Catalog {
        let products: Vec<RawProduct> = serde_json::from_value(serde_json::json!([
            {"id": 1, "name": "Whole Milk", "price": 10, "category": "dairy",
             "description": "Fresh farm milk"},
            {"id": 2, "name": "Cheddar", "price": 12, "category": "dairy"},
            {"id": 3, "name": "Rye Bread", "price": 4, "category": "bakery"},
        ]))
        .unwrap();
        Catalog::from_raw(products, Vec::<RawCategory>::new())
    }

    fn ids(slice: &[ProductId]) -> Vec<i64> {
        slice.iter().map(|id| id.as_i64()).collect()
    }

    #[test]
    fn test_empty_query_restores_full_catalog() {
        let catalog = catalog();
        let mut views = Projector::new(&catalog, 20);

        views.search(&catalog, "milk");
        views.search(&catalog, "");
        assert_eq!(ids(views.visible()), vec![1, 2, 3]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = catalog();
        let mut views = Projector::new(&catalog, 20);

        views.search(&catalog, "MILK");
        let upper = ids(views.visible());
        views.search(&catalog, "milk");
        assert_eq!(upper, ids(views.visible()));
        assert_eq!(upper, vec![1]);
    }

    #[test]
    fn test_search_matches_description_and_category() {
        let catalog = catalog();
        let mut views = Projector::new(&catalog, 20);

        views.search(&catalog, "farm");
        assert_eq!(ids(views.visible()), vec![1]);

        views.search(&catalog, "dairy");
        assert_eq!(ids(views.visible()), vec![1, 2]);
    }

    #[test]
    fn test_search_resets_cursor() {
        let catalog = catalog();
        let mut views = Projector::new(&catalog, 1);

        views.load_more();
        assert_eq!(views.page(), 2);
        views.search(&catalog, "bread");
        assert_eq!(views.page(), 1);
    }

    #[test]
    fn test_pagination_prefix_and_has_more() {
        let catalog = catalog();
        let mut views = Projector::new(&catalog, 2);

        assert_eq!(ids(views.visible()), vec![1, 2]);
        assert!(views.has_more());

        views.load_more();
        assert_eq!(ids(views.visible()), vec![1, 2, 3]);
        assert!(!views.has_more());

        // Further pages keep advancing but the slice stays capped.
        views.load_more();
        assert_eq!(views.page(), 4);
        assert_eq!(ids(views.visible()), vec![1, 2, 3]);
        assert!(!views.has_more());
    }

    #[test]
    fn test_select_category_is_independent_of_search() {
        let catalog = catalog();
        let mut views = Projector::new(&catalog, 20);

        views.search(&catalog, "bread");
        views.select_category(&catalog, "dairy");

        assert_eq!(views.tab(), Tab::CategoryProducts);
        assert_eq!(ids(views.category_products()), vec![1, 2]);
        // The search list and cursor survive category browsing.
        assert_eq!(ids(views.visible()), vec![3]);
        assert_eq!(views.query(), "bread");
        assert_eq!(views.page(), 1);
    }

    #[test]
    fn test_tab_parse_roundtrip() {
        for tab in [Tab::Shop, Tab::Categories, Tab::CategoryProducts, Tab::Cart] {
            assert_eq!(Tab::parse(tab.as_str()), tab);
        }
        assert_eq!(Tab::parse("unknown"), Tab::Shop);
    }
}
