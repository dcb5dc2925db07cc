//! Load the configured catalog and print a summary.

use minimart_shop::catalog::{Catalog, FileCatalogSource, HttpCatalogSource};
use minimart_shop::config::ShopConfig;

/// Load the catalog from the configured source and print its contents.
///
/// Unlike a shop session, a load failure here is reported as an error
/// rather than degraded to an empty catalog: the command exists to
/// inspect the data.
///
/// # Errors
///
/// Returns an error if configuration is invalid or either collection
/// fails to load.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ShopConfig::from_env()?;

    let catalog = if let (Some(products), Some(categories)) =
        (config.products_url.clone(), config.categories_url.clone())
    {
        Catalog::load(&HttpCatalogSource::new(products, categories)).await?
    } else {
        Catalog::load(&FileCatalogSource::new(config.data_dir.clone())).await?
    };

    print_summary(&catalog);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_summary(catalog: &Catalog) {
    println!("categories ({}):", catalog.categories().len());
    for category in catalog.categories() {
        println!("  {:<16} {}", category.key, category.title);
    }

    println!("products ({}):", catalog.products().len());
    for product in catalog.products() {
        let unit = if product.by_weight { "kg" } else { "pc" };
        println!(
            "  {:>6}  {:<8}  {:<28} {:>8} /{unit}  min {}",
            product.id, product.article, product.name, product.price, product.min_quantity
        );
    }
}
