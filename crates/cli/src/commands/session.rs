//! Interactive shop session.
//!
//! Reads commands from stdin and drives a [`Shop`] the way the embedded
//! mini-application would: each line is one discrete user action.

use std::io::BufRead;

use minimart_core::ProductId;
use minimart_shop::app::Shop;
use minimart_shop::cart::FileCartStore;
use minimart_shop::catalog::{FileCatalogSource, HttpCatalogSource};
use minimart_shop::config::ShopConfig;
use minimart_shop::host::{Delivery, HostChannel, WebhookChannel};
use minimart_shop::order::DeliveryChoice;

const HELP: &str = "\
commands:
  list                  show the visible product slice
  more                  reveal the next page
  search <text>         filter products (empty text clears the filter)
  categories            list categories
  cat <key>             browse one category
  add <id>              add one unit to the cart
  sub <id>              remove one unit from the cart
  set <id> <qty>        set a quantity (clamped to the product minimum)
  rm <id>               remove a product from the cart
  cart                  show the cart and total
  delivery <choice>     today | tomorrow | custom <YYYY-MM-DD>
  comment <text>        set the order comment
  order                 submit the order and clear the cart
  quit                  leave the session";

/// Start an interactive session.
///
/// # Errors
///
/// Returns an error if configuration is invalid; everything past startup
/// degrades instead of failing.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ShopConfig::from_env()?;

    let store = FileCartStore::new(config.cart_path.clone());
    let channel = config
        .order_webhook
        .clone()
        .map_or(HostChannel::Null, |url| {
            HostChannel::Webhook(WebhookChannel::new(url))
        });

    let mut shop = if let (Some(products), Some(categories)) =
        (config.products_url.clone(), config.categories_url.clone())
    {
        let source = HttpCatalogSource::new(products, categories);
        Shop::init(&source, store, channel, config.page_size).await
    } else {
        let source = FileCatalogSource::new(config.data_dir.clone());
        Shop::init(&source, store, channel, config.page_size).await
    };

    print_line(&format!(
        "minimart session: {} products, {} categories (type 'help' for commands)",
        shop.catalog().products().len(),
        shop.categories().len()
    ));

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let (command, rest) = input.split_once(' ').unwrap_or((input, ""));
        match command {
            "help" => print_line(HELP),
            "list" => print_products(&shop),
            "more" => {
                shop.load_more();
                print_products(&shop);
            }
            "search" => {
                shop.search(rest);
                print_products(&shop);
            }
            "categories" => print_categories(&shop),
            "cat" => {
                shop.select_category(rest.trim());
                print_category_products(&shop);
            }
            "add" => with_id(rest, |id| shop.increment(id)),
            "sub" => with_id(rest, |id| shop.decrement(id)),
            "set" => match rest.split_once(' ') {
                Some((id, quantity)) => {
                    with_id(id, |id| shop.set_quantity(id, quantity.trim()));
                }
                None => print_line("usage: set <id> <qty>"),
            },
            "rm" => with_id(rest, |id| shop.remove(id)),
            "cart" => print_cart(&shop),
            "delivery" => set_delivery(&mut shop, rest),
            "comment" => shop.set_comment(rest),
            "order" => {
                let (record, outcome) = shop.submit_order().await;
                match outcome {
                    Delivery::Sent => {
                        print_line(&format!("order sent to host ({})", record.amount));
                    }
                    Delivery::Notified(text) => print_line(&text),
                }
            }
            "quit" | "exit" => break,
            _ => print_line("unknown command (type 'help')"),
        }
    }

    Ok(())
}

fn set_delivery<P: minimart_shop::cart::CartStore>(shop: &mut Shop<P>, rest: &str) {
    let (choice, date) = rest.split_once(' ').unwrap_or((rest, ""));
    let choice = DeliveryChoice::parse(choice.trim());
    if choice == DeliveryChoice::Custom && !date.trim().is_empty() {
        shop.set_custom_date(date.trim());
    }
    shop.set_delivery(choice);
    print_line(&format!("delivery: {}", choice.as_str()));
}

fn with_id(raw: &str, action: impl FnOnce(ProductId)) {
    match raw.trim().parse::<i64>() {
        Ok(id) => action(ProductId::new(id)),
        Err(_) => print_line("expected a numeric product id"),
    }
}

#[allow(clippy::print_stdout)]
fn print_line(text: &str) {
    println!("{text}");
}

#[allow(clippy::print_stdout)]
fn print_products<P: minimart_shop::cart::CartStore>(shop: &Shop<P>) {
    for product in shop.visible_products() {
        let in_cart = shop.quantity(product.id);
        let marker = if in_cart > rust_decimal::Decimal::ZERO {
            format!("  [x{in_cart}]")
        } else {
            String::new()
        };
        println!(
            "  {:>6}  {:<28} {:>8}{marker}",
            product.id, product.name, product.price
        );
    }
    if shop.has_more() {
        println!("  ... more available (type 'more')");
    }
}

#[allow(clippy::print_stdout)]
fn print_categories<P: minimart_shop::cart::CartStore>(shop: &Shop<P>) {
    for category in shop.categories() {
        println!("  {:<16} {}", category.key, category.title);
    }
}

#[allow(clippy::print_stdout)]
fn print_category_products<P: minimart_shop::cart::CartStore>(shop: &Shop<P>) {
    for product in shop.category_products() {
        println!("  {:>6}  {:<28} {:>8}", product.id, product.name, product.price);
    }
}

#[allow(clippy::print_stdout)]
fn print_cart<P: minimart_shop::cart::CartStore>(shop: &Shop<P>) {
    if shop.cart_is_empty() {
        println!("  cart is empty");
        return;
    }
    for entry in shop.cart_entries() {
        let product = shop.product(entry.id);
        println!(
            "  {:<8} {:<28} x{}",
            product.article,
            product.name,
            entry.quantity.normalize()
        );
    }
    println!("  total: {:.2}", shop.total().round_dp(2));
}
