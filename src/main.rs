//! RocketShoes cart CLI - exercise the cart store from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Add one unit of product 1 to the cart
//! rocketshoes-cart add 1
//!
//! # Set product 1's quantity to 3
//! rocketshoes-cart update 1 3
//!
//! # Remove product 1 entirely
//! rocketshoes-cart remove 1
//!
//! # Print the current cart
//! rocketshoes-cart show
//! ```
//!
//! The cart is persisted to the file named by `CART_STORAGE_PATH`, so state
//! survives between invocations the way a browser session's cart would.

#![cfg_attr(not(test), forbid(unsafe_code))]
// CLI output goes to stdout
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

use rocketshoes_cart::cart::{CartError, CartStore};
use rocketshoes_cart::catalog::CatalogClient;
use rocketshoes_cart::config::CartConfig;
use rocketshoes_cart::mirror::FileMirror;
use rocketshoes_cart::notify::{CartOp, Notifier, TracingNotifier, failure_message};
use rocketshoes_cart::types::{CartItem, ProductId};

#[derive(Parser)]
#[command(name = "rocketshoes-cart")]
#[command(author, version, about = "RocketShoes shopping cart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product to the cart
    Add {
        /// Product id
        product_id: i64,
    },
    /// Remove a product from the cart entirely
    Remove {
        /// Product id
        product_id: i64,
    },
    /// Set the quantity of a product in the cart
    Update {
        /// Product id
        product_id: i64,
        /// New quantity (at least 1)
        amount: i64,
    },
    /// Print the current cart contents
    Show,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing with EnvFilter; defaults to info for our crate
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rocketshoes_cart=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = CartConfig::from_env().expect("Failed to load configuration");
    let catalog = CatalogClient::new(&config.catalog).expect("Failed to build catalog client");
    let mirror = FileMirror::new(&config.storage_path);

    let mut store =
        CartStore::open(catalog, mirror, config.storage_key).expect("Failed to open cart store");

    let (op, outcome) = match cli.command {
        Commands::Add { product_id } => (
            CartOp::Add,
            store.add_product(ProductId::new(product_id)).await,
        ),
        Commands::Remove { product_id } => (
            CartOp::Remove,
            store.remove_product(ProductId::new(product_id)),
        ),
        Commands::Update { product_id, amount } => (
            CartOp::UpdateAmount,
            store
                .update_product_amount(ProductId::new(product_id), amount)
                .await,
        ),
        Commands::Show => {
            print_cart(store.items());
            return;
        }
    };

    if let Err(error) = outcome {
        tracing::debug!(%error, "cart operation failed");
        TracingNotifier.notify(failure_message(op, &error));
        std::process::exit(match error {
            CartError::OutOfStock { .. } | CartError::InvalidAmount { .. } => 2,
            _ => 1,
        });
    }

    print_cart(store.items());
}

/// Print the cart as a simple line-per-item listing with a subtotal.
fn print_cart(items: &[CartItem]) {
    if items.is_empty() {
        println!("(cart is empty)");
        return;
    }

    let mut subtotal = rust_decimal::Decimal::ZERO;
    for item in items {
        let line_total = item.line_total();
        subtotal += line_total;
        println!(
            "{:>6}  {:<50}  {:>3} x {:>8}  = {:>9}",
            item.id.as_i64(),
            item.title,
            item.amount,
            item.price.to_string(),
            line_total.to_string()
        );
    }
    println!("{:>80}", format!("subtotal: {subtotal}"));
}
