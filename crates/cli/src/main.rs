//! Coachkit CLI - Drive the storefront cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! ck-cli cart show
//!
//! # Add a product, then adjust quantities
//! ck-cli cart add hr-policy-kit
//! ck-cli cart inc hr-policy-kit
//! ck-cli cart dec hr-policy-kit
//!
//! # Hand off to checkout
//! ck-cli cart checkout
//!
//! # List products
//! ck-cli catalog list
//! ```
//!
//! # Commands
//!
//! - `cart` - Inspect and change the persisted cart
//! - `catalog` - Inspect the product catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coachkit_storefront::StorefrontConfig;

mod commands;

#[derive(Parser)]
#[command(name = "ck-cli")]
#[command(author, version, about = "Coachkit storefront cart tools")]
struct Cli {
    /// Directory holding the persisted cart (overrides `COACHKIT_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Inspect the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart
    Show,
    /// Print the cart panel as an HTML fragment
    Html,
    /// Add one of a product
    Add {
        /// Product id (see `catalog list`)
        product_id: String,
    },
    /// One more of a product already in the cart
    Inc {
        /// Product id
        product_id: String,
    },
    /// One fewer of a product; removes the line at zero
    Dec {
        /// Product id
        product_id: String,
    },
    /// Remove a product's line entirely
    Remove {
        /// Product id
        product_id: String,
    },
    /// Empty the cart
    Clear,
    /// Print the cart total
    Total,
    /// Start checkout
    Checkout,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products and prices
    List,
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "coachkit_storefront=info,ck_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Commands::Cart { action } => {
            let mut cart = commands::cart::open(&config)?;
            match action {
                CartAction::Show => commands::cart::show(&cart),
                CartAction::Html => commands::cart::html(&cart)?,
                CartAction::Add { product_id } => commands::cart::add(&mut cart, &product_id),
                CartAction::Inc { product_id } => {
                    commands::cart::increment(&mut cart, &product_id);
                }
                CartAction::Dec { product_id } => {
                    commands::cart::decrement(&mut cart, &product_id);
                }
                CartAction::Remove { product_id } => {
                    commands::cart::remove(&mut cart, &product_id);
                }
                CartAction::Clear => commands::cart::clear(&mut cart),
                CartAction::Total => commands::cart::total(&cart),
                CartAction::Checkout => commands::cart::checkout(&cart, &config.checkout())?,
            }
        }
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list(&config)?,
        },
    }
    Ok(())
}
