//! Vibe Commerce CLI - Terminal client for the commerce API.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! vc-cli products list --category Kitchen --max-price 50 --page 2
//! vc-cli products show 12
//!
//! # Work with the cart
//! vc-cli cart add 12
//! vc-cli cart set 12 3
//! vc-cli cart show
//!
//! # Place an order and look it up
//! vc-cli checkout --name "Ada Lovelace" --email ada@example.com
//! vc-cli orders list --status completed
//! vc-cli orders show ORD-1700000000000
//! ```
//!
//! # Environment Variables
//!
//! - `COMMERCE_API_URL` - Commerce API base URL (overridden by `--api-url`)
//! - `COMMERCE_USER_ID` - Caller identity sent in the `user-id` header

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use vibe_commerce_storefront::api::CommerceClient;
use vibe_commerce_storefront::config::CommerceApiConfig;

mod commands;

#[derive(Parser)]
#[command(name = "vc-cli")]
#[command(author, version, about = "Vibe Commerce CLI")]
struct Cli {
    /// Commerce API base URL (defaults to `COMMERCE_API_URL`)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse products
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Inspect and change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for everything in the cart
    Checkout {
        /// Customer full name
        #[arg(short, long)]
        name: String,

        /// Customer email address
        #[arg(short, long)]
        email: String,
    },
    /// Browse past orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List a page of products
    List {
        /// Substring to search for
        #[arg(long)]
        search: Option<String>,

        /// Exact category
        #[arg(long)]
        category: Option<String>,

        /// Lowest price
        #[arg(long)]
        min_price: Option<String>,

        /// Highest price
        #[arg(long)]
        max_price: Option<String>,

        /// Page number (1-based)
        #[arg(long)]
        page: Option<u32>,
    },
    /// Show one product
    Show {
        /// Product ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart with totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        id: i64,
    },
    /// Set a line's quantity (0 or less removes it)
    Set {
        /// Product ID
        id: i64,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove {
        /// Product ID
        id: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List a page of orders
    List {
        /// Page number (1-based)
        #[arg(long)]
        page: Option<u32>,

        /// Only orders with this status
        #[arg(long)]
        status: Option<String>,
    },
    /// Show one order
    Show {
        /// Order ID
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Build the API client from the environment and `--api-url`.
fn client(api_url: Option<&str>) -> Result<CommerceClient, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let mut config = CommerceApiConfig::from_env()?;
    if let Some(url) = api_url {
        config.base_url = CommerceApiConfig::with_base_url(url)?.base_url;
    }
    tracing::debug!(api = %config.base_url, "Using commerce API");

    Ok(CommerceClient::new(&config))
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let client = client(cli.api_url.as_deref())?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List {
                search,
                category,
                min_price,
                max_price,
                page,
            } => {
                commands::products::list(
                    &client,
                    &commands::products::ListArgs {
                        search,
                        category,
                        min_price,
                        max_price,
                        page,
                    },
                )
                .await?;
            }
            ProductsAction::Show { id } => commands::products::show(&client, id).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&client).await?,
            CartAction::Add { id } => commands::cart::add(&client, id).await?,
            CartAction::Set { id, quantity } => commands::cart::set(&client, id, quantity).await?,
            CartAction::Remove { id } => commands::cart::remove(&client, id).await?,
            CartAction::Clear => commands::cart::clear(&client).await?,
        },
        Commands::Checkout { name, email } => {
            commands::checkout::place_order(&client, name, email).await?;
        }
        Commands::Orders { action } => match action {
            OrdersAction::List { page, status } => {
                commands::orders::list(&client, page, status.as_deref()).await?;
            }
            OrdersAction::Show { id } => commands::orders::show(&client, &id).await?,
        },
    }
    Ok(())
}
