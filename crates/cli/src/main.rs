//! Neszi Admin - Terminal back-office console.
//!
//! The terminal counterpart of the browser admin console: log in once,
//! then manage products, inventory batches, and order statuses against
//! the admin REST API. The session token persists in a local file so a
//! login survives across invocations.
//!
//! # Usage
//!
//! ```bash
//! # Log in (token is persisted at NESZI_TOKEN_FILE)
//! neszi-admin login -e admin@neszi.example
//!
//! # Products
//! neszi-admin products list
//! neszi-admin products add --name Widget --brand Acme --price-cents 500 \
//!     --image ./widget.jpg --item 123456:SN-1
//! neszi-admin products delete 3
//!
//! # Inventory (serials generated from the barcode when omitted)
//! neszi-admin inventory add 3 --barcode 123456 --barcode 123457
//!
//! # Orders
//! neszi-admin orders list
//! neszi-admin orders set-status 12 "Out for Delivery"
//! ```
//!
//! # Configuration
//!
//! - `NESZI_API_BASE_URL` - Base URL of the admin API (required)
//! - `NESZI_TOKEN_FILE` - Session token path (default `.neszi-token`)

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::{Parser, Subcommand};

use neszi_client::{ApiClient, ClientConfig, FileSessionStore};

mod commands;
mod ports;

use ports::{TerminalNavigator, TerminalNotifier};

#[derive(Parser)]
#[command(name = "neszi-admin")]
#[command(author, version, about = "Neszi back-office console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and persist the session token
    Login(commands::auth::LoginArgs),
    /// Destroy the persisted session token
    Logout,
    /// Manage the product catalog
    Products {
        #[command(subcommand)]
        action: commands::products::ProductsAction,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: commands::orders::OrdersAction,
    },
    /// Register stocked units
    Inventory {
        #[command(subcommand)]
        action: commands::inventory::InventoryAction,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let client = ApiClient::builder(config.base_url.clone())
        .session_store(FileSessionStore::new(config.token_file.clone()))
        .navigator(TerminalNavigator)
        .notifier(TerminalNotifier)
        .build();

    match cli.command {
        Commands::Login(args) => commands::auth::login(&client, args).await?,
        Commands::Logout => commands::auth::logout(&client),
        Commands::Products { action } => commands::products::run(&client, action).await?,
        Commands::Orders { action } => commands::orders::run(&client, action).await?,
        Commands::Inventory { action } => commands::inventory::run(&client, action).await?,
    }
    Ok(())
}
