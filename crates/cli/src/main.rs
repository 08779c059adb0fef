//! Phone sync CLI - Connection checks and webhook test tooling.
//!
//! # Usage
//!
//! ```bash
//! # Verify Admin API credentials against the configured store
//! phone-sync check-connection
//!
//! # Sign a payload the way Shopify would
//! phone-sync sign --file order.json
//! cat order.json | phone-sync sign
//!
//! # Re-run the sync for one order
//! phone-sync sync-order 450789469
//! ```
//!
//! # Commands
//!
//! - `check-connection` - Report configuration and call `GET /shop.json`
//! - `sign` - Print the `X-Shopify-Hmac-SHA256` value for a body
//! - `sync-order` - Fetch an order and sync its shipping phone

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "phone-sync")]
#[command(author, version, about = "Shopify phone sync CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check Admin API credentials against the configured store
    CheckConnection,
    /// Print the base64 HMAC-SHA256 signature of a webhook body
    Sign {
        /// File holding the raw body (reads stdin if omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Fetch an order and sync its shipping phone to the customer
    SyncOrder {
        /// Order ID (not the order number)
        id: u64,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so `sign` output can be piped
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::CheckConnection => commands::connection::check().await?,
        Commands::Sign { file } => commands::sign::run(file.as_deref())?,
        Commands::SyncOrder { id } => commands::sync::order(id).await?,
    }
    Ok(())
}
