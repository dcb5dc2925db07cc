//! Minimart CLI - drives a shop session from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Start an interactive shop session
//! minimart session
//!
//! # Load the catalog and print a summary
//! minimart catalog
//! ```
//!
//! # Commands
//!
//! - `session` - Interactive session: search, browse categories, edit the
//!   cart, submit an order
//! - `catalog` - Load the configured catalog and print its contents
//!
//! Configuration comes from environment variables (see
//! `minimart_shop::config`); a `.env` file is honored.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "minimart")]
#[command(author, version, about = "Minimart shop session harness")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive shop session
    Session,
    /// Load the catalog and print a summary
    Catalog,
}

#[tokio::main]
async fn main() {
    // Initialize tracing; default to warnings so session output stays
    // readable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "minimart=warn".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Session => commands::session::run().await?,
        Commands::Catalog => commands::catalog::run().await?,
    }
    Ok(())
}
