//! Bookstore CLI - Database migrations and seeding.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! bookstore-cli migrate
//!
//! # Load books from a YAML file
//! bookstore-cli seed books data/books.yaml
//!
//! # Load customers from a YAML file
//! bookstore-cli seed customers data/customers.yaml
//! ```
//!
//! The database is taken from `BOOKSTORE_DATABASE_URL` (or its fallbacks, see
//! `bookstore_api::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bookstore-cli")]
#[command(author, version, about = "Bookstore CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Load records from a YAML file through the intake workflows
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Seed books (existing ISBNs are skipped)
    Books {
        /// YAML file holding a list of books
        file: PathBuf,
    },
    /// Seed customers (existing user IDs are skipped)
    Customers {
        /// YAML file holding a list of customers
        file: PathBuf,
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

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { target } => match target {
            SeedTarget::Books { file } => commands::seed::books(&file).await?,
            SeedTarget::Customers { file } => commands::seed::customers(&file).await?,
        },
    }
    Ok(())
}
