//! Karam CLI - database migrations and maintenance tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply the panel's migrations
//! karam-cli migrate
//!
//! # Load a few sample stores and deliveries
//! karam-cli seed
//!
//! # Print today's total (in PANEL_TIMEZONE), or another day's
//! karam-cli daily-total
//! karam-cli daily-total --date 2024-05-10
//! ```
//!
//! Every command reads the same environment as the panel (`PANEL_DATABASE_URL`
//! or `DATABASE_URL`, `PANEL_TIMEZONE`, ...), including a `.env` file.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "karam-cli")]
#[command(author, version, about = "Karam delivery panel CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert sample stores and deliveries
    Seed,
    /// Print the units left on one day, per store and overall
    DailyTotal {
        /// Day to report (YYYY-MM-DD); defaults to today in the panel's zone
        #[arg(short, long)]
        date: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::DailyTotal { date } => commands::daily::run(date.as_deref()).await?,
    }
    Ok(())
}
