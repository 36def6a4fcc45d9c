//! Payledger CLI - Monthly payment ledgers in Google Sheets
//!
//! Usage:
//!   payledger serve --port 8080          Start web server
//!   payledger record --user NAME ...     Record one payment
//!   payledger summary 2025-03            Show a month's summary block
//!   payledger status                     Show backend and ledgers

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let client = commands::open_client(cli.backend, cli.spreadsheet_id.clone())?;

    match cli.command {
        Commands::Serve {
            port,
            host,
            no_auth,
        } => commands::cmd_serve(client, &host, port, no_auth).await,
        Commands::Record {
            date,
            channel,
            user,
            upi,
            amount,
            status,
        } => {
            let payment = commands::build_payment(date, channel, user, upi, amount, status);
            let ledger = commands::open_ledger(client);
            commands::cmd_record(&ledger, &payment).await
        }
        Commands::Summary { month, json } => {
            let ledger = commands::open_ledger(client);
            let name = commands::resolve_month(month.as_deref(), commands::today())?;
            commands::cmd_summary(&ledger, &name, json).await
        }
        Commands::Status => commands::cmd_status(&client).await,
    }
}
