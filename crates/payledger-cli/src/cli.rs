//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use payledger_core::config::{BACKEND_ENV, SPREADSHEET_ID_ENV};
use payledger_core::BackendKind;

/// Payledger - Record payments into monthly Google Sheets ledgers
#[derive(Parser)]
#[command(name = "payledger")]
#[command(about = "Payment recorder backed by monthly spreadsheet ledgers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Spreadsheet backend: google or memory
    #[arg(long, env = BACKEND_ENV, default_value = "google", global = true)]
    pub backend: BackendKind,

    /// Target spreadsheet id (Google backend)
    #[arg(long, env = SPREADSHEET_ID_ENV, global = true)]
    pub spreadsheet_id: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, payment endpoints require a bearer key from PAYLEDGER_API_KEYS.
        #[arg(long)]
        no_auth: bool,
    },

    /// Record a single payment
    Record {
        /// Payment date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Channel type (e.g. UPI, Cash)
        #[arg(short, long, default_value = "UPI")]
        channel: String,

        /// Payer name
        #[arg(short, long)]
        user: String,

        /// UPI ID of the payer
        #[arg(long)]
        upi: String,

        /// Amount in rupees
        #[arg(short, long)]
        amount: f64,

        /// Payment status
        #[arg(short, long, default_value = "SUCCESS")]
        status: String,
    },

    /// Show a ledger's summary block
    Summary {
        /// Month as YYYY-MM or Mon-YYYY (defaults to the current month)
        month: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show backend configuration and ledgers
    Status,
}
