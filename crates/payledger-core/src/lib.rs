//! Payledger Core Library
//!
//! Shared functionality for the Payledger payment recorder:
//! - Monthly ledger writer (rows, daily totals, summary block)
//! - Ledger sheet layout and A1 range handling
//! - Pluggable spreadsheet backends (Google Sheets, in-memory)
//! - Service-account authentication for Google APIs

pub mod a1;
pub mod config;
pub mod error;
pub mod layout;
pub mod ledger;
pub mod models;
pub mod sheets;

pub use config::{BackendKind, SheetsConfig};
pub use error::{Error, Result};
pub use ledger::LedgerWriter;
pub use models::{LedgerSummary, PaymentRecord, SaveOutcome, SummaryEntry};
pub use sheets::{GoogleSheetsBackend, MemoryBackend, SheetsBackend, SheetsClient};
