//! Shared command utilities
//!
//! This module contains:
//! - `open_client` - Connect to the configured sheets backend
//! - `open_ledger` - Wrap a client in a ledger writer
//! - `resolve_month` - Turn a month argument into a ledger name

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use payledger_core::layout::{ledger_name, parse_ledger_name};
use payledger_core::{BackendKind, LedgerWriter, SheetsBackend, SheetsClient};
use tracing::debug;

/// Connect to the sheets backend, failing fast on missing credentials
pub fn open_client(kind: BackendKind, spreadsheet_id: Option<String>) -> Result<SheetsClient> {
    let client = SheetsClient::connect(kind, spreadsheet_id)
        .with_context(|| format!("Failed to configure {} sheets backend", kind))?;
    debug!(
        backend = %client.kind(),
        spreadsheet = client.spreadsheet_id(),
        "Sheets backend configured"
    );
    Ok(client)
}

pub fn open_ledger(client: SheetsClient) -> LedgerWriter {
    LedgerWriter::new(client)
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Ledger name for a month argument
///
/// Accepts `YYYY-MM` or a ledger name such as `Mar-2025`; `None` means the
/// month containing `today`.
pub fn resolve_month(input: Option<&str>, today: NaiveDate) -> Result<String> {
    let Some(input) = input.map(str::trim) else {
        return Ok(ledger_name(today));
    };

    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", input), "%Y-%m-%d") {
        return Ok(ledger_name(date));
    }
    if let Some(date) = parse_ledger_name(input) {
        return Ok(ledger_name(date));
    }

    bail!("Invalid month '{}' (use YYYY-MM or Mon-YYYY)", input)
}
