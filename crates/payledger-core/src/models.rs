//! Data models for Payledger

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A payment submission
///
/// Immutable input to the ledger writer. There is no identity field, so
/// submitting the same payment twice records two rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    /// Calendar date of the payment (ISO `YYYY-MM-DD` on the wire)
    pub date: NaiveDate,
    /// Payment method label, e.g. "UPI" or "Cash"
    pub channel_type: String,
    pub user_name: String,
    pub upi_id: String,
    /// Amount in rupees; non-negative expected
    pub amount: f64,
    /// Status label, e.g. "SUCCESS"
    pub status: String,
}

/// One (date, total) line of a ledger's summary block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    /// Date key in `dd-mm-yyyy` form
    pub date: String,
    pub total: f64,
}

/// The summary block of a ledger as currently stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub ledger: String,
    pub entries: Vec<SummaryEntry>,
    /// Sum of entry totals (mirrors the sheet's Grand Total formula)
    pub grand_total: f64,
}

/// Result of saving one payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOutcome {
    /// Ledger (sheet) the payment was written to
    pub ledger: String,
    /// 1-indexed sheet row of the new payment
    pub row: u32,
    /// Recomputed total for the payment's date, if it was positive
    pub daily_total: Option<f64>,
}
