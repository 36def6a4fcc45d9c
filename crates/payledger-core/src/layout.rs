//! Ledger sheet layout
//!
//! Every monthly ledger shares the same fixed geometry:
//!
//! ```text
//! A..H   row 1          header (Date .. Remarks)
//! A..H   rows 2..       one payment per row, in submission order
//! J..K   row 100        summary title
//! J..K   row 101        summary header (Date, Total Amount)
//! J..K   row 102        spacer
//! J..K   rows 103..999  summary entries, terminated by the first blank date
//! J..K   row 1000       Grand Total formula
//! ```
//!
//! The grid is 1000 rows by 26 columns so the summary block never collides
//! with the payment columns.

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::a1::{col_to_letters, A1Range};
use crate::models::PaymentRecord;

/// Minimum grid width (A..Z)
pub const LEDGER_COLUMNS: u32 = 26;
/// Minimum grid height
pub const LEDGER_ROWS: u32 = 1000;

/// Payment columns A..H
pub const DATA_COLUMNS: u32 = 8;
pub const FIRST_DATA_ROW: u32 = 2;

pub const COL_DATE: u32 = 0;
pub const COL_AMOUNT: u32 = 4;
pub const COL_DAILY_TOTAL: u32 = 6;
pub const COL_LAST: u32 = DATA_COLUMNS - 1;

pub const HEADER: [&str; DATA_COLUMNS as usize] = [
    "Date",
    "Channel Type",
    "User Name",
    "UPI ID",
    "Amount",
    "Status",
    "Daily Total",
    "Remarks",
];

pub const SUMMARY_TITLE_ROW: u32 = 100;
pub const SUMMARY_HEADER_ROW: u32 = 101;
pub const SUMMARY_FIRST_ENTRY_ROW: u32 = 103;
pub const SUMMARY_LAST_ENTRY_ROW: u32 = 999;
pub const GRAND_TOTAL_ROW: u32 = 1000;

/// Summary date column (J)
pub const SUMMARY_DATE_COL: u32 = 9;
/// Summary total column (K)
pub const SUMMARY_TOTAL_COL: u32 = 10;

pub const SUMMARY_HEADER: [&str; 2] = ["Date", "Total Amount"];

/// Ledger name for the month containing `date`, e.g. "Mar-2025"
pub fn ledger_name(date: NaiveDate) -> String {
    date.format("%b-%Y").to_string()
}

/// First day of the month a ledger name denotes, or `None` if `name` is not
/// a ledger name
pub fn parse_ledger_name(name: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("01-{}", name.trim()), "%d-%b-%Y").ok()
}

/// Date key used in the Date column and the summary, e.g. "05-03-2025"
pub fn date_key(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Human-readable summary title, e.g. "Monthly Summary for March 2025"
pub fn summary_title(date: NaiveDate) -> String {
    format!("Monthly Summary for {}", date.format("%B %Y"))
}

pub fn header_row() -> Vec<Value> {
    HEADER.iter().map(|h| json!(h)).collect()
}

/// Row values for a payment; Daily Total and Remarks start blank
pub fn payment_row(payment: &PaymentRecord) -> Vec<Value> {
    vec![
        json!(date_key(payment.date)),
        json!(payment.channel_type),
        json!(payment.user_name),
        json!(payment.upi_id),
        json!(payment.amount),
        json!(payment.status),
        json!(""),
        json!(""),
    ]
}

/// Title, header and spacer rows of the summary block
pub fn summary_head_rows(date: NaiveDate) -> Vec<Vec<Value>> {
    vec![
        vec![json!(summary_title(date)), json!("")],
        SUMMARY_HEADER.iter().map(|h| json!(h)).collect(),
        vec![json!(""), json!("")],
    ]
}

/// The Grand Total row: label plus a SUM over the entry column
pub fn grand_total_row() -> Vec<Value> {
    let col = col_to_letters(SUMMARY_TOTAL_COL);
    vec![
        json!("Grand Total:"),
        json!(format!(
            "=SUM({col}{}:{col}{})",
            SUMMARY_FIRST_ENTRY_ROW, SUMMARY_LAST_ENTRY_ROW
        )),
    ]
}

pub fn header_range(ledger: &str) -> A1Range {
    A1Range::rect(ledger, (0, 1), (COL_LAST, 1))
}

pub fn row_range(ledger: &str, row: u32) -> A1Range {
    A1Range::rect(ledger, (0, row), (COL_LAST, row))
}

pub fn data_range(ledger: &str) -> A1Range {
    A1Range::columns(ledger, 0, COL_LAST)
}

pub fn date_column_range(ledger: &str) -> A1Range {
    A1Range::columns(ledger, COL_DATE, COL_DATE)
}

pub fn daily_total_cell(ledger: &str, row: u32) -> A1Range {
    A1Range::cell(ledger, COL_DAILY_TOTAL, row)
}

pub fn summary_head_range(ledger: &str) -> A1Range {
    A1Range::rect(
        ledger,
        (SUMMARY_DATE_COL, SUMMARY_TITLE_ROW),
        (SUMMARY_TOTAL_COL, SUMMARY_FIRST_ENTRY_ROW - 1),
    )
}

/// Probe cell for an initialised summary block (holds "Date")
pub fn summary_probe_cell(ledger: &str) -> A1Range {
    A1Range::cell(ledger, SUMMARY_DATE_COL, SUMMARY_HEADER_ROW)
}

pub fn summary_entries_range(ledger: &str) -> A1Range {
    A1Range::rect(
        ledger,
        (SUMMARY_DATE_COL, SUMMARY_FIRST_ENTRY_ROW),
        (SUMMARY_TOTAL_COL, SUMMARY_LAST_ENTRY_ROW),
    )
}

pub fn grand_total_range(ledger: &str) -> A1Range {
    A1Range::rect(
        ledger,
        (SUMMARY_DATE_COL, GRAND_TOTAL_ROW),
        (SUMMARY_TOTAL_COL, GRAND_TOTAL_ROW),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_ledger_name() {
        assert_eq!(ledger_name(d(2025, 1, 31)), "Jan-2025");
        assert_eq!(ledger_name(d(2025, 3, 5)), "Mar-2025");
        assert_eq!(ledger_name(d(2024, 12, 1)), "Dec-2024");
    }

    #[test]
    fn test_parse_ledger_name() {
        assert_eq!(parse_ledger_name("Mar-2025"), Some(d(2025, 3, 1)));
        assert_eq!(parse_ledger_name("Dec-2024"), Some(d(2024, 12, 1)));
        assert_eq!(parse_ledger_name("Sheet1"), None);
        assert_eq!(parse_ledger_name("2025-03"), None);
    }

    #[test]
    fn test_date_key_is_zero_padded() {
        assert_eq!(date_key(d(2025, 3, 5)), "05-03-2025");
        assert_eq!(date_key(d(2025, 11, 21)), "21-11-2025");
    }

    #[test]
    fn test_summary_title() {
        assert_eq!(summary_title(d(2025, 3, 5)), "Monthly Summary for March 2025");
    }

    #[test]
    fn test_payment_row_shape() {
        let payment = PaymentRecord {
            date: d(2025, 3, 5),
            channel_type: "UPI".into(),
            user_name: "Asha".into(),
            upi_id: "asha@bank".into(),
            amount: 250.0,
            status: "SUCCESS".into(),
        };
        let row = payment_row(&payment);
        assert_eq!(
            row,
            vec![
                json!("05-03-2025"),
                json!("UPI"),
                json!("Asha"),
                json!("asha@bank"),
                json!(250.0),
                json!("SUCCESS"),
                json!(""),
                json!(""),
            ]
        );
    }

    #[test]
    fn test_ranges() {
        assert_eq!(header_range("Mar-2025").to_string(), "'Mar-2025'!A1:H1");
        assert_eq!(data_range("Mar-2025").to_string(), "'Mar-2025'!A:H");
        assert_eq!(date_column_range("Mar-2025").to_string(), "'Mar-2025'!A:A");
        assert_eq!(daily_total_cell("Mar-2025", 3).to_string(), "'Mar-2025'!G3");
        assert_eq!(
            summary_head_range("Mar-2025").to_string(),
            "'Mar-2025'!J100:K102"
        );
        assert_eq!(summary_probe_cell("Mar-2025").to_string(), "'Mar-2025'!J101");
        assert_eq!(
            summary_entries_range("Mar-2025").to_string(),
            "'Mar-2025'!J103:K999"
        );
        assert_eq!(
            grand_total_range("Mar-2025").to_string(),
            "'Mar-2025'!J1000:K1000"
        );
    }

    #[test]
    fn test_grand_total_formula() {
        assert_eq!(grand_total_row()[1], json!("=SUM(K103:K999)"));
    }
}
