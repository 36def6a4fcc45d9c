//! Daily total and summary list computations
//!
//! Pure functions over rows read from a ledger. The writer does the I/O.

use serde_json::{json, Value};
use tracing::debug;

use crate::layout::{COL_AMOUNT, COL_DATE, COL_DAILY_TOTAL, FIRST_DATA_ROW};
use crate::models::SummaryEntry;
use crate::sheets::Rows;

/// Result of scanning a ledger for one date
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotal {
    pub total: f64,
    /// Sheet row (1-indexed) of the last payment on the date
    pub last_row: u32,
    /// Earlier rows on the same date whose Daily Total cell is not blank
    pub stale_rows: Vec<u32>,
}

/// Text of a cell as the sheet would display it
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn is_blank(value: Option<&Value>) -> bool {
    value.map(|v| cell_text(v).trim().is_empty()).unwrap_or(true)
}

/// Parse an amount cell
///
/// Numbers are taken as-is. Text has the rupee/dollar sign and thousands
/// separators stripped before parsing. Blank or unparseable cells yield `None`.
pub fn parse_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| !matches!(c, '₹' | '$' | ','))
                .collect();
            let cleaned = cleaned.trim();
            if cleaned.is_empty() {
                return None;
            }
            cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

/// Sum the amounts of every data row whose date matches `date_key`
///
/// `rows` is the A:H read of a ledger, header included. Returns `None` when
/// no row carries the date. Unparseable amounts count as zero.
pub fn compute_daily_total(rows: &Rows, date_key: &str) -> Option<DailyTotal> {
    let mut total = 0.0;
    let mut matches = Vec::new();

    let first = (FIRST_DATA_ROW - 1) as usize;
    for (i, row) in rows.iter().enumerate().skip(first) {
        let sheet_row = i as u32 + 1;
        let date = row.get(COL_DATE as usize).map(cell_text).unwrap_or_default();
        if date.trim() != date_key {
            continue;
        }

        match row.get(COL_AMOUNT as usize).and_then(parse_amount) {
            Some(amount) => total += amount,
            None => debug!(row = sheet_row, date = %date_key, "Skipping unparseable amount"),
        }
        matches.push(sheet_row);
    }

    let last_row = *matches.last()?;
    let stale_rows = matches
        .iter()
        .copied()
        .filter(|&r| r != last_row)
        .filter(|&r| !is_blank(rows[(r - 1) as usize].get(COL_DAILY_TOTAL as usize)))
        .collect();

    Some(DailyTotal {
        total,
        last_row,
        stale_rows,
    })
}

/// The live part of a summary list: everything before the first blank date
pub fn live_entries(rows: &Rows) -> &[Vec<Value>] {
    let end = rows
        .iter()
        .position(|row| is_blank(row.first()))
        .unwrap_or(rows.len());
    &rows[..end]
}

/// Upsert `(date_key, total)` into a summary list read from the sheet
///
/// The matching entry is replaced in place; other entries pass through
/// untouched. An unseen date is appended. Copies of the date left past the
/// first blank row are blanked, so a list that becomes contiguous again
/// never carries the date twice.
pub fn merge_summary(rows: &Rows, date_key: &str, total: f64) -> Rows {
    let mut found = false;
    let mut merged: Rows = live_entries(rows)
        .iter()
        .map(|row| {
            if cell_text(&row[0]).trim() == date_key {
                found = true;
                vec![json!(date_key), json!(total)]
            } else {
                row.clone()
            }
        })
        .collect();

    if !found {
        merged.push(vec![json!(date_key), json!(total)]);
    }

    let is_stale = |row: &Vec<Value>| row.first().is_some_and(|v| cell_text(v).trim() == date_key);
    let tail = rows.get(merged.len()..).unwrap_or_default();
    if let Some(last) = tail.iter().rposition(is_stale) {
        for row in &tail[..=last] {
            if is_stale(row) {
                merged.push(vec![json!(""), json!("")]);
            } else {
                merged.push(row.clone());
            }
        }
    }
    merged
}

/// Typed view of a summary list
pub fn summary_entries(rows: &Rows) -> Vec<SummaryEntry> {
    live_entries(rows)
        .iter()
        .map(|row| SummaryEntry {
            date: cell_text(&row[0]).trim().to_string(),
            total: row.get(1).and_then(parse_amount).unwrap_or(0.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<Value> {
        crate::layout::header_row()
    }

    fn row(date: &str, amount: Value, daily: Value) -> Vec<Value> {
        vec![
            json!(date),
            json!("UPI"),
            json!("Asha"),
            json!("asha@bank"),
            amount,
            json!("SUCCESS"),
            daily,
        ]
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(&json!(250.0)), Some(250.0));
        assert_eq!(parse_amount(&json!(100)), Some(100.0));
        assert_eq!(parse_amount(&json!("₹1,250.50")), Some(1250.5));
        assert_eq!(parse_amount(&json!(" 75 ")), Some(75.0));
        assert_eq!(parse_amount(&json!("$3,000")), Some(3000.0));
        assert_eq!(parse_amount(&json!("")), None);
        assert_eq!(parse_amount(&json!("₹")), None);
        assert_eq!(parse_amount(&json!("twelve")), None);
        assert_eq!(parse_amount(&json!("NaN")), None);
        assert_eq!(parse_amount(&Value::Null), None);
    }

    #[test]
    fn test_daily_total_sums_and_tracks_last_row() {
        let rows = vec![
            header(),
            row("05-03-2025", json!(250.0), json!(250.0)),
            row("06-03-2025", json!(80.0), json!(80.0)),
            row("05-03-2025", json!(100.0), json!("")),
        ];
        let result = compute_daily_total(&rows, "05-03-2025").unwrap();
        assert!((result.total - 350.0).abs() < 1e-9);
        assert_eq!(result.last_row, 4);
        assert_eq!(result.stale_rows, vec![2]);
    }

    #[test]
    fn test_daily_total_skips_bad_amounts() {
        let rows = vec![
            header(),
            row("05-03-2025", json!("₹1,000"), json!("")),
            row("05-03-2025", json!("oops"), json!("")),
            vec![json!("05-03-2025"), json!("UPI")],
        ];
        let result = compute_daily_total(&rows, "05-03-2025").unwrap();
        assert!((result.total - 1000.0).abs() < 1e-9);
        assert_eq!(result.last_row, 4);
        assert!(result.stale_rows.is_empty());
    }

    #[test]
    fn test_daily_total_ignores_header_and_other_dates() {
        let rows = vec![header(), row("06-03-2025", json!(10.0), json!(""))];
        assert!(compute_daily_total(&rows, "05-03-2025").is_none());
        assert!(compute_daily_total(&rows, "Date").is_none());
        assert!(compute_daily_total(&vec![], "05-03-2025").is_none());
    }

    #[test]
    fn test_merge_summary_updates_in_place() {
        let rows = vec![
            vec![json!("01-03-2025"), json!(10.0)],
            vec![json!("05-03-2025"), json!(250.0)],
            vec![json!("07-03-2025"), json!(30.0)],
        ];
        let merged = merge_summary(&rows, "05-03-2025", 350.0);
        assert_eq!(
            merged,
            vec![
                vec![json!("01-03-2025"), json!(10.0)],
                vec![json!("05-03-2025"), json!(350.0)],
                vec![json!("07-03-2025"), json!(30.0)],
            ]
        );
    }

    #[test]
    fn test_merge_summary_appends_new_date() {
        let rows = vec![vec![json!("01-03-2025"), json!(10.0)]];
        let merged = merge_summary(&rows, "02-03-2025", 5.0);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1], vec![json!("02-03-2025"), json!(5.0)]);

        let merged = merge_summary(&vec![], "02-03-2025", 5.0);
        assert_eq!(merged, vec![vec![json!("02-03-2025"), json!(5.0)]]);
    }

    #[test]
    fn test_blank_row_terminates_summary_list() {
        let rows = vec![
            vec![json!("01-03-2025"), json!(10.0)],
            vec![],
            vec![json!("05-03-2025"), json!(250.0)],
        ];
        assert_eq!(live_entries(&rows).len(), 1);

        // The new entry fills the blank and the old copy is cleared
        let merged = merge_summary(&rows, "05-03-2025", 300.0);
        assert_eq!(
            merged,
            vec![
                vec![json!("01-03-2025"), json!(10.0)],
                vec![json!("05-03-2025"), json!(300.0)],
                vec![json!(""), json!("")],
            ]
        );
        assert_eq!(summary_entries(&merged).len(), 2);
    }

    #[test]
    fn test_merge_summary_leaves_unrelated_tail_alone() {
        let rows = vec![
            vec![json!("01-03-2025"), json!(10.0)],
            vec![],
            vec![json!("05-03-2025"), json!(250.0)],
            vec![json!("09-03-2025"), json!(40.0)],
        ];

        let merged = merge_summary(&rows, "02-03-2025", 5.0);
        assert_eq!(
            merged,
            vec![
                vec![json!("01-03-2025"), json!(10.0)],
                vec![json!("02-03-2025"), json!(5.0)],
            ]
        );

        let merged = merge_summary(&rows, "09-03-2025", 45.0);
        assert_eq!(merged.len(), 4);
        assert_eq!(merged[1], vec![json!("09-03-2025"), json!(45.0)]);
        assert_eq!(merged[2], vec![json!("05-03-2025"), json!(250.0)]);
        assert_eq!(merged[3], vec![json!(""), json!("")]);
    }

    #[test]
    fn test_summary_entries() {
        let rows = vec![
            vec![json!("01-03-2025"), json!(10.0)],
            vec![json!("02-03-2025"), json!("₹1,500")],
            vec![json!("03-03-2025")],
        ];
        let entries = summary_entries(&rows);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].total, 1500.0);
        assert_eq!(entries[2].total, 0.0);
    }
}
