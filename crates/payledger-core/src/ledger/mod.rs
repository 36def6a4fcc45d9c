//! Monthly ledger writer
//!
//! Records payments into per-month sheets and keeps each sheet's daily totals
//! and summary block in step with its rows.
//!
//! # Save pipeline
//!
//! ```text
//! payment ──► lock(ledger) ──► ensure ledger ──► append row
//!                                                    │
//!             unlock ◄── upsert summary ◄── recompute daily total
//! ```
//!
//! Each step is a separate backend round trip. There is no rollback: if a
//! later step fails the earlier writes stay, and the next save for the same
//! date recomputes the total and rewrites the summary entry.
//!
//! # Example
//!
//! ```rust,ignore
//! use payledger_core::{LedgerWriter, SheetsClient};
//!
//! let writer = LedgerWriter::new(SheetsClient::from_env()?);
//! let outcome = writer.save_payment(&payment).await?;
//! println!("{} row {}", outcome.ledger, outcome.row);
//! ```

mod styling;
mod totals;


use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use serde_json::json;
use tracing::{debug, error, info};

use crate::error::{Error, Result};
use crate::layout::{
    self, LEDGER_COLUMNS, LEDGER_ROWS, SUMMARY_FIRST_ENTRY_ROW, SUMMARY_TOTAL_COL,
};
use crate::models::{LedgerSummary, PaymentRecord, SaveOutcome};
use crate::sheets::{Request, SheetsBackend, SheetsClient, ValueInputOption};

pub use totals::{compute_daily_total, parse_amount, DailyTotal};

type LedgerLock = Arc<tokio::sync::Mutex<()>>;

/// A resolved ledger's sheet id and current grid size
#[derive(Debug, Clone, Copy)]
struct LedgerSheet {
    sheet_id: i64,
    rows: u32,
    cols: u32,
}

/// Writes payments into monthly ledgers
///
/// Cheap to clone; clones share the backend and the per-ledger locks, so
/// saves into the same month are serialised across every clone.
#[derive(Clone)]
pub struct LedgerWriter {
    client: SheetsClient,
    locks: Arc<Mutex<HashMap<String, LedgerLock>>>,
}

fn log_failure<'a>(ledger: &'a str, step: &'static str) -> impl FnOnce(Error) -> Error + 'a {
    move |e| {
        error!(ledger, step, error = %e, "Ledger step failed");
        e
    }
}

impl LedgerWriter {
    pub fn new(client: SheetsClient) -> Self {
        Self {
            client,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get the underlying sheets client
    pub fn client(&self) -> &SheetsClient {
        &self.client
    }

    /// Record a payment
    ///
    /// Resolves (or creates) the payment's monthly ledger, appends the row,
    /// rewrites the daily total for the payment's date and upserts that
    /// total into the summary block. A non-positive daily total is neither
    /// written nor summarised.
    pub async fn save_payment(&self, payment: &PaymentRecord) -> Result<SaveOutcome> {
        let ledger = layout::ledger_name(payment.date);
        let date_key = layout::date_key(payment.date);

        let lock = self.ledger_lock(&ledger);
        let _guard = lock.lock().await;

        info!(
            ledger = %ledger,
            date = %date_key,
            amount = payment.amount,
            channel = %payment.channel_type,
            "Saving payment"
        );

        let sheet = self
            .ensure_ledger(&ledger, payment.date)
            .await
            .map_err(log_failure(&ledger, "resolve"))?;

        let row = self
            .append_row(&ledger, sheet, payment)
            .await
            .map_err(log_failure(&ledger, "append"))?;

        let daily_total = self
            .update_daily_total(&ledger, &date_key)
            .await
            .map_err(log_failure(&ledger, "daily_total"))?;

        if let Some(total) = daily_total {
            self.upsert_summary(&ledger, &date_key, total)
                .await
                .map_err(log_failure(&ledger, "summary"))?;
        }

        info!(ledger = %ledger, row, daily_total = ?daily_total, "Payment stored");

        Ok(SaveOutcome {
            ledger,
            row,
            daily_total,
        })
    }

    /// Name of the ledger for `date`, creating or repairing it as needed
    ///
    /// Idempotent: on a ledger that already has its header, full grid and
    /// summary block nothing is written.
    pub async fn resolve_ledger(&self, date: NaiveDate) -> Result<String> {
        let ledger = layout::ledger_name(date);
        let lock = self.ledger_lock(&ledger);
        let _guard = lock.lock().await;

        self.ensure_ledger(&ledger, date)
            .await
            .map_err(log_failure(&ledger, "resolve"))?;
        Ok(ledger)
    }

    /// Read a ledger's summary block
    ///
    /// Returns `NotFound` if no sheet carries the name. A ledger too narrow or
    /// too short to hold a summary block reports no entries.
    pub async fn summary(&self, ledger: &str) -> Result<LedgerSummary> {
        let meta = self.client.spreadsheet().await?;
        let props = meta
            .find(ledger)
            .ok_or_else(|| Error::NotFound(format!("Ledger {}", ledger)))?;

        let grid = &props.grid_properties;
        let entries = if grid.column_count > SUMMARY_TOTAL_COL
            && grid.row_count >= SUMMARY_FIRST_ENTRY_ROW
        {
            let rows = self
                .client
                .get_values(&layout::summary_entries_range(ledger).to_string())
                .await?;
            totals::summary_entries(&rows)
        } else {
            debug!(
                ledger,
                rows = grid.row_count,
                cols = grid.column_count,
                "Ledger has no room for a summary"
            );
            Vec::new()
        };

        let grand_total = entries.iter().map(|e| e.total).sum();
        Ok(LedgerSummary {
            ledger: ledger.to_string(),
            entries,
            grand_total,
        })
    }

    /// Titles of every monthly ledger in the spreadsheet, in sheet order
    pub async fn ledgers(&self) -> Result<Vec<String>> {
        let meta = self.client.spreadsheet().await?;
        Ok(meta
            .titles()
            .into_iter()
            .filter(|t| layout::parse_ledger_name(t).is_some())
            .collect())
    }

    fn ledger_lock(&self, ledger: &str) -> LedgerLock {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(ledger.to_string()).or_default().clone()
    }

    /// Make sure the ledger exists with a full grid and a summary block
    ///
    /// Returns the sheet id and grid size for the writes that follow.
    async fn ensure_ledger(&self, ledger: &str, date: NaiveDate) -> Result<LedgerSheet> {
        let meta = self.client.spreadsheet().await?;

        let sheet = match meta.find(ledger) {
            None => LedgerSheet {
                sheet_id: self.create_ledger(ledger).await?,
                rows: LEDGER_ROWS,
                cols: LEDGER_COLUMNS,
            },
            Some(props) => {
                let grid = &props.grid_properties;
                let rows = grid.row_count.max(LEDGER_ROWS);
                let cols = grid.column_count.max(LEDGER_COLUMNS);
                if grid.column_count < LEDGER_COLUMNS || grid.row_count < LEDGER_ROWS {
                    info!(
                        ledger,
                        from_rows = grid.row_count,
                        from_cols = grid.column_count,
                        rows,
                        cols,
                        "Widening ledger grid"
                    );
                    self.client
                        .batch_update(vec![Request::resize_grid(props.sheet_id, rows, cols)])
                        .await?;
                }
                LedgerSheet {
                    sheet_id: props.sheet_id,
                    rows,
                    cols,
                }
            }
        };

        if !self.summary_initialised(ledger).await? {
            self.init_summary(ledger, sheet.sheet_id, date).await?;
        }

        Ok(sheet)
    }

    async fn create_ledger(&self, ledger: &str) -> Result<i64> {
        info!(ledger, "Creating ledger");
        self.client
            .batch_update(vec![Request::add_sheet(ledger, LEDGER_ROWS, LEDGER_COLUMNS)])
            .await?;

        let sheet_id = self
            .client
            .spreadsheet()
            .await?
            .find(ledger)
            .map(|p| p.sheet_id)
            .ok_or_else(|| {
                Error::InvalidData(format!("Ledger {} missing after creation", ledger))
            })?;

        self.client
            .update_values(
                &layout::header_range(ledger).to_string(),
                vec![layout::header_row()],
                ValueInputOption::Raw,
            )
            .await?;
        self.client
            .batch_update(styling::header_requests(sheet_id))
            .await?;

        Ok(sheet_id)
    }

    /// Whether the summary header cell holds "Date"
    ///
    /// A read error is returned as-is, never taken to mean "absent".
    async fn summary_initialised(&self, ledger: &str) -> Result<bool> {
        let rows = self
            .client
            .get_values(&layout::summary_probe_cell(ledger).to_string())
            .await?;

        let probe = rows
            .first()
            .and_then(|r| r.first())
            .map(totals::cell_text)
            .unwrap_or_default();

        Ok(probe.trim() == layout::SUMMARY_HEADER[0])
    }

    async fn init_summary(&self, ledger: &str, sheet_id: i64, date: NaiveDate) -> Result<()> {
        info!(ledger, "Initialising summary block");

        // USER_ENTERED so the Grand Total formula evaluates
        self.client
            .update_values(
                &layout::summary_head_range(ledger).to_string(),
                layout::summary_head_rows(date),
                ValueInputOption::UserEntered,
            )
            .await?;
        self.client
            .update_values(
                &layout::grand_total_range(ledger).to_string(),
                vec![layout::grand_total_row()],
                ValueInputOption::UserEntered,
            )
            .await?;

        self.client
            .batch_update(styling::summary_requests(sheet_id))
            .await
    }

    async fn append_row(
        &self,
        ledger: &str,
        sheet: LedgerSheet,
        payment: &PaymentRecord,
    ) -> Result<u32> {
        let column = self
            .client
            .get_values(&layout::date_column_range(ledger).to_string())
            .await?;
        let row = (column.len() as u32 + 1).max(layout::FIRST_DATA_ROW);

        if row > sheet.rows {
            let rows = sheet.rows + LEDGER_ROWS;
            info!(ledger, from_rows = sheet.rows, rows, "Growing ledger grid");
            self.client
                .batch_update(vec![Request::resize_grid(sheet.sheet_id, rows, sheet.cols)])
                .await?;
        }

        debug!(ledger, row, "Appending payment row");
        // RAW keeps the dd-mm-yyyy date a string
        self.client
            .update_values(
                &layout::row_range(ledger, row).to_string(),
                vec![layout::payment_row(payment)],
                ValueInputOption::Raw,
            )
            .await?;
        self.client
            .batch_update(styling::row_requests(sheet.sheet_id, row))
            .await?;

        Ok(row)
    }

    /// Rewrite the Daily Total for `date_key` onto its last row
    async fn update_daily_total(&self, ledger: &str, date_key: &str) -> Result<Option<f64>> {
        let rows = self
            .client
            .get_values(&layout::data_range(ledger).to_string())
            .await?;

        let Some(daily) = compute_daily_total(&rows, date_key) else {
            debug!(ledger, date = %date_key, "No rows for date");
            return Ok(None);
        };

        if daily.total <= 0.0 {
            debug!(
                ledger,
                date = %date_key,
                total = daily.total,
                "Daily total not positive, skipping"
            );
            return Ok(None);
        }

        debug!(
            ledger,
            date = %date_key,
            total = daily.total,
            row = daily.last_row,
            "Writing daily total"
        );
        self.client
            .update_values(
                &layout::daily_total_cell(ledger, daily.last_row).to_string(),
                vec![vec![json!(daily.total)]],
                ValueInputOption::Raw,
            )
            .await?;

        for row in &daily.stale_rows {
            debug!(ledger, row, "Clearing stale daily total");
            self.client
                .update_values(
                    &layout::daily_total_cell(ledger, *row).to_string(),
                    vec![vec![json!("")]],
                    ValueInputOption::Raw,
                )
                .await?;
        }

        Ok(Some(daily.total))
    }

    async fn upsert_summary(&self, ledger: &str, date_key: &str, total: f64) -> Result<()> {
        let range = layout::summary_entries_range(ledger).to_string();
        let existing = self.client.get_values(&range).await?;
        let merged = totals::merge_summary(&existing, date_key, total);

        debug!(
            ledger,
            date = %date_key,
            total,
            rows = merged.len(),
            "Rewriting summary entries"
        );
        self.client
            .update_values(&range, merged, ValueInputOption::Raw)
            .await
    }
}
