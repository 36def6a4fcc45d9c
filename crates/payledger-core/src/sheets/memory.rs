//! In-memory spreadsheet backend
//!
//! Behaves like the Sheets API for the calls ledgers make: ranges are parsed
//! from A1 notation, reads trim trailing blanks, reads and writes outside the
//! grid fail, and `USER_ENTERED` writes turn numeric strings into numbers.
//! Formulas are stored as text and never evaluated. Formatting requests are
//! counted and otherwise ignored.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use crate::a1::A1Range;
use crate::error::{Error, Result};

use super::types::{
    GridProperties, Request, Rows, Sheet, SheetProperties, Spreadsheet, ValueInputOption,
};
use super::SheetsBackend;

#[derive(Debug, Clone)]
struct MemorySheet {
    properties: SheetProperties,
    /// Row-major cells, grown on demand; missing cells read as blank
    cells: Vec<Vec<Value>>,
}

impl MemorySheet {
    fn get(&self, row: u32, col: u32) -> &Value {
        static NULL: Value = Value::Null;
        self.cells
            .get(row as usize - 1)
            .and_then(|r| r.get(col as usize))
            .unwrap_or(&NULL)
    }

    fn set(&mut self, row: u32, col: u32, value: Value) {
        let r = row as usize - 1;
        let c = col as usize;
        if self.cells.len() <= r {
            self.cells.resize(r + 1, Vec::new());
        }
        let cells = &mut self.cells[r];
        if cells.len() <= c {
            cells.resize(c + 1, Value::Null);
        }
        cells[c] = value;
    }

    fn check_bounds(&self, range: &A1Range) -> Result<()> {
        let grid = &self.properties.grid_properties;
        let last_row = range.last_row().unwrap_or(range.first_row());
        if range.last_col() >= grid.column_count || last_row > grid.row_count {
            return Err(Error::Backend {
                status: 400,
                message: format!("Range ({}) exceeds grid limits", range),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    sheets: Vec<MemorySheet>,
    next_sheet_id: i64,
    format_requests: usize,
}

impl MemoryState {
    fn sheet(&self, title: &str) -> Result<&MemorySheet> {
        self.sheets
            .iter()
            .find(|s| s.properties.title == title)
            .ok_or_else(|| unknown_sheet(title))
    }

    fn sheet_mut(&mut self, title: &str) -> Result<&mut MemorySheet> {
        self.sheets
            .iter_mut()
            .find(|s| s.properties.title == title)
            .ok_or_else(|| unknown_sheet(title))
    }

    fn add_sheet(&mut self, title: &str, grid: GridProperties) -> Result<i64> {
        if self.sheets.iter().any(|s| s.properties.title == title) {
            return Err(Error::Backend {
                status: 400,
                message: format!(
                    "A sheet with the name \"{}\" already exists. Please enter another name.",
                    title
                ),
            });
        }
        let sheet_id = self.next_sheet_id;
        self.next_sheet_id += 1;
        self.sheets.push(MemorySheet {
            properties: SheetProperties {
                sheet_id,
                title: title.to_string(),
                grid_properties: grid,
            },
            cells: Vec::new(),
        });
        Ok(sheet_id)
    }
}

fn unknown_sheet(title: &str) -> Error {
    Error::Backend {
        status: 400,
        message: format!("Unable to parse range: {}", title),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Interpret a value the way the Sheets UI would if it were typed in
fn user_entered(value: Value) -> Value {
    match value {
        Value::String(s) if !s.starts_with('=') => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => serde_json::json!(n),
            _ => Value::String(s),
        },
        other => other,
    }
}

/// Process-local spreadsheet shared by clones
#[derive(Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
    unavailable: bool,
    failing_reads: Vec<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose every call fails, for error-path tests
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Make reads of exactly `range` fail while every other call succeeds
    pub fn failing_range(mut self, range: &str) -> Self {
        self.failing_reads.push(range.to_string());
        self
    }

    /// Pre-create a sheet with the given grid (e.g. a ledger from an older, narrower layout)
    ///
    /// A title that already exists is left untouched.
    pub fn with_sheet(self, title: &str, row_count: u32, column_count: u32) -> Self {
        let grid = GridProperties {
            row_count,
            column_count,
            frozen_row_count: None,
        };
        let _ = self.lock().add_sheet(title, grid);
        self
    }

    /// Snapshot of a sheet's cells, trailing blanks trimmed
    pub fn rows(&self, title: &str) -> Option<Rows> {
        let state = self.lock();
        let sheet = state.sheet(title).ok()?;
        let rows = sheet
            .cells
            .iter()
            .map(|row| trim_row(row.clone()))
            .collect();
        Some(trim_rows(rows))
    }

    /// Value of a single cell by A1 reference, `Null` when blank or missing
    pub fn cell(&self, range: &str) -> Value {
        let Ok(range) = A1Range::parse(range) else {
            return Value::Null;
        };
        let state = self.lock();
        state
            .sheet(&range.sheet)
            .map(|s| s.get(range.first_row(), range.first_col()).clone())
            .unwrap_or(Value::Null)
    }

    /// Grid dimensions of a sheet
    pub fn grid(&self, title: &str) -> Option<GridProperties> {
        let state = self.lock();
        state
            .sheet(title)
            .ok()
            .map(|s| s.properties.grid_properties.clone())
    }

    /// Number of formatting requests received so far
    pub fn format_requests(&self) -> usize {
        self.lock().format_requests
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // A panicking test thread must not wedge the others
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(Error::Backend {
                status: 503,
                message: "The service is currently unavailable.".into(),
            });
        }
        Ok(())
    }
}

fn trim_row(mut row: Vec<Value>) -> Vec<Value> {
    while row.last().is_some_and(is_blank) {
        row.pop();
    }
    row.into_iter()
        .map(|v| if v.is_null() { Value::String(String::new()) } else { v })
        .collect()
}

fn trim_rows(mut rows: Rows) -> Rows {
    while rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }
    rows
}

#[async_trait]
impl SheetsBackend for MemoryBackend {
    async fn spreadsheet(&self) -> Result<Spreadsheet> {
        self.check_available()?;
        let state = self.lock();
        Ok(Spreadsheet {
            sheets: state
                .sheets
                .iter()
                .map(|s| Sheet {
                    properties: s.properties.clone(),
                })
                .collect(),
        })
    }

    async fn get_values(&self, range: &str) -> Result<Rows> {
        self.check_available()?;
        if self.failing_reads.iter().any(|r| r == range) {
            return Err(Error::Backend {
                status: 500,
                message: format!("Internal error reading {}", range),
            });
        }
        let range = A1Range::parse(range)?;
        let state = self.lock();
        let sheet = state.sheet(&range.sheet)?;

        if range.first_col() >= sheet.properties.grid_properties.column_count
            || range.first_row() > sheet.properties.grid_properties.row_count
        {
            return Err(Error::Backend {
                status: 400,
                message: format!("Range ({}) exceeds grid limits", range),
            });
        }

        let grid = &sheet.properties.grid_properties;
        let last_row = range.last_row().unwrap_or(grid.row_count).min(grid.row_count);
        let last_col = range.last_col().min(grid.column_count - 1);

        let rows = (range.first_row()..=last_row)
            .map(|r| {
                let row = (range.first_col()..=last_col)
                    .map(|c| sheet.get(r, c).clone())
                    .collect();
                trim_row(row)
            })
            .collect();

        Ok(trim_rows(rows))
    }

    async fn update_values(
        &self,
        range: &str,
        values: Rows,
        input: ValueInputOption,
    ) -> Result<()> {
        self.check_available()?;
        let range = A1Range::parse(range)?;
        let mut state = self.lock();
        let sheet = state.sheet_mut(&range.sheet)?;

        // The written block must fit in the grid, like the real service
        let width = values.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let height = values.len() as u32;
        if width > 0 && height > 0 {
            let extent = A1Range::rect(
                &range.sheet,
                (range.first_col(), range.first_row()),
                (
                    range.first_col() + width - 1,
                    range.first_row() + height - 1,
                ),
            );
            sheet.check_bounds(&extent)?;
        }

        for (dr, row) in values.into_iter().enumerate() {
            for (dc, value) in row.into_iter().enumerate() {
                let value = match input {
                    ValueInputOption::Raw => value,
                    ValueInputOption::UserEntered => user_entered(value),
                };
                sheet.set(
                    range.first_row() + dr as u32,
                    range.first_col() + dc as u32,
                    value,
                );
            }
        }
        Ok(())
    }

    async fn batch_update(&self, requests: Vec<Request>) -> Result<()> {
        self.check_available()?;
        let mut state = self.lock();

        for request in requests {
            match request {
                Request::AddSheet { properties } => {
                    state.add_sheet(&properties.title, properties.grid_properties)?;
                }
                Request::UpdateSheetProperties { properties, .. } => {
                    let sheet = state
                        .sheets
                        .iter_mut()
                        .find(|s| s.properties.sheet_id == properties.sheet_id)
                        .ok_or_else(|| Error::Backend {
                            status: 400,
                            message: format!("No grid with id: {}", properties.sheet_id),
                        })?;
                    let grid = &mut sheet.properties.grid_properties;
                    let update = properties.grid_properties;
                    if let Some(rows) = update.row_count {
                        grid.row_count = rows;
                    }
                    if let Some(cols) = update.column_count {
                        grid.column_count = cols;
                    }
                    if let Some(frozen) = update.frozen_row_count {
                        grid.frozen_row_count = Some(frozen);
                    }
                }
                Request::RepeatCell { .. } => {
                    state.format_requests += 1;
                }
            }
        }
        Ok(())
    }

    fn spreadsheet_id(&self) -> &str {
        "memory"
    }
}
