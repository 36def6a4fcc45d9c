//! A1 notation for sheet ranges
//!
//! The Sheets API addresses cells as `'Sheet Name'!A1:H1`. Ledger code builds
//! ranges with [`A1Range`] and the in-memory backend parses them back.
//!
//! Columns are 0-indexed internally (A = 0), rows are 1-indexed as in the
//! notation itself. A column-only bound (`A:A`) leaves the row open.

use std::fmt;

use crate::error::{Error, Result};

/// One corner of a range: a column and an optional row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub col: u32,
    pub row: Option<u32>,
}

impl CellRef {
    pub fn new(col: u32, row: u32) -> Self {
        Self {
            col,
            row: Some(row),
        }
    }

    pub fn column(col: u32) -> Self {
        Self { col, row: None }
    }

    fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_uppercase();
        let mut col_str = String::new();
        let mut row_str = String::new();

        for c in s.chars() {
            if c.is_ascii_alphabetic() && row_str.is_empty() {
                col_str.push(c);
            } else if c.is_ascii_digit() {
                row_str.push(c);
            } else {
                return None;
            }
        }

        if col_str.is_empty() {
            return None;
        }
        let col = letters_to_col(&col_str)?;

        let row = if row_str.is_empty() {
            None
        } else {
            let row: u32 = row_str.parse().ok()?;
            if row == 0 {
                return None;
            }
            Some(row)
        };

        Some(Self { col, row })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", col_to_letters(self.col))?;
        if let Some(row) = self.row {
            write!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// A sheet-qualified range such as `'Mar-2025'!J103:K999`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Range {
    pub sheet: String,
    pub start: CellRef,
    pub end: Option<CellRef>,
}

impl A1Range {
    /// A single cell
    pub fn cell(sheet: &str, col: u32, row: u32) -> Self {
        Self {
            sheet: sheet.to_string(),
            start: CellRef::new(col, row),
            end: None,
        }
    }

    /// A rectangle between two cells (inclusive)
    pub fn rect(sheet: &str, start: (u32, u32), end: (u32, u32)) -> Self {
        Self {
            sheet: sheet.to_string(),
            start: CellRef::new(start.0, start.1),
            end: Some(CellRef::new(end.0, end.1)),
        }
    }

    /// Whole columns, e.g. `A:H`
    pub fn columns(sheet: &str, first: u32, last: u32) -> Self {
        Self {
            sheet: sheet.to_string(),
            start: CellRef::column(first),
            end: Some(CellRef::column(last)),
        }
    }

    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || Error::InvalidRange(input.to_string());

        let (sheet, cells) = split_sheet(input).ok_or_else(invalid)?;
        let (start, end) = match cells.split_once(':') {
            Some((a, b)) => (
                CellRef::parse(a).ok_or_else(invalid)?,
                Some(CellRef::parse(b).ok_or_else(invalid)?),
            ),
            None => (CellRef::parse(cells).ok_or_else(invalid)?, None),
        };

        if start.row.is_none() && end.is_none() {
            return Err(invalid());
        }

        Ok(Self { sheet, start, end })
    }

    /// First row covered by the range (row 1 for column-only ranges)
    pub fn first_row(&self) -> u32 {
        self.start.row.unwrap_or(1)
    }

    /// Last row covered by the range, `None` when open-ended
    pub fn last_row(&self) -> Option<u32> {
        match self.end {
            Some(end) => end.row,
            None => self.start.row,
        }
    }

    pub fn first_col(&self) -> u32 {
        self.start.col
    }

    pub fn last_col(&self) -> u32 {
        self.end.map(|e| e.col).unwrap_or(self.start.col)
    }
}

impl fmt::Display for A1Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'!{}", self.sheet.replace('\'', "''"), self.start)?;
        if let Some(end) = self.end {
            write!(f, ":{}", end)?;
        }
        Ok(())
    }
}

/// Split `'Sheet'!A1` or `Sheet!A1` into the unquoted sheet name and the cell part
fn split_sheet(input: &str) -> Option<(String, &str)> {
    if let Some(rest) = input.strip_prefix('\'') {
        // Quoted name: '' is an escaped quote
        let mut name = String::new();
        let mut chars = rest.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if c == '\'' {
                if matches!(chars.peek(), Some((_, '\''))) {
                    name.push('\'');
                    chars.next();
                    continue;
                }
                let cells = rest[i + 1..].strip_prefix('!')?;
                return Some((name, cells));
            }
            name.push(c);
        }
        None
    } else {
        let (name, cells) = input.rsplit_once('!')?;
        if name.is_empty() {
            return None;
        }
        Some((name.to_string(), cells))
    }
}

/// Convert column index to letter(s): 0 -> A, 25 -> Z, 26 -> AA, etc.
pub fn col_to_letters(col: u32) -> String {
    let mut result = String::new();
    let mut n = col + 1;
    while n > 0 {
        n -= 1;
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    result
}

fn letters_to_col(letters: &str) -> Option<u32> {
    let mut col: u32 = 0;
    for c in letters.chars() {
        col = col.checked_mul(26)?.checked_add(c as u32 - 'A' as u32 + 1)?;
    }
    col.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_letters() {
        assert_eq!(col_to_letters(0), "A");
        assert_eq!(col_to_letters(9), "J");
        assert_eq!(col_to_letters(25), "Z");
        assert_eq!(col_to_letters(26), "AA");
        assert_eq!(letters_to_col("K"), Some(10));
        assert_eq!(letters_to_col("AA"), Some(26));
    }

    #[test]
    fn test_display_quotes_sheet_name() {
        let range = A1Range::rect("Mar-2025", (0, 1), (7, 1));
        assert_eq!(range.to_string(), "'Mar-2025'!A1:H1");

        let range = A1Range::cell("Bob's", 6, 12);
        assert_eq!(range.to_string(), "'Bob''s'!G12");
    }

    #[test]
    fn test_parse_quoted_and_bare() {
        let range = A1Range::parse("'Mar-2025'!J103:K999").unwrap();
        assert_eq!(range.sheet, "Mar-2025");
        assert_eq!(range.first_col(), 9);
        assert_eq!(range.last_col(), 10);
        assert_eq!(range.first_row(), 103);
        assert_eq!(range.last_row(), Some(999));

        let range = A1Range::parse("Sheet1!G5").unwrap();
        assert_eq!(range.sheet, "Sheet1");
        assert_eq!(range.first_row(), 5);
        assert_eq!(range.last_row(), Some(5));

        let range = A1Range::parse("'Bob''s'!A1").unwrap();
        assert_eq!(range.sheet, "Bob's");
    }

    #[test]
    fn test_parse_column_range_is_open_ended() {
        let range = A1Range::parse("'Jan-2025'!A:H").unwrap();
        assert_eq!(range.first_row(), 1);
        assert_eq!(range.last_row(), None);
        assert_eq!(range.last_col(), 7);
        assert_eq!(range, A1Range::columns("Jan-2025", 0, 7));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(A1Range::parse("A1").is_err());
        assert!(A1Range::parse("'Unclosed!A1").is_err());
        assert!(A1Range::parse("Sheet!1A").is_err());
        assert!(A1Range::parse("Sheet!A0").is_err());
        assert!(A1Range::parse("Sheet!A").is_err());
    }
}
