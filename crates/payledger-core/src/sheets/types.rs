//! Sheets API data types
//!
//! Only the subset of the Google Sheets v4 model that ledgers use. Field names
//! follow the REST API's camelCase JSON so the same types serialize straight
//! into request bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rows of cell values as returned by a range read
pub type Rows = Vec<Vec<Value>>;

/// Spreadsheet metadata (sheet list only)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spreadsheet {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

impl Spreadsheet {
    /// Find a sheet by its title
    pub fn find(&self, title: &str) -> Option<&SheetProperties> {
        self.sheets
            .iter()
            .map(|s| &s.properties)
            .find(|p| p.title == title)
    }

    pub fn titles(&self) -> Vec<String> {
        self.sheets
            .iter()
            .map(|s| s.properties.title.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    pub properties: SheetProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    #[serde(default)]
    pub sheet_id: i64,
    pub title: String,
    #[serde(default)]
    pub grid_properties: GridProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridProperties {
    #[serde(default)]
    pub row_count: u32,
    #[serde(default)]
    pub column_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frozen_row_count: Option<u32>,
}

/// How written values are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInputOption {
    /// Stored as-is: strings stay strings
    Raw,
    /// Parsed as if typed into the UI: formulas evaluate, numeric strings become numbers
    UserEntered,
}

impl ValueInputOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "RAW",
            Self::UserEntered => "USER_ENTERED",
        }
    }
}

/// Values payload for reads and writes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    #[serde(default)]
    pub values: Rows,
}

/// One structural or formatting mutation for `batchUpdate`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    AddSheet {
        properties: NewSheet,
    },
    UpdateSheetProperties {
        properties: SheetPropertiesUpdate,
        fields: String,
    },
    RepeatCell {
        range: GridRange,
        cell: CellData,
        fields: String,
    },
}

impl Request {
    pub fn add_sheet(title: &str, row_count: u32, column_count: u32) -> Self {
        Request::AddSheet {
            properties: NewSheet {
                title: title.to_string(),
                grid_properties: GridProperties {
                    row_count,
                    column_count,
                    frozen_row_count: None,
                },
            },
        }
    }

    pub fn resize_grid(sheet_id: i64, row_count: u32, column_count: u32) -> Self {
        Request::UpdateSheetProperties {
            properties: SheetPropertiesUpdate {
                sheet_id,
                grid_properties: GridPropertiesUpdate {
                    row_count: Some(row_count),
                    column_count: Some(column_count),
                    frozen_row_count: None,
                },
            },
            fields: "gridProperties(rowCount,columnCount)".to_string(),
        }
    }

    pub fn freeze_rows(sheet_id: i64, rows: u32) -> Self {
        Request::UpdateSheetProperties {
            properties: SheetPropertiesUpdate {
                sheet_id,
                grid_properties: GridPropertiesUpdate {
                    row_count: None,
                    column_count: None,
                    frozen_row_count: Some(rows),
                },
            },
            fields: "gridProperties.frozenRowCount".to_string(),
        }
    }

    pub fn repeat_format(range: GridRange, format: CellFormat, fields: &str) -> Self {
        Request::RepeatCell {
            range,
            cell: CellData {
                user_entered_format: format,
            },
            fields: fields.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSheet {
    pub title: String,
    pub grid_properties: GridProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetPropertiesUpdate {
    pub sheet_id: i64,
    pub grid_properties: GridPropertiesUpdate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPropertiesUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frozen_row_count: Option<u32>,
}

/// Zero-indexed, end-exclusive grid rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    pub sheet_id: i64,
    pub start_row_index: u32,
    pub end_row_index: u32,
    pub start_column_index: u32,
    pub end_column_index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    pub user_entered_format: CellFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_format: Option<TextFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_alignment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_format: Option<NumberFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borders: Option<Borders>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color {
    pub const fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberFormat {
    #[serde(rename = "type")]
    pub kind: String,
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Borders {
    pub bottom: Border,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Border {
    pub style: String,
    pub color: Color,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_sheet_serializes_like_the_api() {
        let request = Request::add_sheet("Mar-2025", 1000, 26);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "addSheet": {
                    "properties": {
                        "title": "Mar-2025",
                        "gridProperties": { "rowCount": 1000, "columnCount": 26 }
                    }
                }
            })
        );
    }

    #[test]
    fn test_resize_grid_serializes_field_mask() {
        let request = Request::resize_grid(7, 1000, 26);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "updateSheetProperties": {
                    "properties": {
                        "sheetId": 7,
                        "gridProperties": { "rowCount": 1000, "columnCount": 26 }
                    },
                    "fields": "gridProperties(rowCount,columnCount)"
                }
            })
        );
    }

    #[test]
    fn test_spreadsheet_metadata_parses() {
        let body = json!({
            "spreadsheetId": "abc",
            "sheets": [
                { "properties": { "sheetId": 0, "title": "Sheet1",
                  "gridProperties": { "rowCount": 1000, "columnCount": 26 } } },
                { "properties": { "sheetId": 42, "title": "Jan-2025",
                  "gridProperties": { "rowCount": 1000, "columnCount": 8, "frozenRowCount": 1 } } }
            ]
        });
        let spreadsheet: Spreadsheet = serde_json::from_value(body).unwrap();
        let jan = spreadsheet.find("Jan-2025").unwrap();
        assert_eq!(jan.sheet_id, 42);
        assert_eq!(jan.grid_properties.column_count, 8);
        assert_eq!(jan.grid_properties.frozen_row_count, Some(1));
        assert!(spreadsheet.find("Feb-2025").is_none());
        assert_eq!(spreadsheet.titles(), vec!["Sheet1", "Jan-2025"]);
    }

    #[test]
    fn test_value_range_without_values() {
        let range: ValueRange =
            serde_json::from_value(json!({ "range": "'Mar-2025'!J101", "majorDimension": "ROWS" }))
                .unwrap();
        assert!(range.values.is_empty());
    }
}
