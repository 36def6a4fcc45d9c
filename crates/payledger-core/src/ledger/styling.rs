//! Ledger cell formatting
//!
//! Builds `repeatCell` requests for the header, summary block and payment
//! rows. Applied through the backend's batch call after values are written.

use crate::layout::{
    COL_AMOUNT, DATA_COLUMNS, GRAND_TOTAL_ROW, SUMMARY_DATE_COL, SUMMARY_TITLE_ROW,
    SUMMARY_TOTAL_COL,
};
use crate::sheets::{
    Border, Borders, CellFormat, Color, GridRange, NumberFormat, Request, TextFormat,
};

const HEADER_BLUE: Color = Color::rgb(0.2, 0.4, 0.6);
const SUMMARY_ORANGE: Color = Color::rgb(0.8, 0.4, 0.2);
const TOTAL_YELLOW: Color = Color::rgb(1.0, 0.9, 0.0);
const ROW_GREY: Color = Color::rgb(0.95, 0.95, 0.95);
const BORDER_GREY: Color = Color::rgb(0.8, 0.8, 0.8);
const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

const RUPEE_PATTERN: &str = "\"₹\"#,##0.00";

/// Grid range over 1-indexed `row` and 0-indexed columns `first..=last`
fn row_span(sheet_id: i64, row: u32, first: u32, last: u32) -> GridRange {
    GridRange {
        sheet_id,
        start_row_index: row - 1,
        end_row_index: row,
        start_column_index: first,
        end_column_index: last + 1,
    }
}

fn currency() -> NumberFormat {
    NumberFormat {
        kind: "CURRENCY".to_string(),
        pattern: RUPEE_PATTERN.to_string(),
    }
}

/// Bold white-on-blue header across A..H, plus a frozen first row
pub fn header_requests(sheet_id: i64) -> Vec<Request> {
    let format = CellFormat {
        background_color: Some(HEADER_BLUE),
        text_format: Some(TextFormat {
            bold: Some(true),
            font_size: Some(12),
            foreground_color: Some(WHITE),
        }),
        horizontal_alignment: Some("CENTER".to_string()),
        ..Default::default()
    };

    vec![
        Request::repeat_format(
            row_span(sheet_id, 1, 0, DATA_COLUMNS - 1),
            format,
            "userEnteredFormat",
        ),
        Request::freeze_rows(sheet_id, 1),
    ]
}

/// Summary title banner and the Grand Total row
pub fn summary_requests(sheet_id: i64) -> Vec<Request> {
    let title = CellFormat {
        background_color: Some(SUMMARY_ORANGE),
        text_format: Some(TextFormat {
            bold: Some(true),
            font_size: Some(14),
            foreground_color: Some(WHITE),
        }),
        horizontal_alignment: Some("CENTER".to_string()),
        ..Default::default()
    };

    let grand_total = CellFormat {
        background_color: Some(TOTAL_YELLOW),
        text_format: Some(TextFormat {
            bold: Some(true),
            font_size: Some(12),
            foreground_color: None,
        }),
        horizontal_alignment: Some("RIGHT".to_string()),
        number_format: Some(currency()),
        ..Default::default()
    };

    vec![
        Request::repeat_format(
            row_span(sheet_id, SUMMARY_TITLE_ROW, SUMMARY_DATE_COL, SUMMARY_TOTAL_COL),
            title,
            "userEnteredFormat",
        ),
        Request::repeat_format(
            row_span(sheet_id, GRAND_TOTAL_ROW, SUMMARY_DATE_COL, SUMMARY_TOTAL_COL),
            grand_total,
            "userEnteredFormat",
        ),
    ]
}

/// Alternating shading with a bottom border, and currency on the amount cell
pub fn row_requests(sheet_id: i64, row: u32) -> Vec<Request> {
    let shade = if row % 2 == 0 { ROW_GREY } else { WHITE };

    let band = CellFormat {
        background_color: Some(shade),
        borders: Some(Borders {
            bottom: Border {
                style: "SOLID".to_string(),
                color: BORDER_GREY,
            },
        }),
        ..Default::default()
    };

    let amount = CellFormat {
        number_format: Some(currency()),
        ..Default::default()
    };

    vec![
        Request::repeat_format(
            row_span(sheet_id, row, 0, DATA_COLUMNS - 1),
            band,
            "userEnteredFormat(backgroundColor,borders)",
        ),
        Request::repeat_format(
            row_span(sheet_id, row, COL_AMOUNT, COL_AMOUNT),
            amount,
            "userEnteredFormat.numberFormat",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_requests_cover_first_row_and_freeze() {
        let requests = header_requests(7);
        assert_eq!(requests.len(), 2);

        let value = serde_json::to_value(&requests[0]).unwrap();
        let range = &value["repeatCell"]["range"];
        assert_eq!(range["sheetId"], json!(7));
        assert_eq!(range["startRowIndex"], json!(0));
        assert_eq!(range["endRowIndex"], json!(1));
        assert_eq!(range["endColumnIndex"], json!(8));
        assert_eq!(
            value["repeatCell"]["cell"]["userEnteredFormat"]["horizontalAlignment"],
            json!("CENTER")
        );

        assert_eq!(requests[1], Request::freeze_rows(7, 1));
    }

    #[test]
    fn test_summary_requests_target_title_and_grand_total_rows() {
        let requests = summary_requests(3);
        let rows: Vec<_> = requests
            .iter()
            .map(|r| {
                serde_json::to_value(r).unwrap()["repeatCell"]["range"]["startRowIndex"].clone()
            })
            .collect();
        assert_eq!(rows, vec![json!(99), json!(999)]);
    }

    #[test]
    fn test_row_requests_alternate_shading() {
        let even = serde_json::to_value(&row_requests(0, 2)[0]).unwrap();
        let odd = serde_json::to_value(&row_requests(0, 3)[0]).unwrap();
        let bg = |v: &serde_json::Value| {
            v["repeatCell"]["cell"]["userEnteredFormat"]["backgroundColor"].clone()
        };
        assert_ne!(bg(&even), bg(&odd));
    }

    #[test]
    fn test_amount_cell_uses_rupee_currency() {
        let amount = serde_json::to_value(&row_requests(0, 2)[1]).unwrap();
        let cell = &amount["repeatCell"];
        assert_eq!(cell["range"]["startColumnIndex"], json!(4));
        assert_eq!(cell["range"]["endColumnIndex"], json!(5));
        assert_eq!(
            cell["cell"]["userEnteredFormat"]["numberFormat"]["pattern"],
            json!("\"₹\"#,##0.00")
        );
    }
}
