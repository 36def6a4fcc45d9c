//! Payment recording and ledger summary handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::{AppError, AppState};
use payledger_core::layout::{ledger_name, parse_ledger_name};
use payledger_core::{LedgerSummary, PaymentRecord};

pub const SAVED_MESSAGE: &str = "Payment Stored Successfully";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePaymentResponse {
    pub success: bool,
    pub message: &'static str,
    pub ledger: String,
    pub row: u32,
    pub daily_total: Option<f64>,
}

/// POST /payment/save - Record a payment in its monthly ledger
pub async fn save_payment(
    State(state): State<Arc<AppState>>,
    Json(payment): Json<PaymentRecord>,
) -> Result<Json<SavePaymentResponse>, AppError> {
    let outcome = state
        .ledger
        .save_payment(&payment)
        .await
        .map_err(AppError::from_ledger)?;

    Ok(Json(SavePaymentResponse {
        success: true,
        message: SAVED_MESSAGE,
        ledger: outcome.ledger,
        row: outcome.row,
        daily_total: outcome.daily_total,
    }))
}

/// GET /payment/summary/:ledger - Summary block of a monthly ledger (e.g. Mar-2025)
///
/// Month names are matched case-insensitively (`mar-2025` reads `Mar-2025`).
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Path(ledger): Path<String>,
) -> Result<Json<LedgerSummary>, AppError> {
    let Some(month) = parse_ledger_name(&ledger) else {
        return Err(AppError::bad_request(
            "Invalid ledger name (expected Mon-YYYY, e.g. Mar-2025)",
        ));
    };
    let ledger = ledger_name(month);

    let summary = state
        .ledger
        .summary(&ledger)
        .await
        .map_err(AppError::from_ledger)?;

    Ok(Json(summary))
}
