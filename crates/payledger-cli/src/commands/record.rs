//! Record command implementation

use anyhow::{Context, Result};
use chrono::NaiveDate;
use payledger_core::{LedgerWriter, PaymentRecord};
use tracing::debug;

use super::{rupees, today};

pub fn build_payment(
    date: Option<NaiveDate>,
    channel_type: String,
    user_name: String,
    upi_id: String,
    amount: f64,
    status: String,
) -> PaymentRecord {
    PaymentRecord {
        date: date.unwrap_or_else(today),
        channel_type,
        user_name,
        upi_id,
        amount,
        status,
    }
}

pub async fn cmd_record(ledger: &LedgerWriter, payment: &PaymentRecord) -> Result<()> {
    println!(
        "📝 Recording {} from {} on {}...",
        rupees(payment.amount),
        payment.user_name,
        payment.date
    );

    let outcome = ledger
        .save_payment(payment)
        .await
        .context("Failed to store payment")?;
    debug!(
        ledger = %outcome.ledger,
        row = outcome.row,
        daily_total = ?outcome.daily_total,
        "Recorded payment"
    );

    println!("✅ Payment Stored Successfully");
    println!("   Ledger: {}", outcome.ledger);
    println!("   Row: {}", outcome.row);
    match outcome.daily_total {
        Some(total) => println!("   Daily total: {}", rupees(total)),
        None => println!("   Daily total: (not positive, summary unchanged)"),
    }

    Ok(())
}
