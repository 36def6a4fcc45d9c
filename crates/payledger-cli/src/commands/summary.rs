//! Summary command implementation

use anyhow::{Context, Result};
use payledger_core::LedgerWriter;

use super::rupees;

pub async fn cmd_summary(ledger: &LedgerWriter, name: &str, json: bool) -> Result<()> {
    let summary = ledger
        .summary(name)
        .await
        .with_context(|| format!("Failed to read summary for {}", name))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println!("📒 {}", summary.ledger);
    println!("   ─────────────────────────────");

    if summary.entries.is_empty() {
        println!("   (no entries)");
    }
    for entry in &summary.entries {
        println!("   {:<12} {:>14}", entry.date, rupees(entry.total));
    }

    println!("   ─────────────────────────────");
    println!("   {:<12} {:>14}", "Grand Total", rupees(summary.grand_total));

    Ok(())
}
