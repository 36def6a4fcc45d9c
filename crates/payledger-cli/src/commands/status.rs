//! Status command implementation

use anyhow::Result;
use payledger_core::config::CREDENTIALS_ENV;
use payledger_core::{LedgerWriter, SheetsBackend, SheetsClient};

pub async fn cmd_status(client: &SheetsClient) -> Result<()> {
    println!();
    println!("📊 Payledger Status");
    println!("   ─────────────────────────────────────────────────────────────");

    println!("   Backend: {}", client.kind());
    println!("   Spreadsheet: {}", client.spreadsheet_id());

    if let SheetsClient::Google(backend) = client {
        println!(
            "   🔑 Service account: {} ({})",
            backend.client_email(),
            CREDENTIALS_ENV
        );
    }

    let ledger = LedgerWriter::new(client.clone());
    match ledger.ledgers().await {
        Ok(ledgers) => {
            println!("   ✅ Connection: OK");
            println!();
            println!("   Ledgers: {}", ledgers.len());
            for name in &ledgers {
                println!("     - {}", name);
            }
        }
        Err(e) => {
            println!("   ❌ Connection: {}", e);
        }
    }

    println!();
    Ok(())
}
