//! Server command implementation

use anyhow::Result;
use payledger_core::{SheetsBackend, SheetsClient};
use payledger_server::{ServerConfig, API_KEYS_ENV};

use super::open_ledger;

pub async fn cmd_serve(client: SheetsClient, host: &str, port: u16, no_auth: bool) -> Result<()> {
    println!("🚀 Starting Payledger web server...");
    println!("   Backend: {} ({})", client.kind(), client.spreadsheet_id());
    println!("   Listening: http://{}:{}", host, port);

    let config = ServerConfig {
        require_auth: !no_auth,
        ..ServerConfig::from_env()
    };

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else if config.api_keys.is_empty() {
        println!(
            "   ❌ Authentication: no keys set ({}), all payment requests will be rejected",
            API_KEYS_ENV
        );
    } else {
        println!(
            "   🔑 API keys: {} configured ({})",
            config.api_keys.len(),
            API_KEYS_ENV
        );
    }

    if !config.allowed_origins.is_empty() {
        println!("   🌐 CORS origins: {}", config.allowed_origins.join(", "));
    }

    payledger_server::serve_with_config(open_ledger(client), host, port, config).await
}
