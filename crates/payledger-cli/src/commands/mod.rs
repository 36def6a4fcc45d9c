//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_client, open_ledger, month parsing)
//! - `record` - Record a single payment
//! - `serve` - Web server command
//! - `status` - Backend and ledger status
//! - `summary` - Ledger summary display

pub mod core;
pub mod record;
pub mod serve;
pub mod status;
pub mod summary;

// Re-export command functions for main.rs
pub use self::core::*;
pub use record::*;
pub use serve::*;
pub use status::*;
pub use summary::*;

/// Format an amount in rupees with two decimals
pub fn rupees(amount: f64) -> String {
    format!("₹{:.2}", amount)
}
