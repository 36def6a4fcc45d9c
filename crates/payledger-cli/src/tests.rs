//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use chrono::NaiveDate;
use clap::Parser;
use payledger_core::{BackendKind, LedgerWriter, MemoryBackend, SheetsClient};

use crate::cli::{Cli, Commands};
use crate::commands::{self, rupees};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn memory_ledger() -> (LedgerWriter, MemoryBackend) {
    let backend = MemoryBackend::new();
    (
        LedgerWriter::new(SheetsClient::Memory(backend.clone())),
        backend,
    )
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_record() {
    let cli = Cli::try_parse_from([
        "payledger",
        "--backend",
        "memory",
        "record",
        "--date",
        "2025-03-05",
        "--user",
        "Asha",
        "--upi",
        "asha@bank",
        "--amount",
        "250",
    ])
    .unwrap();

    assert_eq!(cli.backend, BackendKind::Memory);
    match cli.command {
        Commands::Record {
            date,
            channel,
            user,
            amount,
            status,
            ..
        } => {
            assert_eq!(date, Some(d(2025, 3, 5)));
            assert_eq!(channel, "UPI");
            assert_eq!(user, "Asha");
            assert_eq!(amount, 250.0);
            assert_eq!(status, "SUCCESS");
        }
        _ => panic!("expected record command"),
    }
}

#[test]
fn test_parse_rejects_unknown_backend() {
    let result = Cli::try_parse_from(["payledger", "--backend", "postgres", "status"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_serve_defaults() {
    let cli = Cli::try_parse_from(["payledger", "serve", "--no-auth"]).unwrap();
    match cli.command {
        Commands::Serve {
            port,
            host,
            no_auth,
        } => {
            assert_eq!(port, 8080);
            assert_eq!(host, "127.0.0.1");
            assert!(no_auth);
        }
        _ => panic!("expected serve command"),
    }
}

// ========== Utility Tests ==========

#[test]
fn test_resolve_month() {
    let today = d(2025, 3, 18);
    assert_eq!(commands::resolve_month(None, today).unwrap(), "Mar-2025");
    assert_eq!(
        commands::resolve_month(Some("2024-12"), today).unwrap(),
        "Dec-2024"
    );
    assert_eq!(
        commands::resolve_month(Some("jan-2025"), today).unwrap(),
        "Jan-2025"
    );
    assert!(commands::resolve_month(Some("2025-13"), today).is_err());
    assert!(commands::resolve_month(Some("March"), today).is_err());
}

#[test]
fn test_rupees() {
    assert_eq!(rupees(250.0), "₹250.00");
    assert_eq!(rupees(1234.5), "₹1234.50");
}

#[test]
fn test_build_payment_defaults_to_today() {
    let payment = commands::build_payment(
        None,
        "UPI".into(),
        "Asha".into(),
        "asha@bank".into(),
        10.0,
        "SUCCESS".into(),
    );
    assert_eq!(payment.date, commands::today());
}

#[test]
fn test_open_memory_client() {
    let client = commands::open_client(BackendKind::Memory, None).unwrap();
    assert_eq!(client.kind(), BackendKind::Memory);
}

// ========== Command Tests ==========

#[tokio::test]
async fn test_cmd_record() {
    let (ledger, backend) = memory_ledger();
    let payment = commands::build_payment(
        Some(d(2025, 3, 5)),
        "UPI".into(),
        "Asha".into(),
        "asha@bank".into(),
        250.0,
        "SUCCESS".into(),
    );

    commands::cmd_record(&ledger, &payment).await.unwrap();

    assert_eq!(
        backend.cell("'Mar-2025'!C2"),
        serde_json::json!("Asha")
    );
    assert_eq!(backend.cell("'Mar-2025'!G2"), serde_json::json!(250.0));
}

#[tokio::test]
async fn test_cmd_summary() {
    let (ledger, _backend) = memory_ledger();
    let payment = commands::build_payment(
        Some(d(2025, 3, 5)),
        "UPI".into(),
        "Asha".into(),
        "asha@bank".into(),
        250.0,
        "SUCCESS".into(),
    );
    commands::cmd_record(&ledger, &payment).await.unwrap();

    assert!(commands::cmd_summary(&ledger, "Mar-2025", false).await.is_ok());
    assert!(commands::cmd_summary(&ledger, "Mar-2025", true).await.is_ok());
}

#[tokio::test]
async fn test_cmd_summary_missing_ledger() {
    let (ledger, _backend) = memory_ledger();
    let err = commands::cmd_summary(&ledger, "Apr-2025", false)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Apr-2025"));
}

#[tokio::test]
async fn test_cmd_record_backend_failure() {
    let ledger = LedgerWriter::new(SheetsClient::Memory(MemoryBackend::unavailable()));
    let payment = commands::build_payment(
        Some(d(2025, 3, 5)),
        "UPI".into(),
        "Asha".into(),
        "asha@bank".into(),
        250.0,
        "SUCCESS".into(),
    );
    assert!(commands::cmd_record(&ledger, &payment).await.is_err());
}

#[tokio::test]
async fn test_cmd_status() {
    let client = SheetsClient::memory();
    assert!(commands::cmd_status(&client).await.is_ok());

    // Connection problems are reported, not returned
    let client = SheetsClient::Memory(MemoryBackend::unavailable());
    assert!(commands::cmd_status(&client).await.is_ok());
}
