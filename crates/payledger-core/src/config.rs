//! Backend configuration from the environment
//!
//! Environment variables:
//! - `PAYLEDGER_SPREADSHEET_ID`: target spreadsheet (required for the Google backend)
//! - `GOOGLE_CREDENTIALS`: base64-encoded service-account JSON (required for the Google backend)
//! - `SHEETS_BACKEND`: `google` (default) or `memory`

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::sheets::ServiceAccountKey;

pub const SPREADSHEET_ID_ENV: &str = "PAYLEDGER_SPREADSHEET_ID";
pub const CREDENTIALS_ENV: &str = "GOOGLE_CREDENTIALS";
pub const BACKEND_ENV: &str = "SHEETS_BACKEND";

/// Which spreadsheet backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Google Sheets v4 REST API
    #[default]
    Google,
    /// Process-local grid, nothing persisted (development and tests)
    Memory,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" | "sheets" => Ok(Self::Google),
            "memory" | "mock" => Ok(Self::Memory),
            other => Err(format!(
                "Unknown sheets backend '{}' (expected google or memory)",
                other
            )),
        }
    }
}

impl BackendKind {
    /// Read `SHEETS_BACKEND`, defaulting to Google when unset
    pub fn from_env() -> Result<Self> {
        match std::env::var(BACKEND_ENV) {
            Ok(value) if !value.trim().is_empty() => value.parse().map_err(Error::Config),
            _ => Ok(Self::default()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Memory => "memory",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the Google backend needs
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub credentials: ServiceAccountKey,
}

impl SheetsConfig {
    /// Build config from an explicit spreadsheet id and base64 credentials
    ///
    /// Either value missing or empty is a configuration error.
    pub fn from_parts(
        spreadsheet_id: Option<String>,
        encoded_credentials: Option<String>,
    ) -> Result<Self> {
        let spreadsheet_id = spreadsheet_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Config(format!("{} not set", SPREADSHEET_ID_ENV)))?;

        let encoded = encoded_credentials
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| Error::Config(format!("{} not set", CREDENTIALS_ENV)))?;

        let credentials = ServiceAccountKey::from_base64(&encoded)
            .map_err(|e| Error::Config(format!("{} is invalid: {}", CREDENTIALS_ENV, e)))?;

        Ok(Self {
            spreadsheet_id,
            credentials,
        })
    }

    /// Load credentials from `GOOGLE_CREDENTIALS`
    ///
    /// `spreadsheet_id` is passed in so callers can resolve it from a flag
    /// before falling back to `PAYLEDGER_SPREADSHEET_ID`.
    pub fn load(spreadsheet_id: Option<String>) -> Result<Self> {
        let spreadsheet_id = spreadsheet_id.or_else(|| std::env::var(SPREADSHEET_ID_ENV).ok());
        Self::from_parts(spreadsheet_id, std::env::var(CREDENTIALS_ENV).ok())
    }

    /// Load everything from the environment
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }
}
