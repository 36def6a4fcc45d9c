//! Spreadsheet backend abstraction
//!
//! # Architecture
//!
//! - `SheetsBackend` trait: the handful of spreadsheet calls a ledger needs
//! - `SheetsClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `GoogleSheetsBackend`, `MemoryBackend`
//!
//! # Usage
//!
//! ```rust,ignore
//! let config = SheetsConfig::from_env()?;
//! let client = SheetsClient::google(config)?;
//! let meta = client.spreadsheet().await?;
//! println!("Sheets: {:?}", meta.titles());
//! ```

pub mod auth;
mod google;
mod memory;
pub mod types;

pub use auth::{ServiceAccountKey, TokenProvider};
pub use google::GoogleSheetsBackend;
pub use memory::MemoryBackend;
pub use types::*;

use async_trait::async_trait;

use crate::config::{BackendKind, SheetsConfig};
use crate::error::Result;

/// Trait defining the spreadsheet operations ledgers depend on
///
/// Ranges are A1 strings (see [`crate::a1::A1Range`]). Backends should be
/// Send + Sync to allow use across async tasks.
#[async_trait]
pub trait SheetsBackend: Send + Sync {
    /// Fetch spreadsheet metadata: sheet names, ids and grid dimensions
    async fn spreadsheet(&self) -> Result<Spreadsheet>;

    /// Read a range as rows of values (trailing blanks omitted)
    async fn get_values(&self, range: &str) -> Result<Rows>;

    /// Write rows starting at the top-left cell of `range`
    async fn update_values(&self, range: &str, values: Rows, input: ValueInputOption)
        -> Result<()>;

    /// Apply structural and formatting mutations in one call
    async fn batch_update(&self, requests: Vec<Request>) -> Result<()>;

    /// Identifier of the target spreadsheet (for logging)
    fn spreadsheet_id(&self) -> &str;
}

/// Concrete sheets client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum SheetsClient {
    /// Google Sheets v4 REST API
    Google(GoogleSheetsBackend),
    /// In-memory grid for development and tests
    Memory(MemoryBackend),
}

impl SheetsClient {
    /// Create a Google-backed client
    pub fn google(config: SheetsConfig) -> Result<Self> {
        Ok(SheetsClient::Google(GoogleSheetsBackend::new(config)?))
    }

    /// Create an empty in-memory client
    pub fn memory() -> Self {
        SheetsClient::Memory(MemoryBackend::new())
    }

    /// Create a client of the requested kind
    ///
    /// The Google backend loads credentials from the environment and fails
    /// fast when they are missing.
    pub fn connect(kind: BackendKind, spreadsheet_id: Option<String>) -> Result<Self> {
        match kind {
            BackendKind::Google => Self::google(SheetsConfig::load(spreadsheet_id)?),
            BackendKind::Memory => {
                tracing::warn!("Using in-memory sheets backend; nothing will be persisted");
                Ok(Self::memory())
            }
        }
    }

    /// Create a client from `SHEETS_BACKEND` and the Google settings
    pub fn from_env() -> Result<Self> {
        Self::connect(BackendKind::from_env()?, None)
    }

    /// Which backend this client talks to
    pub fn kind(&self) -> BackendKind {
        match self {
            SheetsClient::Google(_) => BackendKind::Google,
            SheetsClient::Memory(_) => BackendKind::Memory,
        }
    }
}

// Implement SheetsBackend for SheetsClient by delegating to the inner backend
#[async_trait]
impl SheetsBackend for SheetsClient {
    async fn spreadsheet(&self) -> Result<Spreadsheet> {
        match self {
            SheetsClient::Google(b) => b.spreadsheet().await,
            SheetsClient::Memory(b) => b.spreadsheet().await,
        }
    }

    async fn get_values(&self, range: &str) -> Result<Rows> {
        match self {
            SheetsClient::Google(b) => b.get_values(range).await,
            SheetsClient::Memory(b) => b.get_values(range).await,
        }
    }

    async fn update_values(
        &self,
        range: &str,
        values: Rows,
        input: ValueInputOption,
    ) -> Result<()> {
        match self {
            SheetsClient::Google(b) => b.update_values(range, values, input).await,
            SheetsClient::Memory(b) => b.update_values(range, values, input).await,
        }
    }

    async fn batch_update(&self, requests: Vec<Request>) -> Result<()> {
        match self {
            SheetsClient::Google(b) => b.batch_update(requests).await,
            SheetsClient::Memory(b) => b.batch_update(requests).await,
        }
    }

    fn spreadsheet_id(&self) -> &str {
        match self {
            SheetsClient::Google(b) => b.spreadsheet_id(),
            SheetsClient::Memory(b) => b.spreadsheet_id(),
        }
    }
}
