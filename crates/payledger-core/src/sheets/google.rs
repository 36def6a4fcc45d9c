//! Google Sheets v4 backend
//!
//! Thin REST client over `spreadsheets.get`, `values.get`, `values.update`
//! and `spreadsheets.batchUpdate`. No retries: a failed call surfaces as an
//! error to the caller of the whole save.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SheetsConfig;
use crate::error::{Error, Result};

use super::auth::TokenProvider;
use super::types::{Request, Rows, Spreadsheet, ValueInputOption, ValueRange};
use super::SheetsBackend;

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets/";

/// Per-request timeout for Sheets and token calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Google Sheets REST backend bound to one spreadsheet
#[derive(Clone)]
pub struct GoogleSheetsBackend {
    http_client: Client,
    base_url: Url,
    spreadsheet_id: String,
    tokens: Arc<TokenProvider>,
}

#[derive(Debug, Serialize)]
struct BatchUpdateRequest<'a> {
    requests: &'a [Request],
}

/// Error envelope returned by Google APIs
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl GoogleSheetsBackend {
    pub fn new(config: SheetsConfig) -> Result<Self> {
        let http_client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base_url = Url::parse(DEFAULT_BASE_URL)
            .map_err(|e| Error::Config(format!("Invalid Sheets base URL: {}", e)))?;

        Ok(Self {
            tokens: Arc::new(TokenProvider::new(
                http_client.clone(),
                config.credentials,
            )),
            http_client,
            base_url,
            spreadsheet_id: config.spreadsheet_id,
        })
    }

    /// Service account the backend authenticates as
    pub fn client_email(&self) -> &str {
        self.tokens.client_email()
    }

    /// `{base}/{id}{suffix}` followed by any extra path segments
    fn url(&self, suffix: &str, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| Error::Config("Sheets base URL cannot be a base".into()))?;
            path.pop_if_empty();
            path.push(&format!("{}{}", self.spreadsheet_id, suffix));
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let token = self.tokens.access_token().await?;
        let response = request.bearer_auth(token).send().await?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.error.message)
            .unwrap_or(body);

        Err(Error::Backend { status, message })
    }
}

#[async_trait]
impl SheetsBackend for GoogleSheetsBackend {
    async fn spreadsheet(&self) -> Result<Spreadsheet> {
        let mut url = self.url("", &[])?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties");

        let response = self.send(self.http_client.get(url)).await?;
        Ok(response.json().await?)
    }

    async fn get_values(&self, range: &str) -> Result<Rows> {
        let mut url = self.url("", &["values", range])?;
        url.query_pairs_mut()
            .append_pair("valueRenderOption", "UNFORMATTED_VALUE");

        debug!(range = %range, "Reading values");
        let response = self.send(self.http_client.get(url)).await?;
        let body: ValueRange = response.json().await?;
        Ok(body.values)
    }

    async fn update_values(
        &self,
        range: &str,
        values: Rows,
        input: ValueInputOption,
    ) -> Result<()> {
        let mut url = self.url("", &["values", range])?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", input.as_str());

        debug!(range = %range, rows = values.len(), input = input.as_str(), "Writing values");
        let body = ValueRange {
            range: Some(range.to_string()),
            major_dimension: Some("ROWS".to_string()),
            values,
        };
        self.send(self.http_client.put(url).json(&body)).await?;
        Ok(())
    }

    async fn batch_update(&self, requests: Vec<Request>) -> Result<()> {
        if requests.is_empty() {
            return Ok(());
        }

        let url = self.url(":batchUpdate", &[])?;
        debug!(requests = requests.len(), "Applying batch update");
        let body = BatchUpdateRequest {
            requests: &requests,
        };
        self.send(self.http_client.post(url).json(&body)).await?;
        Ok(())
    }

    fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }
}
