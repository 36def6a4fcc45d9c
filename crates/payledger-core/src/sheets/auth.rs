//! Service-account authentication for the Sheets API
//!
//! Uses the OAuth2 JWT-bearer grant: an RS256 assertion signed with the
//! service account's private key is exchanged at the key's `token_uri` for a
//! short-lived access token. Tokens are cached until shortly before expiry.

use std::fmt;

use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Error, Result};

/// OAuth scope for read/write spreadsheet access
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion lifetime (Google's maximum)
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Refresh this long before the cached token expires
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Google service-account key (the JSON downloaded from the cloud console)
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Parse a key from its JSON text
    pub fn from_json(json: &[u8]) -> Result<Self> {
        let key: Self = serde_json::from_slice(json)
            .map_err(|e| Error::Credentials(format!("Invalid service-account JSON: {}", e)))?;

        if key.client_email.trim().is_empty() {
            return Err(Error::Credentials("client_email is empty".into()));
        }
        if !key.private_key.contains("PRIVATE KEY") {
            return Err(Error::Credentials(
                "private_key is not a PEM-encoded key".into(),
            ));
        }
        Ok(key)
    }

    /// Parse a key from base64-encoded JSON (the `GOOGLE_CREDENTIALS` format)
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let decoded = base64::engine::general_purpose::STANDARD.decode(encoded.trim())?;
        Self::from_json(&decoded)
    }
}

// Keep the private key out of logs
impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .field("project_id", &self.project_id)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Fetches and caches access tokens for one service account
pub struct TokenProvider {
    http_client: Client,
    key: ServiceAccountKey,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(http_client: Client, key: ServiceAccountKey) -> Self {
        Self {
            http_client,
            key,
            cached: Mutex::new(None),
        }
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Return a valid access token, exchanging a fresh assertion if needed
    pub async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref() {
            if token.expires_at > now {
                return Ok(token.access_token.clone());
            }
        }

        let assertion = self.assertion(now)?;
        let response = self
            .http_client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Credentials(format!(
                "Token exchange failed ({}): {}",
                status, body
            )));
        }

        let token: TokenResponse = response.json().await?;
        debug!(
            client_email = %self.key.client_email,
            expires_in = token.expires_in,
            "Obtained Sheets access token"
        );

        let expires_at = now + Duration::seconds(token.expires_in - EXPIRY_MARGIN_SECS);
        *cached = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at,
        });

        Ok(token.access_token)
    }

    /// Build the signed JWT assertion for the token exchange
    fn assertion(&self, now: DateTime<Utc>) -> Result<String> {
        let iat = now.timestamp();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let encoding_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())?;
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &encoding_key,
        )?)
    }
}
