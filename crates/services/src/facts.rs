use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::error::FactError;

/// Text delivered whenever a fact cannot be retrieved.
pub const FALLBACK_FACT: &str = "Could not fetch random fact";

pub const DEFAULT_FACT_URL: &str = "https://uselessfacts.jsph.pl/random.json";

/// Source of the celebratory message shown once every phase is complete.
///
/// Implementations must not fail: any retrieval problem resolves to
/// [`FALLBACK_FACT`] or another fixed text.
#[async_trait]
pub trait FactSource: Send + Sync {
    async fn fetch_fact(&self) -> String;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactConfig {
    /// `None` keeps the source offline.
    pub endpoint: Option<Url>,
}

impl Default for FactConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_FACT_URL).ok(),
        }
    }
}

impl FactConfig {
    #[must_use]
    pub fn offline() -> Self {
        Self { endpoint: None }
    }

    /// Read `PROGRESS_FACT_OFFLINE` and `PROGRESS_FACT_URL`.
    ///
    /// # Errors
    ///
    /// Returns `FactError::InvalidEndpoint` if `PROGRESS_FACT_URL` is not a URL.
    pub fn from_env() -> Result<Self, FactError> {
        let offline = env::var("PROGRESS_FACT_OFFLINE")
            .is_ok_and(|value| matches!(value.trim(), "1" | "true" | "yes"));
        if offline {
            return Ok(Self::offline());
        }
        match env::var("PROGRESS_FACT_URL") {
            Ok(raw) if !raw.trim().is_empty() => {
                let endpoint =
                    Url::parse(raw.trim()).map_err(|_| FactError::InvalidEndpoint(raw.clone()))?;
                Ok(Self {
                    endpoint: Some(endpoint),
                })
            }
            _ => Ok(Self::default()),
        }
    }
}

/// Fetches a random fact over HTTP.
#[derive(Clone)]
pub struct HttpFactSource {
    client: Client,
    config: FactConfig,
}

impl HttpFactSource {
    #[must_use]
    pub fn new(config: FactConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.endpoint.is_some()
    }

    /// Fetch a fact, reporting why it failed.
    ///
    /// # Errors
    ///
    /// Returns `FactError` when offline, on transport failure, on a non-success
    /// status, or when the body has no usable `text`.
    pub async fn try_fetch(&self) -> Result<String, FactError> {
        let endpoint = self.config.endpoint.as_ref().ok_or(FactError::Disabled)?;

        let response = self.client.get(endpoint.clone()).send().await?;
        if !response.status().is_success() {
            return Err(FactError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        parse_fact_body(&body)
    }
}

#[async_trait]
impl FactSource for HttpFactSource {
    async fn fetch_fact(&self) -> String {
        match self.try_fetch().await {
            Ok(text) => {
                debug!(chars = text.len(), "fetched random fact");
                text
            }
            Err(err) => {
                warn!(error = %err, "could not fetch random fact; using fallback");
                FALLBACK_FACT.to_string()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct FactResponse {
    text: Option<String>,
}

/// Extract the trimmed `text` field from a fact response body.
///
/// # Errors
///
/// Returns `FactError::Decode` for invalid JSON and `FactError::EmptyText` when
/// `text` is missing or blank.
pub fn parse_fact_body(body: &str) -> Result<String, FactError> {
    let parsed: FactResponse = serde_json::from_str(body)?;
    parsed
        .text
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(FactError::EmptyText)
}
