//! HTTP client for the income statement backend.
//!
//! Wraps the two endpoints the viewer uses: the full listing fetched once at
//! startup and the filtered, server-sorted listing.

use crate::backend::models::IncomeStatement;
use crate::backend::query::FilterQuery;
use crate::config::Config;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Path of the unfiltered listing.
pub const INCOME_STATEMENT_PATH: &str = "/get_income-statement";

/// Path of the filtered listing.
pub const FILTER_PATH: &str = "/filter";

/// Errors from talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// No usable base URL was configured.
    #[error("invalid backend URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The request never produced a response.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The backend answered with a non-success status.
    #[error("HTTP error {status} from {url}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    /// The response body was not a list of income statements.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Income statement backend client.
#[derive(Debug, Clone)]
pub struct BackendClient {
    /// HTTP client for API requests
    client: Client,
    /// Base URL without trailing slash
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client from configuration.
    ///
    /// # Arguments
    /// * `config` - Application configuration
    ///
    /// # Returns
    /// * `Result<BackendClient, BackendError>` - New client or error
    ///
    /// # Details
    /// The base URL must be an absolute `http` or `https` URL. A timeout is
    /// applied only when `request_timeout_secs` is configured.
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        let base_url = config
            .backend_base_url()
            .ok_or_else(|| BackendError::InvalidUrl {
                url: config.backend_url.clone(),
                reason: "no backend URL configured".to_string(),
            })?;

        let parsed = Url::parse(&base_url).map_err(|e| BackendError::InvalidUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(BackendError::InvalidUrl {
                url: base_url,
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(BackendError::Client)?;

        Ok(Self { client, base_url })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every income statement.
    ///
    /// # Returns
    /// * `Result<Vec<IncomeStatement>, BackendError>` - Rows in backend order
    pub async fn fetch_income_statements(&self) -> Result<Vec<IncomeStatement>, BackendError> {
        self.get_rows(INCOME_STATEMENT_PATH, &[]).await
    }

    /// Fetch income statements matching `query`, sorted by the backend.
    ///
    /// # Arguments
    /// * `query` - Filter bounds and sort spec
    ///
    /// # Returns
    /// * `Result<Vec<IncomeStatement>, BackendError>` - Rows in backend order
    pub async fn fetch_filtered(
        &self,
        query: &FilterQuery,
    ) -> Result<Vec<IncomeStatement>, BackendError> {
        self.get_rows(FILTER_PATH, query.params()).await
    }

    /// Issue a GET and decode the body as a list of rows.
    async fn get_rows(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<Vec<IncomeStatement>, BackendError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, params = params.len(), "sending request");

        let mut request = self.client.get(&url);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request
            .send()
            .await
            .map_err(|source| BackendError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status { url, status, body });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| BackendError::Transport {
                url: url.clone(),
                source,
            })?;

        let rows: Vec<IncomeStatement> =
            serde_json::from_slice(&bytes).map_err(|source| BackendError::Decode {
                url: url.clone(),
                source,
            })?;

        debug!(%url, rows = rows.len(), "received rows");
        Ok(rows)
    }
}
