//! HTTP client for the canonical menu endpoint.
//!
//! This module provides the `ApiClient` struct for fetching the menu list.
//! There is no authentication and no pagination; the whole list comes back
//! as one JSON array.

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

use crate::models::MenuItem;

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the remote menu endpoint.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    /// Create a new API client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client })
    }

    /// Fetch the canonical menu list.
    ///
    /// One best-effort GET: a failure here is logged by the caller and the
    /// in-memory list is left as it was. There is no retry.
    pub async fn fetch_menu(&self, url: &str) -> Result<Vec<MenuItem>> {
        debug!(url, "Fetching menu");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;

        let items: Vec<MenuItem> = response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))?;

        debug!(count = items.len(), "Fetched menu");
        Ok(items)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }
}
