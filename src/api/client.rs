//! API client for the random-user data source.
//!
//! This module provides the `ApiClient` struct for fetching one page of raw
//! user records per request, plus the `FetchUsers` trait that decouples the
//! orchestrator from the real transport.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::models::ApiResult;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// A 5000-record page is a large payload; 30s covers slow responses while
/// still failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Transport seam for fetching a page of users.
///
/// The orchestrator only needs this one operation; tests implement it with a
/// counting stub instead of a live HTTP client.
pub trait FetchUsers {
    fn fetch_page(&self, page: u32) -> impl Future<Output = Result<ApiResult, ApiError>> + Send;
}

/// HTTP client for the paginated user API.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    seed: String,
    results_per_page: u32,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// The seed is sent with every request so the upstream source returns a
    /// deterministic record sequence for a given page number.
    pub fn new(base_url: &str, seed: &str, results_per_page: u32) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            seed: seed.to_string(),
            results_per_page,
        })
    }

    fn page_url(&self, page: u32) -> String {
        format!(
            "{}?results={}&seed={}&page={}",
            self.base_url, self.results_per_page, self.seed, page
        )
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }
}

impl FetchUsers for ApiClient {
    async fn fetch_page(&self, page: u32) -> Result<ApiResult, ApiError> {
        if page == 0 {
            return Err(ApiError::InvalidPage(page));
        }

        let url = self.page_url(page);
        debug!(page, %url, "fetching user page");

        let response = self.client.get(&url).send().await?;
        let response = Self::check_response(response).await?;

        let result: ApiResult = response.json().await?;
        debug!(page, records = result.results.len(), "page fetched");
        Ok(result)
    }
}
