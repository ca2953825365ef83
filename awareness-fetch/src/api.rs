//! Search API boundary.
//!
//! [`SearchApi`] is the single seam between the trackers and the network:
//! one call, one HTTP GET, raw status and body back. The production
//! implementation talks to the Google Custom Search JSON API.

use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::SearchError;
use crate::retry::RetryPolicy;

/// Default search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum results the API returns per call.
pub const MAX_PAGE_SIZE: u32 = 10;

const USER_AGENT: &str = concat!("awareness/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Request / Response
// ============================================================================

/// Parameters of one search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Search term (`q`).
    pub term: String,
    /// Results requested (`num`), at most [`MAX_PAGE_SIZE`].
    pub num: u32,
    /// 1-based offset of the first result (`start`).
    pub start: u32,
}

impl SearchQuery {
    /// Creates a query, clamping `num` to the API's page size.
    pub fn new(term: impl Into<String>, num: u32, start: u32) -> Self {
        Self {
            term: term.into(),
            num: num.clamp(1, MAX_PAGE_SIZE),
            start: start.max(1),
        }
    }
}

/// Raw API answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl ApiResponse {
    /// Returns true for HTTP 200, the only status the API answers with on
    /// success.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

// ============================================================================
// Search API Trait
// ============================================================================

/// Issues a single search request.
///
/// Implementations return every HTTP answer, successful or not, and only
/// fail when no answer was received.
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Executes one query.
    async fn execute(&self, query: &SearchQuery) -> Result<ApiResponse, SearchError>;
}

// ============================================================================
// Google Custom Search
// ============================================================================

/// Google Custom Search JSON API client.
#[derive(Clone)]
pub struct GoogleSearchApi {
    http: Client,
    endpoint: Url,
    api_key: String,
    search_engine_id: String,
    retry: RetryPolicy,
}

impl fmt::Debug for GoogleSearchApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleSearchApi")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"[redacted]")
            .field("search_engine_id", &self.search_engine_id)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl GoogleSearchApi {
    /// Creates a client for the default endpoint.
    pub fn new(
        api_key: impl Into<String>,
        search_engine_id: impl Into<String>,
    ) -> Result<Self, SearchError> {
        Self::with_options(api_key, search_engine_id, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT)
    }

    /// Creates a client for a custom endpoint and request timeout.
    pub fn with_options(
        api_key: impl Into<String>,
        search_engine_id: impl Into<String>,
        endpoint: &str,
        timeout: Duration,
    ) -> Result<Self, SearchError> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| SearchError::InvalidEndpoint(format!("{endpoint}: {e}")))?;

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            endpoint,
            api_key: api_key.into(),
            search_engine_id: search_engine_id.into(),
            retry: RetryPolicy::default(),
        })
    }

    /// Sets the retry policy for transport failures.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Builds the request URL for a query.
    pub fn request_url(&self, query: &SearchQuery) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("cx", &self.search_engine_id)
            .append_pair("q", &query.term)
            .append_pair("num", &query.num.to_string())
            .append_pair("start", &query.start.to_string());
        url
    }
}

#[async_trait]
impl SearchApi for GoogleSearchApi {
    #[instrument(skip(self), fields(term = %query.term, start = query.start, num = query.num))]
    async fn execute(&self, query: &SearchQuery) -> Result<ApiResponse, SearchError> {
        let url = self.request_url(query);
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(attempt, "Search request");

            match self.http.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    let body = response.text().await?;
                    debug!(status, bytes = body.len(), "Response received");
                    return Ok(ApiResponse { status, body });
                }
                Err(e) if self.retry.should_retry(attempt, &e) => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    warn!(
                        error = %e,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
