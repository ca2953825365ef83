//! Quota-aware search client.
//!
//! Every call goes through the usage ledger: the hard cap is checked before
//! the request and a successful answer is recorded (and persisted) before
//! the result is handed back. Calls that fail are never counted.

use awareness_core::{CountResult, QuotaPolicy, SearchPage, models::timestamp};
use awareness_store::LedgerStore;
use tracing::{debug, instrument, warn};

use crate::api::{ApiResponse, MAX_PAGE_SIZE, SearchApi, SearchQuery};
use crate::error::SearchError;
use crate::parser::{parse_page, parse_total_results};

/// Longest slice of an error body kept in messages and logs.
const MAX_ERROR_BODY: usize = 200;

/// Search client wrapping a [`SearchApi`] with daily quota accounting.
#[derive(Debug)]
pub struct SearchClient<A> {
    api: A,
    ledger: LedgerStore,
    quota: QuotaPolicy,
}

impl<A: SearchApi> SearchClient<A> {
    /// Creates a client over an API and a loaded ledger.
    pub fn new(api: A, ledger: LedgerStore, quota: QuotaPolicy) -> Self {
        Self { api, ledger, quota }
    }

    /// Returns the usage ledger.
    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    /// Returns the quota policy.
    pub fn quota(&self) -> &QuotaPolicy {
        &self.quota
    }

    /// Returns the underlying API.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Free queries left today.
    pub fn remaining_free(&self) -> u64 {
        self.quota.remaining_free(self.ledger.used_today())
    }

    /// Fetches the total-results estimate for a term.
    ///
    /// A non-success status is an error for this term only.
    #[instrument(skip(self))]
    pub async fn fetch_count(&mut self, term: &str) -> Result<CountResult, SearchError> {
        let response = self.call(SearchQuery::new(term, 1, 1)).await?;

        if !response.is_success() {
            let message = truncate(&response.body);
            warn!(status = response.status, body = %message, "Count query failed");
            return Err(SearchError::TransientStatus {
                status: response.status,
                message,
            });
        }

        self.ledger.record(1).await?;
        let total_results = parse_total_results(&response.body)?;
        debug!(total_results, "Count fetched");

        Ok(CountResult {
            total_results,
            fetched_at: timestamp::now(),
        })
    }

    /// Fetches one page of results starting at the 1-based `start_index`.
    ///
    /// A non-success status is logged and yields an empty page, which ends
    /// pagination for the term.
    #[instrument(skip(self))]
    pub async fn fetch_page(
        &mut self,
        term: &str,
        start_index: u32,
        page_size: u32,
    ) -> Result<SearchPage, SearchError> {
        let query = SearchQuery::new(term, page_size, start_index);
        let page_index = (query.start - 1) / MAX_PAGE_SIZE;
        let response = self.call(query).await?;

        if !response.is_success() {
            warn!(
                status = response.status,
                body = %truncate(&response.body),
                "Page query failed, treating as empty"
            );
            return Ok(SearchPage::empty(page_index));
        }

        self.ledger.record(1).await?;
        parse_page(&response.body, page_index)
    }

    async fn call(&self, query: SearchQuery) -> Result<ApiResponse, SearchError> {
        let used = self.ledger.used_today();
        if self.quota.would_exceed_cap(used, 1) {
            warn!(used, cap = self.quota.hard_daily_cap, "Hard daily cap reached");
            return Err(SearchError::QuotaExceeded {
                used,
                cap: self.quota.hard_daily_cap,
            });
        }

        if self.quota.in_paid_tier(used) {
            debug!(used, "Free quota exhausted, this query is billable");
        }

        self.api.execute(&query).await
    }
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
