//! Count-only tracker: one total-results query per term.

use awareness_core::{CostConfirmation, CountReport, models::timestamp};
use awareness_fetch::{GoogleSearchApi, SearchApi, SearchClient, SearchError};
use tracing::{info, warn};

use crate::batch::{BatchOutcome, approve_cost};
use crate::config::TrackerConfig;
use crate::error::{TermProcessingError, TrackerError};
use crate::pacer::RequestPacer;

/// Records the total result count of each term.
#[derive(Debug)]
pub struct CountTracker<A> {
    client: SearchClient<A>,
    pacer: RequestPacer,
}

impl CountTracker<GoogleSearchApi> {
    /// Builds a tracker against the production search API.
    pub async fn connect(config: &TrackerConfig) -> Result<Self, TrackerError> {
        let api = config.search_api()?;
        Ok(Self::with_api(api, config).await)
    }
}

impl<A: SearchApi> CountTracker<A> {
    /// Builds a tracker over any [`SearchApi`], loading the configured
    /// ledger.
    pub async fn with_api(api: A, config: &TrackerConfig) -> Self {
        let ledger = config.load_ledger().await;
        Self::new(SearchClient::new(api, ledger, *config.quota()), config)
    }

    /// Builds a tracker over an existing client.
    pub fn new(client: SearchClient<A>, config: &TrackerConfig) -> Self {
        Self {
            client,
            pacer: RequestPacer::new(config.request_delay()),
        }
    }

    /// Returns the search client.
    pub fn client(&self) -> &SearchClient<A> {
        &self.client
    }

    /// Runs a batch of terms.
    ///
    /// Fails up front if the batch would pass the hard daily cap, and
    /// returns `Ok(None)` if the cost confirmation was declined. A ledger
    /// failure mid-batch stops it and is reported in
    /// [`BatchOutcome::interrupted`].
    pub async fn run<S: AsRef<str>>(
        &mut self,
        terms: &[S],
        confirm: &mut dyn CostConfirmation,
    ) -> Result<Option<BatchOutcome<CountReport>>, TrackerError> {
        let used = self.client.ledger().used_today();
        let quota = *self.client.quota();
        let total = terms.len() as u64;

        if quota.would_exceed_cap(used, total) {
            warn!(used, requested = total, cap = quota.hard_daily_cap, "Batch would pass the hard daily cap");
            return Err(SearchError::QuotaExceeded {
                used,
                cap: quota.hard_daily_cap,
            }
            .into());
        }
        if !approve_cost(&quota, used, total, confirm) {
            return Ok(None);
        }

        info!(terms = terms.len(), "Starting count batch");

        let timestamp = timestamp::now();
        let mut outcome = BatchOutcome::new();

        for term in terms {
            let term = term.as_ref();
            self.pacer.wait().await;

            match self.client.fetch_count(term).await {
                Ok(result) => {
                    info!(term, count = result.total_results, "Term counted");
                    outcome.results.insert(
                        term,
                        CountReport {
                            count: result.total_results,
                            timestamp,
                        },
                    );
                }
                Err(e) if e.is_fatal() => {
                    warn!(term, error = %e, counted = outcome.results.len(), "Batch interrupted");
                    outcome.interrupted = Some(e);
                    break;
                }
                Err(e) => {
                    warn!(term, error = %e, "Skipping term");
                    outcome.failures.push(TermProcessingError {
                        term: term.to_string(),
                        source: e,
                    });
                }
            }
        }

        info!(
            counted = outcome.results.len(),
            skipped = outcome.failures.len(),
            used_today = self.client.ledger().used_today(),
            "Count batch finished"
        );
        Ok(Some(outcome))
    }
}
