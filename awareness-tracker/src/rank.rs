//! Paginated rank tracker.
//!
//! For each term, pages are fetched at offsets 1, 11, 21, ... and only the
//! newly fetched items are scanned, with positions continuing across pages.
//! A term stops paginating as soon as every project has a rank, the
//! requested result count has been scanned, or a page comes back empty.

use awareness_core::{
    CostConfirmation, ProjectRankings, RankReport, all_ranked, find_ranks, models::timestamp,
    unranked,
};
use awareness_fetch::{GoogleSearchApi, SearchApi, SearchClient, SearchError};
use chrono::NaiveDateTime;
use tracing::{debug, info, instrument, warn};

use crate::batch::{BatchOutcome, approve_cost};
use crate::config::{MAX_PAGES, PAGE_SIZE, TrackerConfig};
use crate::error::{TermProcessingError, TrackerError};
use crate::pacer::RequestPacer;

/// Tracks the rank of each project in the search results of each term.
#[derive(Debug)]
pub struct RankTracker<A> {
    client: SearchClient<A>,
    projects: Vec<String>,
    max_results: u32,
    max_pages: u32,
    pacer: RequestPacer,
}

impl RankTracker<GoogleSearchApi> {
    /// Builds a tracker against the production search API.
    pub async fn connect(config: &TrackerConfig) -> Result<Self, TrackerError> {
        let api = config.search_api()?;
        Self::with_api(api, config).await
    }
}

impl<A: SearchApi> RankTracker<A> {
    /// Builds a tracker over any [`SearchApi`], loading the configured
    /// ledger.
    pub async fn with_api(api: A, config: &TrackerConfig) -> Result<Self, TrackerError> {
        let ledger = config.load_ledger().await;
        Self::new(SearchClient::new(api, ledger, *config.quota()), config)
    }

    /// Builds a tracker over an existing client.
    pub fn new(client: SearchClient<A>, config: &TrackerConfig) -> Result<Self, TrackerError> {
        if config.projects().is_empty() {
            return Err(TrackerError::Config(
                "at least one project is required to track ranks".to_string(),
            ));
        }

        Ok(Self {
            client,
            projects: config.projects().to_vec(),
            max_results: config.max_results_per_term(),
            max_pages: config.max_pages(),
            pacer: RequestPacer::new(config.request_delay()),
        })
    }

    /// Returns the search client.
    pub fn client(&self) -> &SearchClient<A> {
        &self.client
    }

    /// Returns the tracked projects.
    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    /// Runs a batch of terms.
    ///
    /// The cost estimate assumes every term needs [`MAX_PAGES`] pages,
    /// however few results are requested. Returns `Ok(None)` if the cost
    /// confirmation was declined. Terms that fail are listed in
    /// [`BatchOutcome::failures`]; the hard cap and ledger persistence stop
    /// the batch and are reported in [`BatchOutcome::interrupted`] next to
    /// the reports gathered so far.
    pub async fn run<S: AsRef<str>>(
        &mut self,
        terms: &[S],
        confirm: &mut dyn CostConfirmation,
    ) -> Result<Option<BatchOutcome<RankReport>>, TrackerError> {
        let used = self.client.ledger().used_today();
        let worst_case = u64::from(MAX_PAGES) * terms.len() as u64;
        if !approve_cost(self.client.quota(), used, worst_case, confirm) {
            return Ok(None);
        }

        info!(
            terms = terms.len(),
            projects = self.projects.len(),
            max_results = self.max_results,
            "Starting rank batch"
        );

        let timestamp = timestamp::now();
        let mut outcome = BatchOutcome::new();

        for term in terms {
            let term = term.as_ref();
            match self.track_term(term, timestamp).await {
                Ok(report) => {
                    info!(
                        term,
                        ranked = report.ranked_count(),
                        total_results = report.total_results,
                        "Term ranked"
                    );
                    outcome.results.insert(term, report);
                }
                Err(e) if e.is_fatal() => {
                    warn!(term, error = %e, ranked = outcome.results.len(), "Batch interrupted");
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
            ranked = outcome.results.len(),
            skipped = outcome.failures.len(),
            used_today = self.client.ledger().used_today(),
            "Rank batch finished"
        );
        Ok(Some(outcome))
    }

    /// Fetches and scans pages for one term.
    #[instrument(skip(self, timestamp))]
    pub async fn track_term(
        &mut self,
        term: &str,
        timestamp: NaiveDateTime,
    ) -> Result<RankReport, SearchError> {
        let mut rankings: ProjectRankings = unranked(&self.projects);
        let mut total_results = 0;
        let mut scanned: u32 = 0;

        for page_index in 0..self.max_pages {
            let remaining = self.max_results - scanned;
            let start = page_index * PAGE_SIZE + 1;

            self.pacer.wait().await;
            let page = self
                .client
                .fetch_page(term, start, remaining.min(PAGE_SIZE))
                .await?;

            if page_index == 0 {
                total_results = page.total_results;
            }
            if page.is_empty() {
                debug!(page_index, "Empty page, no more results");
                break;
            }

            let take = page.items.len().min(remaining as usize);
            rankings = find_ranks(&page.items[..take], scanned + 1, &self.projects, &rankings);
            scanned += u32::try_from(take).unwrap_or(remaining);

            debug!(page_index, scanned, "Page scanned");

            if all_ranked(&rankings) {
                debug!(page_index, "All projects ranked");
                break;
            }
            if scanned >= self.max_results {
                break;
            }
        }

        Ok(RankReport {
            total_results,
            project_rankings: rankings,
            timestamp,
        })
    }
}
