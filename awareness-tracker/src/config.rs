//! Tracker configuration.
//!
//! Every runtime knob is passed explicitly, including the ledger path, so
//! independent trackers never share state through globals.

use awareness_core::QuotaPolicy;
use awareness_fetch::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, GoogleSearchApi, SearchError};
use awareness_store::{LedgerStore, default_ledger_path, mask_secret};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::TrackerError;
use crate::pacer::DEFAULT_REQUEST_DELAY;

/// Results returned by one API call.
pub const PAGE_SIZE: u32 = 10;

/// Pages fetched per term at most.
pub const MAX_PAGES: u32 = 10;

/// Results scanned per term at most.
pub const MAX_RESULTS_PER_TERM: u32 = PAGE_SIZE * MAX_PAGES;

// ============================================================================
// Tracker Config
// ============================================================================

/// Configuration shared by the count and rank trackers.
#[derive(Clone)]
pub struct TrackerConfig {
    api_key: String,
    search_engine_id: String,
    projects: Vec<String>,
    max_results_per_term: u32,
    quota: QuotaPolicy,
    ledger_path: PathBuf,
    request_delay: Duration,
    endpoint: String,
    request_timeout: Duration,
}

impl TrackerConfig {
    /// Starts a builder with the two required credentials.
    pub fn builder(
        api_key: impl Into<String>,
        search_engine_id: impl Into<String>,
    ) -> TrackerConfigBuilder {
        TrackerConfigBuilder::new(api_key, search_engine_id)
    }

    /// Search API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Search engine id (`cx`).
    pub fn search_engine_id(&self) -> &str {
        &self.search_engine_id
    }

    /// Tracked projects, in order, without duplicates.
    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    /// Results scanned per term, never more than [`MAX_RESULTS_PER_TERM`].
    pub fn max_results_per_term(&self) -> u32 {
        self.max_results_per_term
    }

    /// Quota limits and pricing.
    pub fn quota(&self) -> &QuotaPolicy {
        &self.quota
    }

    /// Usage ledger location.
    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    /// Minimum delay between API calls.
    pub fn request_delay(&self) -> Duration {
        self.request_delay
    }

    /// Search API endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Pages fetched per term at most.
    pub fn max_pages(&self) -> u32 {
        self.max_results_per_term.div_ceil(PAGE_SIZE).min(MAX_PAGES)
    }

    /// Builds the production search API for this configuration.
    pub fn search_api(&self) -> Result<GoogleSearchApi, SearchError> {
        GoogleSearchApi::with_options(
            &self.api_key,
            &self.search_engine_id,
            &self.endpoint,
            self.request_timeout,
        )
    }

    /// Loads the usage ledger at the configured path.
    pub async fn load_ledger(&self) -> LedgerStore {
        LedgerStore::load(&self.ledger_path).await
    }
}

impl fmt::Debug for TrackerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerConfig")
            .field("api_key", &mask_secret(&self.api_key))
            .field("search_engine_id", &self.search_engine_id)
            .field("projects", &self.projects)
            .field("max_results_per_term", &self.max_results_per_term)
            .field("quota", &self.quota)
            .field("ledger_path", &self.ledger_path)
            .field("request_delay", &self.request_delay)
            .field("endpoint", &self.endpoint)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`TrackerConfig`].
#[derive(Debug, Clone)]
pub struct TrackerConfigBuilder {
    api_key: String,
    search_engine_id: String,
    projects: Vec<String>,
    max_results_per_term: u32,
    quota: QuotaPolicy,
    ledger_path: Option<PathBuf>,
    request_delay: Duration,
    endpoint: String,
    request_timeout: Duration,
}

impl TrackerConfigBuilder {
    fn new(api_key: impl Into<String>, search_engine_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            search_engine_id: search_engine_id.into(),
            projects: Vec::new(),
            max_results_per_term: MAX_RESULTS_PER_TERM,
            quota: QuotaPolicy::default(),
            ledger_path: None,
            request_delay: DEFAULT_REQUEST_DELAY,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the tracked projects.
    ///
    /// Names are trimmed; blanks and repeats are dropped, first one wins.
    pub fn projects<I, S>(mut self, projects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.projects.clear();
        for project in projects {
            let project = project.as_ref().trim();
            if !project.is_empty() && !self.projects.iter().any(|p| p == project) {
                self.projects.push(project.to_string());
            }
        }
        self
    }

    /// Sets the results to scan per term, capped at [`MAX_RESULTS_PER_TERM`].
    pub fn max_results_per_term(mut self, max: u32) -> Self {
        self.max_results_per_term = max.min(MAX_RESULTS_PER_TERM);
        self
    }

    /// Sets the quota policy.
    pub fn quota(mut self, quota: QuotaPolicy) -> Self {
        self.quota = quota;
        self
    }

    /// Sets the ledger path.
    pub fn ledger_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ledger_path = Some(path.into());
        self
    }

    /// Sets the minimum delay between API calls.
    pub fn request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Sets the API endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Validates and builds the configuration.
    pub fn build(self) -> Result<TrackerConfig, TrackerError> {
        let api_key = self.api_key.trim().to_string();
        let search_engine_id = self.search_engine_id.trim().to_string();

        if api_key.is_empty() {
            return Err(TrackerError::Config("API key is empty".to_string()));
        }
        if search_engine_id.is_empty() {
            return Err(TrackerError::Config("search engine id is empty".to_string()));
        }
        if self.max_results_per_term == 0 {
            return Err(TrackerError::Config(
                "results per term must be at least 1".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(TrackerError::Config("request timeout must be positive".to_string()));
        }
        Url::parse(&self.endpoint)
            .map_err(|e| TrackerError::Config(format!("invalid endpoint '{}': {e}", self.endpoint)))?;
        self.quota.validate()?;

        Ok(TrackerConfig {
            api_key,
            search_engine_id,
            projects: self.projects,
            max_results_per_term: self.max_results_per_term,
            quota: self.quota,
            ledger_path: self.ledger_path.unwrap_or_else(default_ledger_path),
            request_delay: self.request_delay,
            endpoint: self.endpoint,
            request_timeout: self.request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::builder("key", "cx").build().unwrap();
        assert_eq!(config.max_results_per_term(), 100);
        assert_eq!(config.max_pages(), 10);
        assert_eq!(config.request_delay(), Duration::from_secs(1));
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.quota(), &QuotaPolicy::default());
        assert!(config.ledger_path().ends_with("api_usage.json"));
    }

    #[test]
    fn test_projects_are_ordered_and_deduplicated() {
        let config = TrackerConfig::builder("key", "cx")
            .projects(["beta", " alpha ", "", "beta", "gamma"])
            .build()
            .unwrap();
        assert_eq!(config.projects(), ["beta", "alpha", "gamma"]);
    }

    #[test]
    fn test_max_results_is_capped() {
        let config = TrackerConfig::builder("key", "cx")
            .max_results_per_term(250)
            .build()
            .unwrap();
        assert_eq!(config.max_results_per_term(), 100);
        assert_eq!(config.max_pages(), 10);
    }

    #[test]
    fn test_max_pages_rounds_up() {
        let pages = |n| {
            TrackerConfig::builder("key", "cx")
                .max_results_per_term(n)
                .build()
                .unwrap()
                .max_pages()
        };
        assert_eq!(pages(1), 1);
        assert_eq!(pages(10), 1);
        assert_eq!(pages(15), 2);
        assert_eq!(pages(50), 5);
        assert_eq!(pages(91), 10);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(TrackerConfig::builder("  ", "cx").build().is_err());
        assert!(TrackerConfig::builder("key", "").build().is_err());
        assert!(
            TrackerConfig::builder("key", "cx")
                .max_results_per_term(0)
                .build()
                .is_err()
        );
        assert!(
            TrackerConfig::builder("key", "cx")
                .endpoint("not a url")
                .build()
                .is_err()
        );
        let quota = QuotaPolicy {
            daily_free_quota: 200,
            hard_daily_cap: 100,
            ..QuotaPolicy::default()
        };
        assert!(matches!(
            TrackerConfig::builder("key", "cx").quota(quota).build(),
            Err(TrackerError::Core(_))
        ));
    }

    #[test]
    fn test_debug_masks_api_key() {
        let config = TrackerConfig::builder("AIzaSecretValue9876", "cx").build().unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("AIzaSecretValue"));
        assert!(debug.contains("9876"));
    }
}
