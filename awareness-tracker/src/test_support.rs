//! Scripted search API for tracker tests.

use async_trait::async_trait;
use awareness_core::QuotaPolicy;
use awareness_fetch::{ApiResponse, SearchApi, SearchError, SearchQuery};
use serde_json::json;
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::Instant;

use crate::config::{TrackerConfig, TrackerConfigBuilder};

type Responder = Box<dyn Fn(&SearchQuery) -> Result<ApiResponse, SearchError> + Send + Sync>;

/// API double that answers through a closure and logs every query.
pub struct ScriptedApi {
    responder: Responder,
    calls: Mutex<Vec<SearchQuery>>,
    issued_at: Mutex<Vec<Instant>>,
}

impl ScriptedApi {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&SearchQuery) -> Result<ApiResponse, SearchError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::default(),
            issued_at: Mutex::default(),
        }
    }

    /// Every term gets up to 100 filler results; each `(position, text)`
    /// pair puts `text` in the title of that absolute position.
    pub fn with_mentions(total: u64, mentions: &[(u32, &str)]) -> Self {
        let mentions: Vec<(u32, String)> =
            mentions.iter().map(|(p, t)| (*p, (*t).to_string())).collect();
        Self::new(move |query| Ok(ok(results_page(total, query, &mentions))))
    }

    pub fn calls(&self) -> Vec<SearchQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub fn starts(&self) -> Vec<u32> {
        self.calls().iter().map(|q| q.start).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Offsets of every call from `origin`.
    pub fn call_offsets(&self, origin: Instant) -> Vec<Duration> {
        self.issued_at
            .lock()
            .unwrap()
            .iter()
            .map(|at| at.duration_since(origin))
            .collect()
    }
}

#[async_trait]
impl SearchApi for ScriptedApi {
    async fn execute(&self, query: &SearchQuery) -> Result<ApiResponse, SearchError> {
        self.calls.lock().unwrap().push(query.clone());
        self.issued_at.lock().unwrap().push(Instant::now());
        (self.responder)(query)
    }
}

pub fn ok(body: String) -> ApiResponse {
    ApiResponse { status: 200, body }
}

pub fn status(code: u16) -> ApiResponse {
    ApiResponse {
        status: code,
        body: r#"{"error": {"code": 403, "message": "Daily Limit Exceeded"}}"#.to_string(),
    }
}

/// Builds the page answering `query` out of a 100-result listing.
pub fn results_page(total: u64, query: &SearchQuery, mentions: &[(u32, String)]) -> String {
    let items: Vec<_> = (query.start..query.start + query.num)
        .filter(|position| *position <= 100)
        .map(|position| item(position, mentions))
        .collect();
    page_body(total, items)
}

/// A full 10-item page regardless of the requested `num`.
pub fn full_page(total: u64, start: u32, mentions: &[(u32, String)]) -> String {
    let items: Vec<_> = (start..start + 10).map(|position| item(position, mentions)).collect();
    page_body(total, items)
}

fn item(position: u32, mentions: &[(u32, String)]) -> serde_json::Value {
    let title = mentions
        .iter()
        .find(|(p, _)| *p == position)
        .map_or_else(|| format!("Result number {position}"), |(_, text)| format!("{text} homepage"));
    json!({
        "title": title,
        "snippet": "An unrelated snippet",
        "link": format!("https://example.org/{position}"),
    })
}

fn page_body(total: u64, items: Vec<serde_json::Value>) -> String {
    let mut body = json!({
        "searchInformation": {"totalResults": total.to_string()},
    });
    if !items.is_empty() {
        body["items"] = serde_json::Value::Array(items);
    }
    body.to_string()
}

pub fn count_body(total: u64) -> String {
    json!({"searchInformation": {"totalResults": total.to_string()}}).to_string()
}

fn builder(dir: &TempDir, projects: &[&str], max_results: u32) -> TrackerConfigBuilder {
    TrackerConfig::builder("test-key", "test-cx")
        .projects(projects)
        .max_results_per_term(max_results)
        .ledger_path(dir.path().join("api_usage.json"))
        .request_delay(Duration::ZERO)
}

/// Config with no pacing and its own ledger.
pub fn config(dir: &TempDir, projects: &[&str], max_results: u32) -> TrackerConfig {
    builder(dir, projects, max_results).build().unwrap()
}

pub fn config_with_quota(
    dir: &TempDir,
    projects: &[&str],
    max_results: u32,
    quota: QuotaPolicy,
) -> TrackerConfig {
    builder(dir, projects, max_results).quota(quota).build().unwrap()
}

pub fn paced_config(
    dir: &TempDir,
    projects: &[&str],
    max_results: u32,
    delay: Duration,
) -> TrackerConfig {
    builder(dir, projects, max_results)
        .request_delay(delay)
        .build()
        .unwrap()
}

/// Config whose ledger sits under a regular file, so it can never be saved.
pub fn unsavable_ledger_config(dir: &TempDir, projects: &[&str], max_results: u32) -> TrackerConfig {
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, "file").unwrap();
    builder(dir, projects, max_results)
        .ledger_path(blocker.join("api_usage.json"))
        .build()
        .unwrap()
}
