//! Search result types.
//!
//! These mirror what the search API returns, already normalized:
//! - [`SearchResultItem`] - One organic result
//! - [`SearchPage`] - One page of up to ten results
//! - [`CountResult`] - A total-results estimate for a term

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single search result, taken verbatim from the API response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    /// Result title.
    #[serde(default)]
    pub title: String,
    /// Result snippet.
    #[serde(default)]
    pub snippet: String,
    /// Result URL.
    #[serde(default)]
    pub link: String,
}

impl SearchResultItem {
    /// Creates a new result item.
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            link: link.into(),
        }
    }

    /// Returns the lower-cased text searched for project mentions.
    pub fn searchable_text(&self) -> String {
        format!("{} {} {}", self.title, self.snippet, self.link).to_lowercase()
    }
}

/// One page of results returned by a single API call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    /// Result items in API order.
    pub items: Vec<SearchResultItem>,
    /// Total result estimate reported by the API.
    pub total_results: u64,
    /// Zero-based page index within the term's pagination.
    pub page_index: u32,
}

impl SearchPage {
    /// Creates an explicitly empty page.
    ///
    /// Returned in place of a failed fetch so pagination stops cleanly.
    pub fn empty(page_index: u32) -> Self {
        Self {
            items: Vec::new(),
            total_results: 0,
            page_index,
        }
    }

    /// Returns true if the page carries no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Result of a count-only query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountResult {
    /// Total result estimate reported by the API.
    pub total_results: u64,
    /// When the count was fetched (local time).
    pub fetched_at: NaiveDateTime,
}
