//! Search API response parser.
//!
//! The API reports `searchInformation.totalResults` as a string-encoded
//! integer and omits `items` entirely when a page has no results.

use awareness_core::{SearchPage, SearchResultItem};
use serde::Deserialize;
use tracing::debug;

use crate::error::SearchError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSearchResponse {
    #[serde(default)]
    search_information: Option<RawSearchInformation>,
    #[serde(default)]
    items: Vec<SearchResultItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSearchInformation {
    #[serde(default)]
    total_results: Option<String>,
}

fn parse_body(body: &str) -> Result<RawSearchResponse, SearchError> {
    serde_json::from_str(body).map_err(|e| SearchError::InvalidResponse(format!("Invalid JSON: {e}")))
}

fn parse_total(raw: &str) -> Result<u64, SearchError> {
    raw.trim()
        .parse()
        .map_err(|_| SearchError::InvalidResponse(format!("Invalid totalResults: '{raw}'")))
}

/// Extracts the total result estimate from a count query.
///
/// The field is required here: a body without it cannot answer the query.
pub fn parse_total_results(body: &str) -> Result<u64, SearchError> {
    let response = parse_body(body)?;
    let raw = response
        .search_information
        .and_then(|info| info.total_results)
        .ok_or_else(|| {
            SearchError::InvalidResponse("Missing searchInformation.totalResults".to_string())
        })?;
    parse_total(&raw)
}

/// Parses one page of results.
///
/// A missing `items` array is an empty page and a missing total counts as
/// zero.
pub fn parse_page(body: &str, page_index: u32) -> Result<SearchPage, SearchError> {
    let response = parse_body(body)?;
    let total_results = match response.search_information.and_then(|i| i.total_results) {
        Some(raw) => parse_total(&raw)?,
        None => 0,
    };

    debug!(page_index, items = response.items.len(), total_results, "Parsed search page");

    Ok(SearchPage {
        items: response.items,
        total_results,
        page_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_total_results() {
        let body = r#"{"searchInformation": {"totalResults": "12345", "searchTime": 0.2}}"#;
        assert_eq!(parse_total_results(body).unwrap(), 12_345);
    }

    #[test]
    fn test_parse_total_results_zero_results_is_ok() {
        let body = r#"{"searchInformation": {"totalResults": "0"}}"#;
        assert_eq!(parse_total_results(body).unwrap(), 0);
    }

    #[test]
    fn test_parse_total_results_missing() {
        assert!(matches!(
            parse_total_results("{}"),
            Err(SearchError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_total_results_not_a_number() {
        let body = r#"{"searchInformation": {"totalResults": "lots"}}"#;
        assert!(parse_total_results(body).is_err());
    }

    #[test]
    fn test_parse_page_with_items() {
        let body = r#"{
            "kind": "customsearch#search",
            "searchInformation": {"totalResults": "987"},
            "items": [
                {"title": "Project1 - Best Framework", "snippet": "Description of project1", "link": "https://project1.com", "displayLink": "project1.com"},
                {"title": "Untitled", "link": "https://example.com"}
            ]
        }"#;
        let page = parse_page(body, 2).unwrap();
        assert_eq!(page.total_results, 987);
        assert_eq!(page.page_index, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].title, "Project1 - Best Framework");
        assert_eq!(page.items[1].snippet, "");
    }

    #[test]
    fn test_parse_page_without_items() {
        let body = r#"{"searchInformation": {"totalResults": "0"}}"#;
        let page = parse_page(body, 0).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_results, 0);
    }

    #[test]
    fn test_parse_page_invalid_json() {
        assert!(matches!(
            parse_page("<html>", 0),
            Err(SearchError::InvalidResponse(_))
        ));
    }
}
