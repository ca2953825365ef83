//! Rank finder.
//!
//! Scans result items for mentions of tracked project names. A project's
//! rank is the absolute 1-based position of the first item whose title,
//! snippet or link contains the name, compared case-insensitively.
//!
//! Pages are scanned incrementally: the caller passes only the newly
//! fetched items together with the position of the first of them, and the
//! ranks found so far. Already-ranked projects are skipped, so earlier
//! matches always win.

use crate::models::{ProjectRankings, SearchResultItem};

/// Returns rankings with every project unranked, in the given order.
pub fn unranked<S: AsRef<str>>(projects: &[S]) -> ProjectRankings {
    projects.iter().map(|p| (p.as_ref(), None)).collect()
}

/// Returns true if every entry has a rank.
pub fn all_ranked(rankings: &ProjectRankings) -> bool {
    rankings.values().all(Option::is_some)
}

/// Assigns ranks for `projects` found in `items`.
///
/// `first_position` is the 1-based absolute position of `items[0]` across
/// all pages fetched for the term. Ranks already present in `prior` are
/// kept untouched; projects missing from `prior` are added. The input is
/// not modified.
pub fn find_ranks<S: AsRef<str>>(
    items: &[SearchResultItem],
    first_position: u32,
    projects: &[S],
    prior: &ProjectRankings,
) -> ProjectRankings {
    let mut rankings = prior.clone();
    for project in projects {
        if !rankings.contains_key(project.as_ref()) {
            rankings.insert(project.as_ref(), None);
        }
    }

    let mut pending: Vec<(&str, String)> = projects
        .iter()
        .map(AsRef::as_ref)
        .filter(|p| matches!(rankings.get(p), Some(None)))
        .map(|p| (p, p.to_lowercase()))
        .collect();

    let mut position = first_position;
    for item in items {
        if pending.is_empty() {
            break;
        }
        let content = item.searchable_text();
        pending.retain(|(project, needle)| {
            if content.contains(needle.as_str()) {
                rankings.insert(*project, Some(position));
                false
            } else {
                true
            }
        });
        position += 1;
    }

    rankings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, snippet: &str, link: &str) -> SearchResultItem {
        SearchResultItem::new(title, snippet, link)
    }

    fn filler(n: usize) -> Vec<SearchResultItem> {
        (0..n)
            .map(|i| item(&format!("Result {i}"), "Unrelated", "https://example.com"))
            .collect()
    }

    const PROJECTS: [&str; 2] = ["project1", "project2"];

    #[test]
    fn test_no_items_leaves_everything_unranked() {
        let rankings = find_ranks(&[], 1, &PROJECTS, &unranked(&PROJECTS));
        assert_eq!(rankings.get("project1"), Some(&None));
        assert_eq!(rankings.get("project2"), Some(&None));
        assert!(!all_ranked(&rankings));
    }

    #[test]
    fn test_matches_assign_positions() {
        let items = vec![
            item("Project1 Homepage", "About project1", "https://project1.com"),
            item("Random Result", "Not relevant", "https://example.com"),
            item("Project2 Docs", "Documentation for project2", "https://project2.com"),
        ];
        let rankings = find_ranks(&items, 1, &PROJECTS, &unranked(&PROJECTS));
        assert_eq!(rankings.get("project1"), Some(&Some(1)));
        assert_eq!(rankings.get("project2"), Some(&Some(3)));
        assert!(all_ranked(&rankings));
    }

    #[test]
    fn test_partial_matches() {
        let items = vec![
            item("Project1 Homepage", "About project1", "https://project1.com"),
            item("Random Result", "Not relevant", "https://example.com"),
        ];
        let rankings = find_ranks(&items, 1, &PROJECTS, &unranked(&PROJECTS));
        assert_eq!(rankings.get("project1"), Some(&Some(1)));
        assert_eq!(rankings.get("project2"), Some(&None));
    }

    #[test]
    fn test_match_is_case_insensitive_in_every_field() {
        let projects = ["Alpha", "beta", "GAMMA"];
        let items = vec![
            item("ALPHA release notes", "", ""),
            item("", "a BeTa client", ""),
            item("", "", "https://gamma.dev/docs"),
        ];
        let rankings = find_ranks(&items, 1, &projects, &unranked(&projects));
        assert_eq!(rankings.get("Alpha"), Some(&Some(1)));
        assert_eq!(rankings.get("beta"), Some(&Some(2)));
        assert_eq!(rankings.get("GAMMA"), Some(&Some(3)));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let items = vec![
            item("nothing here", "", ""),
            item("project1 first", "", ""),
            item("project1 again", "", ""),
        ];
        let rankings = find_ranks(&items, 1, &PROJECTS, &unranked(&PROJECTS));
        assert_eq!(rankings.get("project1"), Some(&Some(2)));
    }

    #[test]
    fn test_positions_continue_from_offset() {
        let mut second_page = filler(4);
        second_page.push(item("project2 found late", "", ""));

        let mut prior = unranked(&PROJECTS);
        prior.insert("project1", Some(1));

        let rankings = find_ranks(&second_page, 11, &PROJECTS, &prior);
        assert_eq!(rankings.get("project1"), Some(&Some(1)));
        assert_eq!(rankings.get("project2"), Some(&Some(15)));
    }

    #[test]
    fn test_prior_ranks_are_never_overwritten() {
        let mut prior = unranked(&PROJECTS);
        prior.insert("project1", Some(7));

        let items = vec![item("project1 at the top", "", "")];
        let rankings = find_ranks(&items, 1, &PROJECTS, &prior);
        assert_eq!(rankings.get("project1"), Some(&Some(7)));
    }

    #[test]
    fn test_input_rankings_are_not_mutated() {
        let prior = unranked(&PROJECTS);
        let items = vec![item("project1", "", "")];
        let _ = find_ranks(&items, 1, &PROJECTS, &prior);
        assert_eq!(prior, unranked(&PROJECTS));
    }

    #[test]
    fn test_repeated_scans_never_downgrade_ranks() {
        let mut items = filler(3);
        items.push(item("project1", "", ""));
        items.extend(filler(2));
        items.push(item("", "project2 and project1", ""));

        let first = find_ranks(&items, 1, &PROJECTS, &unranked(&PROJECTS));

        for len in 0..=items.len() {
            let again = find_ranks(&items[..len], 1, &PROJECTS, &first);
            assert_eq!(again, first, "rescanning {len} items changed ranks");
        }

        let mut superset = items.clone();
        superset.insert(0, item("project2 early", "", ""));
        let again = find_ranks(&superset, 1, &PROJECTS, &first);
        assert_eq!(again, first);
    }

    #[test]
    fn test_projects_missing_from_prior_are_added() {
        let rankings = find_ranks(&[item("project2", "", "")], 1, &PROJECTS, &ProjectRankings::new());
        let keys: Vec<_> = rankings.keys().collect();
        assert_eq!(keys, vec!["project1", "project2"]);
        assert_eq!(rankings.get("project2"), Some(&Some(1)));
    }
}
