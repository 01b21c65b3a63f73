//! State of the class search view.
//!
//! The view owns one [`SearchState`] and folds every [`SearchUpdate`] into the
//! latest value. Responses from superseded requests are dropped by the caller
//! before they become updates.

use crate::client::ClassSearchPage;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub results: ClassSearchPage,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchUpdate {
    /// The query went blank; nothing is in flight any more.
    Cleared,
    Started,
    /// Page `page` of the current query arrived. Pages after the first append.
    Loaded { page: u32, found: ClassSearchPage },
    Failed(String),
}

impl SearchState {
    pub fn apply(&self, update: SearchUpdate) -> Self {
        match update {
            SearchUpdate::Cleared => SearchState::default(),
            SearchUpdate::Started => SearchState {
                loading: true,
                error: None,
                ..self.clone()
            },
            SearchUpdate::Loaded { page, found } => {
                let results = if page > 0 {
                    let mut merged = self.results.clone();
                    merged.classes.extend(found.classes);
                    merged.page = found.page;
                    merged
                } else {
                    found
                };
                SearchState {
                    results,
                    loading: false,
                    error: None,
                }
            }
            SearchUpdate::Failed(message) => SearchState {
                results: ClassSearchPage::default(),
                loading: false,
                error: Some(message),
            },
        }
    }

    /// Whether to show the "no classes found" line for `query`.
    pub fn is_empty_result(&self, query: &str) -> bool {
        self.results.classes.is_empty()
            && !self.loading
            && self.error.is_none()
            && !query.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::PageInfo;
    use crate::models::ClassInfo;
    use serde_json::json;

    fn page(ids: &[i64], number: u32, total_pages: u32) -> ClassSearchPage {
        ClassSearchPage {
            classes: ids
                .iter()
                .map(|id| {
                    serde_json::from_value::<ClassInfo>(json!({"id": id, "name": format!("C{id}")}))
                        .unwrap()
                })
                .collect(),
            page: PageInfo {
                number,
                total_pages,
                total_elements: 0,
            },
        }
    }

    #[test]
    fn test_clearing_during_a_search_stops_loading() {
        let state = SearchState::default().apply(SearchUpdate::Started);
        assert!(state.loading);
        // The in-flight reply is discarded by its generation, so nothing else arrives
        let state = state.apply(SearchUpdate::Cleared);
        assert!(!state.loading);
        assert!(state.results.classes.is_empty());
        assert!(!state.is_empty_result(""));
    }

    #[test]
    fn test_load_more_appends_and_first_page_replaces() {
        let state = SearchState::default()
            .apply(SearchUpdate::Started)
            .apply(SearchUpdate::Loaded { page: 0, found: page(&[1, 2], 0, 2) });
        assert!(state.results.has_more());

        let state = state
            .apply(SearchUpdate::Started)
            .apply(SearchUpdate::Loaded { page: 1, found: page(&[3], 1, 2) });
        let ids: Vec<i64> = state.results.classes.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(!state.results.has_more());
        assert!(!state.loading);

        let state = state.apply(SearchUpdate::Loaded { page: 0, found: page(&[9], 0, 1) });
        assert_eq!(state.results.classes.len(), 1);
    }

    #[test]
    fn test_failure_clears_results() {
        let state = SearchState::default()
            .apply(SearchUpdate::Loaded { page: 0, found: page(&[1], 0, 1) })
            .apply(SearchUpdate::Started)
            .apply(SearchUpdate::Failed("Search failed".into()));
        assert!(state.results.classes.is_empty());
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Search failed"));
        assert!(!state.is_empty_result("math"));

        let state = state.apply(SearchUpdate::Loaded { page: 0, found: page(&[], 0, 0) });
        assert!(state.is_empty_result("math"));
    }
}
