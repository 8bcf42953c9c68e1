use tracing::{debug, instrument, warn};

use super::CardBridge;
use super::models::{SearchResultSummary, SearchResults};
use crate::trello::CardRepository;
use crate::trello::models::SearchResponse;

/// Cards requested per upstream page.
pub const PAGE_SIZE: usize = 50;

/// Upper bound on pages walked per search.
pub const MAX_PAGES: usize = 5;

const CARD_FIELDS: &str = "name,desc,url,closed";

impl<R: CardRepository> CardBridge<R> {
    /// Search cards by free text, walking at most [`MAX_PAGES`] pages.
    ///
    /// A blank query returns no results without touching the upstream. A
    /// failing page ends pagination and whatever was collected so far is
    /// returned.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> SearchResults {
        let query = query.trim();
        if query.is_empty() {
            return SearchResults::default();
        }

        let page_size = PAGE_SIZE.to_string();
        let mut results: Vec<SearchResultSummary> = Vec::new();

        for page in 0..MAX_PAGES {
            let page_index = page.to_string();
            let params = [
                ("query", query),
                ("modelTypes", "cards"),
                ("filter", "all"),
                ("partial", "true"),
                ("card_fields", CARD_FIELDS),
                ("cards_limit", page_size.as_str()),
                ("cards_page", page_index.as_str()),
            ];

            let body = match self.repo.get("search", &params).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(page, error = %e, "Search page failed, returning partial results");
                    break;
                }
            };

            let cards = match serde_json::from_value::<SearchResponse>(body) {
                Ok(response) => response.cards,
                Err(e) => {
                    warn!(page, error = %e, "Unreadable search page, returning partial results");
                    break;
                }
            };

            let count = cards.len();
            results.extend(
                cards
                    .into_iter()
                    .take(PAGE_SIZE)
                    .map(SearchResultSummary::from),
            );

            if count < PAGE_SIZE {
                break;
            }
        }

        debug!(count = results.len(), "Search complete");
        SearchResults { results }
    }
}
