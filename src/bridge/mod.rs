//! Search/Fetch bridge
//!
//! Turns tool invocations into one or more calls against a
//! [`CardRepository`] and reshapes the upstream JSON into small, stable
//! envelopes.
//!
//! - **search**: bounded pagination over the upstream search endpoint
//! - **fetch**: card detail aggregation (card, list, board, workspace, comments)
//! - **cards**: single-call write passthroughs and the board overview
//!
//! The bridge is generic over `R: CardRepository` and holds no state besides
//! the repository, so concurrent invocations share nothing mutable.

mod cards;
mod error;
mod fetch;
pub mod models;
mod search;

#[cfg(test)]
mod fetch_test;

pub use cards::{CardUpdate, NewCard};
pub use error::{BridgeError, BridgeResult, ErrorEnvelope};
pub use models::{CardDetail, Overview, SearchResultSummary, SearchResults};
pub use search::{MAX_PAGES, PAGE_SIZE};

use crate::trello::CardRepository;

pub struct CardBridge<R: CardRepository> {
    repo: R,
}

impl<R: CardRepository> CardBridge<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Get a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }
}

/// Trim an identifier and make sure it is safe to splice into a path.
///
/// Upstream ids are opaque tokens of ASCII letters and digits (short links
/// may contain `-` or `_`); anything else is rejected before a call is made.
pub(crate) fn require_id<'a>(field: &str, value: &'a str) -> BridgeResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(BridgeError::validation(format!("Missing {}", field)));
    }
    if !is_path_safe(value) {
        return Err(BridgeError::validation(format!("Invalid {}", field)));
    }
    Ok(value)
}

pub(crate) fn is_path_safe(id: &str) -> bool {
    id.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
