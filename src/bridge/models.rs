//! Output envelopes produced by the bridge.
//!
//! These are built per request from upstream responses and never stored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::trello::models::{Action, Card, Member};

pub const NO_TITLE: &str = "No Title";
pub const NO_DESCRIPTION: &str = "No description";
pub const SNIPPET_LEN: usize = 200;
pub const ELLIPSIS: &str = "...";

/// Truncate `text` to [`SNIPPET_LEN`] characters, appending [`ELLIPSIS`]
/// only when something was cut.
pub fn snippet(text: &str) -> String {
    match text.char_indices().nth(SNIPPET_LEN) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultSummary {
    pub id: String,
    pub title: String,
    pub text: String,
    pub url: String,
    pub closed: bool,
}

impl From<Card> for SearchResultSummary {
    fn from(card: Card) -> Self {
        Self {
            id: card.id.unwrap_or_default(),
            title: card.name.unwrap_or_else(|| NO_TITLE.to_string()),
            text: card.desc.as_deref().map(snippet).unwrap_or_default(),
            url: card.url.unwrap_or_default(),
            closed: card.closed.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub results: Vec<SearchResultSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl From<Member> for MemberSummary {
    fn from(m: Member) -> Self {
        Self {
            id: m.id.unwrap_or_default(),
            full_name: m.full_name,
            username: m.username,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRef {
    pub id: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSummary {
    pub id: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub text: String,
}

impl From<Action> for CommentSummary {
    fn from(action: Action) -> Self {
        let author = action
            .member_creator
            .and_then(|m| m.full_name.or(m.username));
        Self {
            id: action.id.unwrap_or_default(),
            date: action.date.unwrap_or_default(),
            author,
            text: action.data.text.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailMetadata {
    pub source: String,
    pub last_activity: String,
    pub list: String,
    pub list_id: String,
}

/// Fully denormalized card record returned by `fetch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetail {
    pub id: String,
    pub title: String,
    pub text: String,
    pub url: String,
    pub closed: bool,
    pub due: Option<String>,
    pub last_activity: String,
    pub members: Vec<MemberSummary>,
    pub checklists: Vec<Value>,
    pub attachments: Vec<Value>,
    pub list: ListRef,
    pub board: BoardRef,
    pub workspace: Option<WorkspaceRef>,
    pub comments: Vec<CommentSummary>,
    pub metadata: DetailMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardOverview {
    pub id: String,
    pub name: String,
    pub url: String,
    pub closed: bool,
    pub lists: Vec<ListRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    pub boards: Vec<BoardOverview>,
}
