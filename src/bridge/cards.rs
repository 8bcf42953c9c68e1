//! Write passthroughs and the board overview.
//!
//! Each operation is a single upstream call; the raw upstream JSON is
//! returned unchanged.

use serde_json::Value;
use tracing::{info, instrument};

use super::models::{BoardOverview, ListRef, Overview};
use super::{BridgeError, BridgeResult, CardBridge, require_id};
use crate::trello::CardRepository;
use crate::trello::models::Board;

const OVERVIEW_PARAMS: &[(&str, &str)] = &[
    ("filter", "open"),
    ("fields", "name,url,closed,idOrganization"),
    ("lists", "open"),
    ("list_fields", "name"),
];

/// Input of `create_card`.
#[derive(Debug, Clone, Default)]
pub struct NewCard {
    pub list_id: String,
    pub name: String,
    pub desc: Option<String>,
    pub due: Option<String>,
    pub position: Option<String>,
}

/// Input of `update_card`; only supplied fields are sent.
#[derive(Debug, Clone, Default)]
pub struct CardUpdate {
    pub name: Option<String>,
    pub desc: Option<String>,
    pub due: Option<String>,
    pub closed: Option<bool>,
}

impl CardUpdate {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.desc.is_none() && self.due.is_none() && self.closed.is_none()
    }
}

fn require_text<'a>(field: &str, value: &'a str) -> BridgeResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(BridgeError::validation(format!("Missing {}", field)));
    }
    Ok(value)
}

impl<R: CardRepository> CardBridge<R> {
    /// List open boards with their open lists.
    #[instrument(skip(self))]
    pub async fn overview(&self) -> BridgeResult<Overview> {
        let body = self.repo.get("members/me/boards", OVERVIEW_PARAMS).await?;
        let boards: Vec<Board> =
            serde_json::from_value(body).map_err(crate::trello::TrelloError::from)?;

        Ok(Overview {
            boards: boards
                .into_iter()
                .map(|b| BoardOverview {
                    id: b.id.unwrap_or_default(),
                    name: b.name.unwrap_or_default(),
                    url: b.url.unwrap_or_default(),
                    closed: b.closed.unwrap_or(false),
                    lists: b
                        .lists
                        .into_iter()
                        .map(|l| ListRef {
                            id: l.id.unwrap_or_default(),
                            name: l.name.unwrap_or_default(),
                        })
                        .collect(),
                })
                .collect(),
        })
    }

    #[instrument(skip(self, card), fields(list_id = %card.list_id))]
    pub async fn create_card(&self, card: NewCard) -> BridgeResult<Value> {
        let list_id = require_id("list_id", &card.list_id)?;
        let name = require_text("name", &card.name)?;

        let mut fields = vec![("idList", list_id), ("name", name)];
        if let Some(desc) = card.desc.as_deref() {
            fields.push(("desc", desc));
        }
        if let Some(due) = card.due.as_deref() {
            fields.push(("due", due));
        }
        if let Some(pos) = card.position.as_deref() {
            fields.push(("pos", pos));
        }

        let created = self.repo.post("cards", &fields).await?;
        info!(card_id = ?created.get("id"), "Card created");
        Ok(created)
    }

    #[instrument(skip(self, update))]
    pub async fn update_card(&self, card_id: &str, update: CardUpdate) -> BridgeResult<Value> {
        let card_id = require_id("card_id", card_id)?;
        if update.is_empty() {
            return Err(BridgeError::validation(
                "Nothing to update: supply at least one of name, desc, due, closed",
            ));
        }

        let closed = update.closed.map(|c| c.to_string());
        let mut fields = Vec::new();
        if let Some(name) = update.name.as_deref() {
            fields.push(("name", name));
        }
        if let Some(desc) = update.desc.as_deref() {
            fields.push(("desc", desc));
        }
        if let Some(due) = update.due.as_deref() {
            fields.push(("due", due));
        }
        if let Some(closed) = closed.as_deref() {
            fields.push(("closed", closed));
        }

        Ok(self
            .repo
            .put(&format!("cards/{}", card_id), &fields)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn move_card(
        &self,
        card_id: &str,
        list_id: &str,
        position: Option<&str>,
    ) -> BridgeResult<Value> {
        let card_id = require_id("card_id", card_id)?;
        let list_id = require_id("list_id", list_id)?;

        let mut fields = vec![("idList", list_id)];
        if let Some(pos) = position {
            fields.push(("pos", pos));
        }

        Ok(self
            .repo
            .put(&format!("cards/{}", card_id), &fields)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn archive_card(&self, card_id: &str) -> BridgeResult<Value> {
        let card_id = require_id("card_id", card_id)?;

        Ok(self
            .repo
            .put(&format!("cards/{}/closed", card_id), &[("value", "true")])
            .await?)
    }

    #[instrument(skip(self, text))]
    pub async fn add_comment(&self, card_id: &str, text: &str) -> BridgeResult<Value> {
        let card_id = require_id("card_id", card_id)?;
        let text = require_text("text", text)?;

        Ok(self
            .repo
            .post(&format!("cards/{}/actions/comments", card_id), &[("text", text)])
            .await?)
    }
}
