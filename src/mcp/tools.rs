//! Tool argument types and handlers.
//!
//! Each handler decodes its arguments, calls the bridge once and returns
//! the result as JSON. Argument errors become validation errors so the
//! caller always gets an error envelope instead of a protocol fault.

use std::sync::Arc;

use rmcp::schemars::{self, JsonSchema};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::registry::{ToolEntry, ToolFuture, ToolRegistry};
use crate::bridge::{BridgeError, BridgeResult, CardBridge, CardUpdate, NewCard};
use crate::trello::CardRepository;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
    #[schemars(description = "Keywords to search for in card titles and descriptions")]
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FetchParams {
    #[serde(alias = "card_id")]
    #[schemars(description = "Card ID as returned by search")]
    pub id: String,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct OverviewParams {}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateCardParams {
    #[schemars(description = "ID of the list the card is created in")]
    pub list_id: String,
    #[schemars(description = "Card title")]
    pub name: String,
    #[schemars(description = "Card description (markdown)")]
    pub desc: Option<String>,
    #[schemars(description = "Due date (ISO 8601)")]
    pub due: Option<String>,
    #[schemars(description = "Position in the list: top, bottom, or a positive number")]
    pub position: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateCardParams {
    #[schemars(description = "Card ID")]
    pub card_id: String,
    #[schemars(description = "New title")]
    pub name: Option<String>,
    #[schemars(description = "New description")]
    pub desc: Option<String>,
    #[schemars(description = "New due date (ISO 8601)")]
    pub due: Option<String>,
    #[schemars(description = "Archive (true) or restore (false) the card")]
    pub closed: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MoveCardParams {
    #[schemars(description = "Card ID")]
    pub card_id: String,
    #[schemars(description = "Destination list ID")]
    pub list_id: String,
    #[schemars(description = "Position in the destination list: top, bottom, or a positive number")]
    pub position: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ArchiveCardParams {
    #[schemars(description = "Card ID to archive")]
    pub card_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddCommentParams {
    #[schemars(description = "Card ID")]
    pub card_id: String,
    #[schemars(description = "Comment text")]
    pub text: String,
}

/// Build the registry with every tool this server exposes.
pub fn default_registry<R: CardRepository + 'static>() -> ToolRegistry<R> {
    ToolRegistry::new()
        .register(ToolEntry::new::<SearchParams>(
            "search",
            "Search Trello cards by keyword, including archived cards. Returns up to 250 summaries.",
            search::<R>,
        ))
        .register(ToolEntry::new::<FetchParams>(
            "fetch",
            "Get full details of a Trello card: list, board, workspace, members, checklists and comments.",
            fetch::<R>,
        ))
        .register(ToolEntry::new::<OverviewParams>(
            "overview",
            "List open boards with their open lists.",
            overview::<R>,
        ))
        .register(ToolEntry::new::<CreateCardParams>(
            "create_card",
            "Create a card in a list.",
            create_card::<R>,
        ))
        .register(ToolEntry::new::<UpdateCardParams>(
            "update_card",
            "Update the title, description, due date or closed state of a card.",
            update_card::<R>,
        ))
        .register(ToolEntry::new::<MoveCardParams>(
            "move_card",
            "Move a card to another list.",
            move_card::<R>,
        ))
        .register(ToolEntry::new::<ArchiveCardParams>(
            "archive_card",
            "Archive (close) a card.",
            archive_card::<R>,
        ))
        .register(ToolEntry::new::<AddCommentParams>(
            "add_comment",
            "Add a comment to a card.",
            add_comment::<R>,
        ))
}

fn parse_args<P: DeserializeOwned>(arguments: Value) -> BridgeResult<P> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments)
        .map_err(|e| BridgeError::validation(format!("Invalid arguments: {}", e)))
}

fn to_json<T: Serialize>(value: T) -> BridgeResult<Value> {
    serde_json::to_value(value).map_err(|e| BridgeError::Internal {
        message: e.to_string(),
    })
}

fn search<R: CardRepository + 'static>(bridge: Arc<CardBridge<R>>, arguments: Value) -> ToolFuture {
    Box::pin(async move {
        let params: SearchParams = parse_args(arguments)?;
        to_json(bridge.search(&params.query).await)
    })
}

fn fetch<R: CardRepository + 'static>(bridge: Arc<CardBridge<R>>, arguments: Value) -> ToolFuture {
    Box::pin(async move {
        let params: FetchParams = parse_args(arguments)?;
        to_json(bridge.fetch(&params.id).await?)
    })
}

fn overview<R: CardRepository + 'static>(
    bridge: Arc<CardBridge<R>>,
    arguments: Value,
) -> ToolFuture {
    Box::pin(async move {
        let _: OverviewParams = parse_args(arguments)?;
        to_json(bridge.overview().await?)
    })
}

fn create_card<R: CardRepository + 'static>(
    bridge: Arc<CardBridge<R>>,
    arguments: Value,
) -> ToolFuture {
    Box::pin(async move {
        let params: CreateCardParams = parse_args(arguments)?;
        bridge
            .create_card(NewCard {
                list_id: params.list_id,
                name: params.name,
                desc: params.desc,
                due: params.due,
                position: params.position,
            })
            .await
    })
}

fn update_card<R: CardRepository + 'static>(
    bridge: Arc<CardBridge<R>>,
    arguments: Value,
) -> ToolFuture {
    Box::pin(async move {
        let params: UpdateCardParams = parse_args(arguments)?;
        bridge
            .update_card(
                &params.card_id,
                CardUpdate {
                    name: params.name,
                    desc: params.desc,
                    due: params.due,
                    closed: params.closed,
                },
            )
            .await
    })
}

fn move_card<R: CardRepository + 'static>(
    bridge: Arc<CardBridge<R>>,
    arguments: Value,
) -> ToolFuture {
    Box::pin(async move {
        let params: MoveCardParams = parse_args(arguments)?;
        bridge
            .move_card(&params.card_id, &params.list_id, params.position.as_deref())
            .await
    })
}

fn archive_card<R: CardRepository + 'static>(
    bridge: Arc<CardBridge<R>>,
    arguments: Value,
) -> ToolFuture {
    Box::pin(async move {
        let params: ArchiveCardParams = parse_args(arguments)?;
        bridge.archive_card(&params.card_id).await
    })
}

fn add_comment<R: CardRepository + 'static>(
    bridge: Arc<CardBridge<R>>,
    arguments: Value,
) -> ToolFuture {
    Box::pin(async move {
        let params: AddCommentParams = parse_args(arguments)?;
        bridge.add_comment(&params.card_id, &params.text).await
    })
}
