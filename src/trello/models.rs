//! Upstream response shapes.
//!
//! Only the fields the bridge reads are modelled; every field is optional
//! because Trello omits whatever was not requested.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Option<String>,
    pub name: Option<String>,
    pub desc: Option<String>,
    pub url: Option<String>,
    pub closed: Option<bool>,
    pub due: Option<String>,
    pub date_last_activity: Option<String>,
    pub id_list: Option<String>,
    pub id_board: Option<String>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub checklists: Vec<Value>,
    #[serde(default)]
    pub attachments: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Option<String>,
    pub full_name: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrelloList {
    pub id: Option<String>,
    pub name: Option<String>,
    pub closed: Option<bool>,
    pub id_board: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub closed: Option<bool>,
    pub id_organization: Option<String>,
    #[serde(default)]
    pub lists: Vec<TrelloList>,
}

/// A workspace, called "organization" by the upstream API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub name: Option<String>,
}

/// Entry of the card action feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub action_type: Option<String>,
    #[serde(default)]
    pub data: ActionData,
    pub member_creator: Option<Member>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionData {
    pub text: Option<String>,
}

/// Body of `GET search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub cards: Vec<Card>,
}
