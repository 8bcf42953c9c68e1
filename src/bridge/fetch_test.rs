//! Tests for card detail aggregation

use serde_json::{Value, json};

use super::{BridgeError, CardBridge};
use crate::testing::{FakeRepository, RecordedCall, not_found, timeout};
use crate::trello::TrelloResult;

fn card() -> Value {
    json!({
        "id": "abc123",
        "name": "Roll out v2",
        "desc": "Ship the new connector",
        "url": "https://trello.com/c/abc123",
        "closed": false,
        "due": "2026-11-01T12:00:00.000Z",
        "dateLastActivity": "2026-10-17T09:30:00.000Z",
        "idList": "L1",
        "idBoard": "B1",
        "members": [ { "id": "M1", "fullName": "Ada Lovelace", "username": "ada" } ],
        "checklists": [ { "id": "CL1", "name": "Steps" } ],
        "attachments": []
    })
}

fn comments() -> Value {
    json!([
        {
            "id": "A1",
            "type": "commentCard",
            "date": "2026-10-16T08:00:00.000Z",
            "data": { "text": "Looks good" },
            "memberCreator": { "id": "M1", "fullName": "Ada Lovelace", "username": "ada" }
        },
        {
            "id": "A2",
            "type": "commentCard",
            "date": "2026-10-15T08:00:00.000Z",
            "data": { "text": "Anonymous note" }
        }
    ])
}

/// Happy-path upstream; `board` lets tests choose the board payload.
fn upstream(board: Value) -> impl Fn(&RecordedCall) -> TrelloResult<Value> + Send + Sync {
    move |call| match call.path.as_str() {
        "cards/abc123" => Ok(card()),
        "lists/L1" => Ok(json!({ "id": "L1", "name": "Doing", "idBoard": "B1" })),
        "boards/B1" => Ok(board.clone()),
        "organizations/O1" => Ok(json!({ "id": "O1", "displayName": "Platform Team" })),
        "cards/abc123/actions" => Ok(comments()),
        other => Err(not_found(other)),
    }
}

fn board_without_workspace() -> Value {
    json!({ "id": "B1", "name": "Roadmap", "url": "https://trello.com/b/B1" })
}

fn board_with_workspace() -> Value {
    json!({
        "id": "B1",
        "name": "Roadmap",
        "url": "https://trello.com/b/B1",
        "idOrganization": "O1"
    })
}

#[tokio::test]
async fn test_fetch_assembles_full_detail() {
    let bridge = CardBridge::new(FakeRepository::new(upstream(board_with_workspace())));

    let detail = bridge.fetch("abc123").await.unwrap();

    assert_eq!(detail.id, "abc123");
    assert_eq!(detail.title, "Roll out v2");
    assert_eq!(detail.text, "Ship the new connector");
    assert_eq!(detail.url, "https://trello.com/c/abc123");
    assert_eq!(detail.due.as_deref(), Some("2026-11-01T12:00:00.000Z"));
    assert_eq!(detail.last_activity, "2026-10-17T09:30:00.000Z");
    assert_eq!(detail.list.id, "L1");
    assert_eq!(detail.list.name, "Doing");
    assert_eq!(detail.board.name, "Roadmap");
    assert_eq!(detail.board.url, "https://trello.com/b/B1");
    let workspace = detail.workspace.as_ref().unwrap();
    assert_eq!(workspace.id, "O1");
    assert_eq!(workspace.name, "Platform Team");
    assert_eq!(detail.members[0].full_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(detail.checklists.len(), 1);
    assert_eq!(detail.metadata.source, "trello");
    assert_eq!(detail.metadata.list, "Doing");
    assert_eq!(detail.metadata.list_id, "L1");

    assert_eq!(detail.comments.len(), 2);
    assert_eq!(detail.comments[0].author.as_deref(), Some("Ada Lovelace"));
    assert_eq!(detail.comments[0].text, "Looks good");
    assert_eq!(detail.comments[1].author, None);
}

#[tokio::test]
async fn test_fetch_requests_expected_fields() {
    let bridge = CardBridge::new(FakeRepository::new(upstream(board_without_workspace())));

    bridge.fetch("abc123").await.unwrap();

    let calls = bridge.repository().calls();
    let card_call = calls.iter().find(|c| c.path == "cards/abc123").unwrap();
    assert_eq!(
        card_call.param("fields"),
        Some("name,desc,url,dateLastActivity,idList,idBoard,due,closed")
    );
    assert_eq!(card_call.param("checklists"), Some("all"));
    assert_eq!(card_call.param("members"), Some("true"));

    let actions = calls
        .iter()
        .find(|c| c.path == "cards/abc123/actions")
        .unwrap();
    assert_eq!(actions.param("filter"), Some("commentCard"));
    assert_eq!(actions.param("limit"), Some("100"));
}

#[tokio::test]
async fn test_primary_failure_is_terminal_and_skips_dependent_calls() {
    let bridge = CardBridge::new(FakeRepository::new(|call| Err(not_found(&call.path))));

    let err = bridge.fetch("missing").await.unwrap_err();

    assert!(matches!(err, BridgeError::Upstream(_)));
    assert_eq!(bridge.repository().paths(), vec!["cards/missing".to_string()]);
}

#[tokio::test]
async fn test_unreadable_card_is_terminal() {
    let bridge = CardBridge::new(FakeRepository::new(|_| Ok(json!(["not", "a", "card"]))));

    let err = bridge.fetch("abc123").await.unwrap_err();

    assert!(err.to_string().contains("Invalid response"));
    assert_eq!(bridge.repository().calls().len(), 1);
}

#[tokio::test]
async fn test_comment_failure_yields_empty_comments() {
    // Board without workspace, actions call times out.
    let bridge = CardBridge::new(FakeRepository::new(|call| match call.path.as_str() {
        "cards/abc123/actions" => Err(timeout(&call.path)),
        _ => upstream(board_without_workspace())(call),
    }));

    let detail = bridge.fetch("abc123").await.unwrap();

    assert_eq!(detail.list.name, "Doing");
    assert_eq!(detail.board.name, "Roadmap");
    assert!(detail.workspace.is_none());
    assert!(detail.comments.is_empty());

    let json = serde_json::to_value(&detail).unwrap();
    assert_eq!(json["workspace"], Value::Null);
    assert_eq!(json["comments"], json!([]));
}

#[tokio::test]
async fn test_board_without_workspace_skips_organization_call() {
    let bridge = CardBridge::new(FakeRepository::new(upstream(board_without_workspace())));

    let detail = bridge.fetch("abc123").await.unwrap();

    assert!(detail.workspace.is_none());
    assert!(
        !bridge
            .repository()
            .paths()
            .iter()
            .any(|p| p.starts_with("organizations/"))
    );
}

#[tokio::test]
async fn test_dependent_failures_degrade_to_empty_fields() {
    let bridge = CardBridge::new(FakeRepository::new(|call| match call.path.as_str() {
        "cards/abc123" => Ok(card()),
        "cards/abc123/actions" => Ok(json!([])),
        other => Err(not_found(other)),
    }));

    let detail = bridge.fetch("abc123").await.unwrap();

    assert_eq!(detail.list.id, "L1");
    assert_eq!(detail.list.name, "");
    assert_eq!(detail.board.id, "B1");
    assert_eq!(detail.board.name, "");
    assert_eq!(detail.board.url, "");
    assert!(detail.workspace.is_none());
}

#[tokio::test]
async fn test_board_falls_back_to_the_lists_board() {
    let bridge = CardBridge::new(FakeRepository::new(|call| match call.path.as_str() {
        "cards/abc123" => {
            let mut card = card();
            card.as_object_mut().unwrap().remove("idBoard");
            Ok(card)
        }
        _ => upstream(board_with_workspace())(call),
    }));

    let detail = bridge.fetch("abc123").await.unwrap();

    assert_eq!(detail.list.name, "Doing");
    assert_eq!(detail.board.id, "B1");
    assert_eq!(detail.board.name, "Roadmap");
    assert_eq!(detail.workspace.unwrap().name, "Platform Team");

    let paths = bridge.repository().paths();
    let list_at = paths.iter().position(|p| p == "lists/L1").unwrap();
    let board_at = paths.iter().position(|p| p == "boards/B1").unwrap();
    assert!(list_at < board_at);
}

#[tokio::test]
async fn test_missing_board_and_failed_list_leave_board_empty() {
    let bridge = CardBridge::new(FakeRepository::new(|call| match call.path.as_str() {
        "cards/abc123" => {
            let mut card = card();
            card.as_object_mut().unwrap().remove("idBoard");
            Ok(card)
        }
        "lists/L1" => Err(timeout(&call.path)),
        _ => upstream(board_with_workspace())(call),
    }));

    let detail = bridge.fetch("abc123").await.unwrap();

    assert_eq!(detail.list.id, "L1");
    assert_eq!(detail.board.id, "");
    assert!(detail.workspace.is_none());
    assert!(
        !bridge
            .repository()
            .paths()
            .iter()
            .any(|p| p.starts_with("boards/"))
    );
}

#[tokio::test]
async fn test_workspace_failure_keeps_board_and_id() {
    let bridge = CardBridge::new(FakeRepository::new(|call| match call.path.as_str() {
        "organizations/O1" => Err(timeout(&call.path)),
        _ => upstream(board_with_workspace())(call),
    }));

    let detail = bridge.fetch("abc123").await.unwrap();

    assert_eq!(detail.board.name, "Roadmap");
    let workspace = detail.workspace.unwrap();
    assert_eq!(workspace.id, "O1");
    assert_eq!(workspace.name, "");
}

#[tokio::test]
async fn test_card_without_list_or_board_issues_no_lookups() {
    let bridge = CardBridge::new(FakeRepository::new(|call| match call.path.as_str() {
        "cards/lonely" => Ok(json!({ "id": "lonely" })),
        _ => Ok(json!([])),
    }));

    let detail = bridge.fetch("lonely").await.unwrap();

    assert_eq!(detail.title, "No Title");
    assert_eq!(detail.text, "No description");
    assert_eq!(detail.url, "");
    assert_eq!(detail.due, None);
    assert_eq!(
        bridge.repository().paths(),
        vec!["cards/lonely".to_string(), "cards/lonely/actions".to_string()]
    );
}

#[tokio::test]
async fn test_non_comment_actions_are_filtered_out() {
    let bridge = CardBridge::new(FakeRepository::new(|call| match call.path.as_str() {
        "cards/abc123/actions" => Ok(json!([
            { "id": "A1", "type": "updateCard", "data": {} },
            { "id": "A2", "type": "commentCard", "data": { "text": "kept" } }
        ])),
        _ => upstream(board_without_workspace())(call),
    }));

    let detail = bridge.fetch("abc123").await.unwrap();

    assert_eq!(detail.comments.len(), 1);
    assert_eq!(detail.comments[0].id, "A2");
}

#[tokio::test]
async fn test_blank_card_id_is_a_validation_error() {
    let bridge = CardBridge::new(FakeRepository::new(|_| Ok(card())));

    let err = bridge.fetch("  ").await.unwrap_err();

    assert_eq!(err, BridgeError::validation("Missing card_id"));
    assert!(bridge.repository().calls().is_empty());
}

#[tokio::test]
async fn test_card_id_with_path_characters_is_rejected() {
    let bridge = CardBridge::new(FakeRepository::new(|_| Ok(card())));

    let err = bridge.fetch("../members/me").await.unwrap_err();

    assert_eq!(err, BridgeError::validation("Invalid card_id"));
    assert!(bridge.repository().calls().is_empty());
}

#[tokio::test]
async fn test_fetch_is_repeatable() {
    let bridge = CardBridge::new(FakeRepository::new(upstream(board_with_workspace())));

    let first = bridge.fetch("abc123").await.unwrap();
    let second = bridge.fetch("abc123").await.unwrap();

    assert_eq!(first, second);
    assert!(
        bridge
            .repository()
            .calls()
            .iter()
            .all(|c| c.method == "GET")
    );
}
