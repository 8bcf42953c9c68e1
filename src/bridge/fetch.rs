use tracing::{debug, instrument, warn};

use super::models::{
    BoardRef, CardDetail, CommentSummary, DetailMetadata, ListRef, MemberSummary, NO_DESCRIPTION,
    NO_TITLE, WorkspaceRef,
};
use super::{BridgeResult, CardBridge, is_path_safe, require_id};
use crate::trello::models::{Action, Board, Card, Organization, TrelloList};
use crate::trello::{CardRepository, TrelloError};

const CARD_PARAMS: &[(&str, &str)] = &[
    (
        "fields",
        "name,desc,url,dateLastActivity,idList,idBoard,due,closed",
    ),
    ("checklists", "all"),
    ("attachments", "true"),
    ("members", "true"),
    ("member_fields", "fullName,username"),
];
const LIST_PARAMS: &[(&str, &str)] = &[("fields", "name,closed,idBoard")];
const BOARD_PARAMS: &[(&str, &str)] = &[("fields", "name,url,idOrganization")];
const ORGANIZATION_PARAMS: &[(&str, &str)] = &[("fields", "displayName,name")];

/// Maximum number of comments pulled from the action feed.
pub const COMMENT_LIMIT: &str = "100";
const COMMENT_ACTION: &str = "commentCard";

impl<R: CardRepository> CardBridge<R> {
    /// Assemble the full detail record of one card.
    ///
    /// The card lookup is the only terminal call: if it fails nothing else
    /// is requested. List, board, workspace and comment lookups degrade to
    /// empty values.
    #[instrument(skip(self))]
    pub async fn fetch(&self, card_id: &str) -> BridgeResult<CardDetail> {
        let card_id = require_id("card_id", card_id)?;

        let body = self.repo.get(&format!("cards/{}", card_id), CARD_PARAMS).await?;
        let card: Card = serde_json::from_value(body).map_err(TrelloError::from)?;

        let list_id = card.id_list.clone().unwrap_or_default();
        let board_id = card.id_board.clone().unwrap_or_default();

        let ((list, board, workspace), comments) = tokio::join!(
            self.lookup_placement(&list_id, &board_id),
            self.lookup_comments(card_id),
        );

        debug!(comments = comments.len(), "Card detail assembled");

        let last_activity = card.date_last_activity.unwrap_or_default();
        Ok(CardDetail {
            id: card.id.unwrap_or_else(|| card_id.to_string()),
            title: card.name.unwrap_or_else(|| NO_TITLE.to_string()),
            text: card.desc.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            url: card.url.unwrap_or_default(),
            closed: card.closed.unwrap_or(false),
            due: card.due,
            metadata: DetailMetadata {
                source: "trello".to_string(),
                last_activity: last_activity.clone(),
                list: list.name.clone(),
                list_id: list.id.clone(),
            },
            last_activity,
            members: card.members.into_iter().map(MemberSummary::from).collect(),
            checklists: card.checklists,
            attachments: card.attachments,
            list,
            board,
            workspace,
            comments,
        })
    }

    /// List and board of a card. Without a board id on the card, the
    /// board named by the list is used instead.
    async fn lookup_placement(
        &self,
        list_id: &str,
        board_id: &str,
    ) -> (ListRef, BoardRef, Option<WorkspaceRef>) {
        if !board_id.is_empty() {
            let (list, (board, workspace)) =
                tokio::join!(self.lookup_list(list_id), self.lookup_board(board_id));
            return (list.0, board, workspace);
        }

        let (list, list_board_id) = self.lookup_list(list_id).await;
        let (board, workspace) = self
            .lookup_board(list_board_id.as_deref().unwrap_or_default())
            .await;
        (list, board, workspace)
    }

    /// Returns the list and the board id it reports.
    async fn lookup_list(&self, list_id: &str) -> (ListRef, Option<String>) {
        let mut list = ListRef {
            id: list_id.to_string(),
            name: String::new(),
        };
        if list_id.is_empty() || !is_path_safe(list_id) {
            return (list, None);
        }

        match self
            .repo
            .get(&format!("lists/{}", list_id), LIST_PARAMS)
            .await
            .and_then(|body| Ok(serde_json::from_value::<TrelloList>(body)?))
        {
            Ok(found) => {
                list.name = found.name.unwrap_or_default();
                (list, found.id_board.filter(|id| !id.is_empty()))
            }
            Err(e) => {
                warn!(list_id, error = %e, "List lookup failed");
                (list, None)
            }
        }
    }

    async fn lookup_board(&self, board_id: &str) -> (BoardRef, Option<WorkspaceRef>) {
        let mut board = BoardRef {
            id: board_id.to_string(),
            ..Default::default()
        };
        if board_id.is_empty() || !is_path_safe(board_id) {
            return (board, None);
        }

        let found = match self
            .repo
            .get(&format!("boards/{}", board_id), BOARD_PARAMS)
            .await
            .and_then(|body| Ok(serde_json::from_value::<Board>(body)?))
        {
            Ok(found) => found,
            Err(e) => {
                warn!(board_id, error = %e, "Board lookup failed");
                return (board, None);
            }
        };

        board.name = found.name.unwrap_or_default();
        board.url = found.url.unwrap_or_default();

        let workspace = match found.id_organization.filter(|id| !id.is_empty()) {
            Some(org_id) => Some(self.lookup_workspace(org_id).await),
            None => None,
        };

        (board, workspace)
    }

    async fn lookup_workspace(&self, org_id: String) -> WorkspaceRef {
        let mut workspace = WorkspaceRef {
            id: org_id,
            name: String::new(),
        };
        if !is_path_safe(&workspace.id) {
            return workspace;
        }

        match self
            .repo
            .get(
                &format!("organizations/{}", workspace.id),
                ORGANIZATION_PARAMS,
            )
            .await
            .and_then(|body| Ok(serde_json::from_value::<Organization>(body)?))
        {
            Ok(org) => workspace.name = org.display_name.or(org.name).unwrap_or_default(),
            Err(e) => warn!(org_id = %workspace.id, error = %e, "Workspace lookup failed"),
        }
        workspace
    }

    async fn lookup_comments(&self, card_id: &str) -> Vec<CommentSummary> {
        let params = [("filter", COMMENT_ACTION), ("limit", COMMENT_LIMIT)];

        match self
            .repo
            .get(&format!("cards/{}/actions", card_id), &params)
            .await
            .and_then(|body| Ok(serde_json::from_value::<Vec<Action>>(body)?))
        {
            Ok(actions) => actions
                .into_iter()
                .filter(|a| {
                    a.action_type
                        .as_deref()
                        .is_none_or(|kind| kind == COMMENT_ACTION)
                })
                .map(CommentSummary::from)
                .collect(),
            Err(e) => {
                warn!(card_id, error = %e, "Comment lookup failed, returning no comments");
                Vec::new()
            }
        }
    }
}
