use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::auth::SessionAuth;
use crate::api::state::AppState;
use crate::domain::kanban::{ActionBoard, ActionItem, ActionStatus};
use crate::domain::user::RepresentativeId;
use crate::session::{Page, SessionContext};

/// Request body for adding an action to the board
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub client_name: String,
    pub suggested_action: String,
}

/// Request body for editing an action; absent fields stay unchanged
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub status: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: Uuid,
    pub client_name: String,
    pub suggested_action: String,
    pub status: ActionStatus,
    pub status_label: String,
    pub comment: Option<String>,
}

impl From<&ActionItem> for ItemResponse {
    fn from(item: &ActionItem) -> Self {
        Self {
            id: item.id(),
            client_name: item.client_name().to_string(),
            suggested_action: item.suggested_action().to_string(),
            status: item.status(),
            status_label: item.status().label().to_string(),
            comment: item.comment().map(str::to_string),
        }
    }
}

/// The representative's items, one list per board column
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub to_do: Vec<ItemResponse>,
    pub in_progress: Vec<ItemResponse>,
    pub done: Vec<ItemResponse>,
    pub unsaved_changes: bool,
}

impl BoardResponse {
    fn new(board: &ActionBoard, representative_id: &RepresentativeId) -> Self {
        let mut response = Self {
            to_do: Vec::new(),
            in_progress: Vec::new(),
            done: Vec::new(),
            unsaved_changes: board.is_dirty(),
        };
        for item in board.for_representative(representative_id) {
            let column = match item.status() {
                ActionStatus::ToDo => &mut response.to_do,
                ActionStatus::InProgress => &mut response.in_progress,
                ActionStatus::Done => &mut response.done,
            };
            column.push(ItemResponse::from(item));
        }
        response
    }
}

/// The session's draft, loaded from the actions sheet on first access
async fn draft<'a>(
    state: &AppState,
    session: &'a mut SessionContext,
) -> Result<&'a mut ActionBoard, ApiError> {
    session.current_page = Page::Kanban;
    if session.board.is_none() {
        let (board, warnings) = state.store.load_board().await?;
        if !warnings.is_empty() {
            tracing::warn!("Actions sheet loaded with {} warnings", warnings.len());
        }
        session.board = Some(board);
    }
    session
        .board
        .as_mut()
        .ok_or_else(|| ApiError::internal_server_error("Action board unavailable"))
}

/// GET /api/kanban
pub async fn get_board(
    State(state): State<AppState>,
    auth: SessionAuth,
) -> Result<Json<BoardResponse>, ApiError> {
    let mut session = auth.session.lock().await;
    let representative_id = session.identity.representative_id.clone();
    let board = draft(&state, &mut session).await?;

    Ok(Json(BoardResponse::new(board, &representative_id)))
}

/// Adds an action to the draft
///
/// POST /api/kanban/items
pub async fn create_item(
    State(state): State<AppState>,
    auth: SessionAuth,
    Json(req): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let mut session = auth.session.lock().await;
    let representative_id = session.identity.representative_id.clone();
    let board = draft(&state, &mut session).await?;

    let event = board.add_item(representative_id, &req.client_name, &req.suggested_action)?;
    let item = find_item(board, event.item_id())?;

    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

/// Changes the status and/or comment of an action in the draft
///
/// PATCH /api/kanban/items/:id
pub async fn update_item(
    State(state): State<AppState>,
    auth: SessionAuth,
    Path(item_id): Path<Uuid>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<ItemResponse>, ApiError> {
    let status = req
        .status
        .as_deref()
        .map(|raw| {
            ActionStatus::parse(raw)
                .ok_or_else(|| ApiError::bad_request(format!("Unknown status: {}", raw)))
        })
        .transpose()?;

    let mut session = auth.session.lock().await;
    let representative_id = session.identity.representative_id.clone();
    let board = draft(&state, &mut session).await?;

    if let Some(status) = status {
        board.set_status(&representative_id, item_id, status)?;
    }
    if let Some(comment) = req.comment.as_deref() {
        board.set_comment(&representative_id, item_id, comment)?;
    }

    let item = find_item(board, item_id)?;
    Ok(Json(ItemResponse::from(item)))
}

/// Writes the draft to the actions sheet
///
/// POST /api/kanban/save
pub async fn save_board(
    State(state): State<AppState>,
    auth: SessionAuth,
) -> Result<Json<BoardResponse>, ApiError> {
    let mut session = auth.session.lock().await;
    let representative_id = session.identity.representative_id.clone();
    let board = draft(&state, &mut session).await?;

    if board.is_dirty() {
        state.store.save_board(board).await?;
    }

    Ok(Json(BoardResponse::new(board, &representative_id)))
}

/// Drops the draft; the next access reloads the sheet
///
/// POST /api/kanban/discard
pub async fn discard_board(auth: SessionAuth) -> StatusCode {
    let mut session = auth.session.lock().await;
    if session.board.take().is_some_and(|board| board.is_dirty()) {
        tracing::info!("Session {} discarded unsaved board edits", auth.session_id);
    }
    StatusCode::NO_CONTENT
}

fn find_item(board: &ActionBoard, item_id: Uuid) -> Result<&ActionItem, ApiError> {
    board
        .items()
        .iter()
        .find(|item| item.id() == item_id)
        .ok_or_else(|| ApiError::not_found(format!("Action item {}", item_id)))
}
