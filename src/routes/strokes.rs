//! Stroke log routes, scoped by tenant and board.

#[cfg(test)]
#[path = "strokes_test.rs"]
mod strokes_test;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;
use whiteboard::stroke::{BoardKey, Stroke};

use crate::routes::auth::AuthUser;
use crate::services::strokes::StoreError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AppendResponse {
    pub id: Uuid,
}

fn authorized_board(auth: &AuthUser, tenant_id: String, board_id: String) -> Result<BoardKey, StatusCode> {
    auth.require_tenant(&tenant_id)?;
    Ok(BoardKey { board_id, tenant_id })
}

/// `GET /api/tenants/:tenant/boards/:board/strokes` — ordered stroke log.
pub async fn list_strokes(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((tenant_id, board_id)): Path<(String, String)>,
) -> Result<Json<Vec<Stroke>>, StatusCode> {
    let board = authorized_board(&auth, tenant_id, board_id)?;
    let strokes = state.store.list(&board).await.map_err(store_error_to_status)?;
    Ok(Json(strokes))
}

/// `POST /api/tenants/:tenant/boards/:board/strokes` — append a stroke.
pub async fn append_stroke(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((tenant_id, board_id)): Path<(String, String)>,
    Json(stroke): Json<Stroke>,
) -> Result<(StatusCode, Json<AppendResponse>), StatusCode> {
    let board = authorized_board(&auth, tenant_id, board_id)?;
    if !stroke.belongs_to(&board) {
        warn!(board_id = %board.board_id, tenant_id = %board.tenant_id, "stroke addressed to another board");
        return Err(StatusCode::BAD_REQUEST);
    }
    if let Err(e) = stroke.validate() {
        warn!(board_id = %board.board_id, tenant_id = %board.tenant_id, error = %e, "rejected stroke");
        return Err(StatusCode::BAD_REQUEST);
    }

    let id = state.store.append(&stroke).await.map_err(store_error_to_status)?;
    Ok((StatusCode::CREATED, Json(AppendResponse { id })))
}

/// `DELETE /api/tenants/:tenant/boards/:board/strokes/latest` — remove the last stroke.
pub async fn delete_latest(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((tenant_id, board_id)): Path<(String, String)>,
) -> Result<StatusCode, StatusCode> {
    let board = authorized_board(&auth, tenant_id, board_id)?;
    let removed = state.store.delete_most_recent(&board).await.map_err(store_error_to_status)?;
    if !removed {
        info!(board_id = %board.board_id, tenant_id = %board.tenant_id, "delete latest on empty board");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/tenants/:tenant/boards/:board/strokes` — clear the board.
pub async fn delete_all(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((tenant_id, board_id)): Path<(String, String)>,
) -> Result<StatusCode, StatusCode> {
    let board = authorized_board(&auth, tenant_id, board_id)?;
    let removed = state.store.delete_all(&board).await.map_err(store_error_to_status)?;
    info!(board_id = %board.board_id, tenant_id = %board.tenant_id, removed, "board cleared");
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) fn store_error_to_status(err: StoreError) -> StatusCode {
    warn!(error = %err, "stroke store failure");
    match err {
        StoreError::Database(_) | StoreError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
