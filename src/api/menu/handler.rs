//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::menu::{MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::message::EventKind;
use crate::utils::AppResult;

/// GET /menu - full catalog, no auth
pub async fn list(State(state): State<ServerState>) -> Json<Vec<MenuItem>> {
    Json(state.menu.list())
}

/// POST /menu - create a menu item (admin)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    let item = state.menu.create(payload)?;
    state.broadcast(EventKind::MenuUpdated, &item);
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /menu/{id} - partial update merged onto the existing record (admin)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let item = state.menu.update(id, payload)?;
    state.broadcast(EventKind::MenuUpdated, &item);
    Ok(Json(item))
}

/// DELETE /menu/{id} - remove by id (admin)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.menu.delete(id)?;
    state.broadcast(EventKind::MenuUpdated, &serde_json::json!({ "id": id }));
    Ok(StatusCode::NO_CONTENT)
}
