//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::orders::{NewOrder, Order, StatusUpdate};
use crate::utils::AppResult;

/// GET /orders - active orders, newest-first
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Order>> {
    Json(state.orders.list_active())
}

/// POST /order - submit a diner order
///
/// Validation failure is a 400 with no state change; success broadcasts
/// `order-created` to every connected viewer.
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<NewOrder>,
) -> AppResult<Json<Order>> {
    let order = state.orders.submit(payload)?;
    Ok(Json(order))
}

/// PUT /order/{id} - overwrite the status of an active order
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<Order>> {
    let order = state.orders.update_status(&id, payload.status)?;
    Ok(Json(order))
}
