//! History API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::orders::Order;

/// GET /history - full archived-order log (admin)
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Order>> {
    Json(state.history.snapshot())
}
