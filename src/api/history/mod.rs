//! History API 模块

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .route("/history", get(handler::list))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin))
}
