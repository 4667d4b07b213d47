//! Menu API 模块

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router(state: &ServerState) -> Router<ServerState> {
    let read_routes = Router::new().route("/menu", get(handler::list));

    let write_routes = Router::new()
        .route("/menu", axum::routing::post(handler::create))
        .route(
            "/menu/{id}",
            axum::routing::put(handler::update).delete(handler::delete),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    read_routes.merge(write_routes)
}
