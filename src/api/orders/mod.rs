//! Order API 模块
//!
//! 订单提交与状态变更无需凭证：点餐端与厨房屏都直接访问。

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/orders", get(handler::list))
        .route("/order", post(handler::submit))
        .route("/order/{id}", put(handler::update_status))
}
