//! 实时消息模块
//!
//! 发布/订阅扇出，向所有已连接的 viewer (厨房屏、管理屏、前台屏)
//! 推送订单与菜单变更。传输层是 `api::events` 的 WebSocket 端点。

mod bus;

pub use bus::{BusEvent, EventKind, MessageBus};
