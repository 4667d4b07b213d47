//! 消息总线核心实现
//!
//! # 消息流
//!
//! ```text
//! OrderManager ──▶ publish() ──┐
//! Menu handlers ──▶ publish() ──┤──▶ broadcast::Sender<BusEvent>
//!                              │
//!                              ▼
//!                   每个 WebSocket 连接一个 Receiver
//! ```
//!
//! # 投递语义
//!
//! 至多一次 (at-most-once)，尽力而为：
//!
//! - 没有任何订阅者时 publish 直接丢弃，不算错误
//! - 订阅者消费落后超过通道容量时，最旧的事件被覆盖丢弃
//! - 单个订阅者内部保持发布顺序，跨订阅者之间无顺序保证

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// 广播通道容量
///
/// 单店场景事件频率很低，1024 足以吸收瞬时断连的积压。
const DEFAULT_CAPACITY: usize = 1024;

/// 总线事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    /// 菜单变更 (创建/更新/删除)
    MenuUpdated,
    /// 新订单提交
    OrderCreated,
    /// 订单状态变更
    OrderStatusChanged,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::MenuUpdated => write!(f, "menu-updated"),
            EventKind::OrderCreated => write!(f, "order-created"),
            EventKind::OrderStatusChanged => write!(f, "order-status-changed"),
        }
    }
}

/// 总线事件 — 事件类型 + JSON 负载
#[derive(Debug, Clone, Serialize)]
pub struct BusEvent {
    pub event: EventKind,
    pub payload: serde_json::Value,
}

/// 消息总线 - 发布/订阅扇出
///
/// Clone 共享同一条底层通道，所有权成本极低。
#[derive(Debug, Clone)]
pub struct MessageBus {
    tx: broadcast::Sender<BusEvent>,
}

impl MessageBus {
    /// 创建默认容量的消息总线
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// 创建指定容量的消息总线
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// 订阅总线，返回独立的接收端
    ///
    /// 每个 viewer (厨房屏/管理屏) 连接时调用一次。
    pub fn subscribe(&self) -> broadcast::Receiver<BusEvent> {
        self.tx.subscribe()
    }

    /// 发布事件到所有当前订阅者
    ///
    /// fire-and-forget：负载序列化失败或无订阅者时丢弃并记录 debug 日志。
    pub fn publish<T: Serialize>(&self, event: EventKind, payload: &T) {
        let payload = match serde_json::to_value(payload) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(event = %event, error = %e, "Failed to serialize bus payload");
                return;
            }
        };
        if self.tx.send(BusEvent { event, payload }).is_err() {
            tracing::debug!(event = %event, "No viewers connected, event dropped");
        }
    }

    /// 当前订阅者数量
    pub fn viewer_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_without_viewers_is_not_an_error() {
        let bus = MessageBus::new();
        assert_eq!(bus.viewer_count(), 0);
        bus.publish(EventKind::MenuUpdated, &serde_json::json!({"id": 1}));
    }

    #[tokio::test]
    async fn each_viewer_receives_events_in_publish_order() {
        let bus = MessageBus::new();
        let mut rx_a = bus.subscribe();
        let mut rx_b = bus.subscribe();

        bus.publish(EventKind::OrderCreated, &serde_json::json!({"id": "PED-001"}));
        bus.publish(EventKind::OrderStatusChanged, &serde_json::json!({"id": "PED-001"}));

        for rx in [&mut rx_a, &mut rx_b] {
            let first = rx.recv().await.unwrap();
            let second = rx.recv().await.unwrap();
            assert_eq!(first.event, EventKind::OrderCreated);
            assert_eq!(second.event, EventKind::OrderStatusChanged);
        }
    }

    #[test]
    fn event_kind_wire_names() {
        let json = serde_json::to_string(&EventKind::OrderStatusChanged).unwrap();
        assert_eq!(json, "\"order-status-changed\"");
        assert_eq!(EventKind::MenuUpdated.to_string(), "menu-updated");
    }
}
