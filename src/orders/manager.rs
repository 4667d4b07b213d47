//! Order lifecycle manager
//!
//! Owns the in-memory [`OrderStore`] behind a single write path and derives
//! every order field at submission time: id, priority, arrival time, table
//! default. Publishes a bus event for every state change so connected
//! viewers stay live.
//!
//! Every mutation holds the store write lock for its full read-modify-write
//! step, so a listing never observes a half-applied submission and the
//! archive drain never races a submission.

use std::sync::Arc;

use chrono_tz::Tz;
use parking_lot::RwLock;

use crate::message::{EventKind, MessageBus};
use crate::utils::{AppError, AppResult, time};

use super::model::{NewOrder, Order, OrderItem, Priority, StatusChange};
use super::store::OrderStore;

/// Initial status of every submitted order.
const STATUS_PREPARING: &str = "preparing";

/// Case-insensitive marker that classifies an item as a drink.
const DRINK_MARKER: &str = "drink";

/// Shared handle over the active order queue.
#[derive(Clone)]
pub struct OrderManager {
    store: Arc<RwLock<OrderStore>>,
    bus: MessageBus,
    tz: Tz,
}

impl OrderManager {
    pub fn new(bus: MessageBus, tz: Tz) -> Self {
        Self {
            store: Arc::new(RwLock::new(OrderStore::new())),
            bus,
            tz,
        }
    }

    /// Accept a diner submission.
    ///
    /// Validates the item list, derives the identity and triage fields,
    /// inserts the order at the front of the queue and broadcasts
    /// `order-created` with the full payload. Memory-only: nothing touches
    /// disk until the archive cycle.
    pub fn submit(&self, new_order: NewOrder) -> AppResult<Order> {
        validate_items(&new_order.items)?;

        let order = {
            let mut store = self.store.write();
            let order = Order {
                id: store.assign_id(),
                table: new_order.table.unwrap_or_else(|| "0".to_string()),
                priority: derive_priority(&new_order.items),
                items: new_order.items,
                status: STATUS_PREPARING.to_string(),
                arrival_time: time::arrival_time(self.tz),
                archived_date: None,
            };
            store.push_front(order.clone());
            order
        };

        tracing::info!(
            order_id = %order.id,
            table = %order.table,
            items = order.items.len(),
            priority = ?order.priority,
            "Order submitted"
        );
        self.bus.publish(EventKind::OrderCreated, &order);
        Ok(order)
    }

    /// Overwrite the status of an active order.
    ///
    /// The status value is a free-form string: the kitchen and admin displays
    /// agree on the vocabulary, the server does not enforce a closed set.
    pub fn update_status(&self, id: &str, status: String) -> AppResult<Order> {
        let order = {
            let mut store = self.store.write();
            let order = store
                .find_mut(id)
                .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
            order.status = status;
            order.clone()
        };

        tracing::info!(order_id = %id, status = %order.status, "Order status updated");
        self.bus.publish(
            EventKind::OrderStatusChanged,
            &StatusChange {
                id: order.id.clone(),
                new_status: order.status.clone(),
            },
        );
        Ok(order)
    }

    /// Snapshot of the active orders, newest-first.
    pub fn list_active(&self) -> Vec<Order> {
        self.store.read().all()
    }

    pub fn active_count(&self) -> usize {
        self.store.read().len()
    }

    /// Drain the store for an archive cycle: snapshot, clear, reset the
    /// sequence — one atomic step under the write lock. Submissions arriving
    /// after this call belong to the next cycle even while the cycle's
    /// durable writes are still in flight.
    pub fn take_for_archive(&self) -> Vec<Order> {
        self.store.write().take_all()
    }
}

/// Structural check of a submitted item list.
///
/// Accepts an empty list; rejects any element with an empty name or a zero
/// price or quantity. A non-sequence `items` field never reaches this point:
/// deserialization rejects it at the boundary with the same client error
/// class.
pub fn validate_items(items: &[OrderItem]) -> AppResult<()> {
    for (idx, item) in items.iter().enumerate() {
        if item.name.trim().is_empty() {
            return Err(AppError::validation(format!("item {}: name is required", idx)));
        }
        if item.price_local == 0.0 {
            return Err(AppError::validation(format!(
                "item {}: priceLocal is required",
                idx
            )));
        }
        if item.price_foreign == 0.0 {
            return Err(AppError::validation(format!(
                "item {}: priceForeign is required",
                idx
            )));
        }
        if item.quantity == 0 {
            return Err(AppError::validation(format!(
                "item {}: quantity is required",
                idx
            )));
        }
    }
    Ok(())
}

/// An order containing any drink item is quick to prepare: low priority.
fn derive_priority(items: &[OrderItem]) -> Priority {
    let has_drink = items
        .iter()
        .any(|i| i.name.to_lowercase().contains(DRINK_MARKER));
    if has_drink { Priority::Low } else { Priority::High }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Bogota;

    fn item(name: &str) -> OrderItem {
        OrderItem {
            name: name.to_string(),
            price_local: 5000.0,
            price_foreign: 1.5,
            quantity: 1,
        }
    }

    fn manager() -> OrderManager {
        OrderManager::new(MessageBus::new(), Bogota)
    }

    fn submission(names: &[&str]) -> NewOrder {
        NewOrder {
            items: names.iter().map(|n| item(n)).collect(),
            table: None,
        }
    }

    #[test]
    fn submit_derives_identity_and_defaults() {
        let manager = manager();

        let order = manager.submit(submission(&["Burger"])).unwrap();
        assert_eq!(order.id, "PED-001");
        assert_eq!(order.status, "preparing");
        assert_eq!(order.table, "0");
        assert!(order.archived_date.is_none());

        let second = manager.submit(submission(&["Arepa"])).unwrap();
        assert_eq!(second.id, "PED-002");
    }

    #[test]
    fn drink_items_lower_the_priority() {
        let manager = manager();

        let food = manager.submit(submission(&["Burger"])).unwrap();
        assert_eq!(food.priority, Priority::High);

        let drinks = manager.submit(submission(&["Cola DRINK"])).unwrap();
        assert_eq!(drinks.priority, Priority::Low);

        let mixed = manager.submit(submission(&["Burger", "Soft drink"])).unwrap();
        assert_eq!(mixed.priority, Priority::Low);
    }

    #[test]
    fn explicit_table_is_kept() {
        let manager = manager();
        let order = manager
            .submit(NewOrder {
                items: vec![item("Burger")],
                table: Some("12".to_string()),
            })
            .unwrap();
        assert_eq!(order.table, "12");
    }

    #[test]
    fn empty_item_list_is_accepted() {
        let manager = manager();
        let order = manager.submit(NewOrder { items: vec![], table: None }).unwrap();
        assert_eq!(order.priority, Priority::High);
        assert_eq!(manager.active_count(), 1);
    }

    #[test]
    fn malformed_item_is_rejected_without_state_change() {
        let manager = manager();

        let mut zero_qty = item("Burger");
        zero_qty.quantity = 0;
        let err = manager
            .submit(NewOrder { items: vec![zero_qty], table: None })
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let mut free = item("Burger");
        free.price_local = 0.0;
        assert!(manager
            .submit(NewOrder { items: vec![free], table: None })
            .is_err());

        assert_eq!(manager.active_count(), 0);
    }

    #[test]
    fn listing_is_newest_first() {
        let manager = manager();
        manager.submit(submission(&["First"])).unwrap();
        manager.submit(submission(&["Second"])).unwrap();
        manager.submit(submission(&["Third"])).unwrap();

        let ids: Vec<_> = manager.list_active().into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["PED-003", "PED-002", "PED-001"]);
    }

    #[test]
    fn listed_order_round_trips_the_submission() {
        let manager = manager();
        let submitted = NewOrder {
            items: vec![item("Burger"), item("Fries")],
            table: Some("7".to_string()),
        };
        manager.submit(submitted.clone()).unwrap();

        let listed = &manager.list_active()[0];
        assert_eq!(listed.items, submitted.items);
        assert_eq!(listed.table, "7");
    }

    #[test]
    fn update_status_touches_only_that_order() {
        let manager = manager();
        manager.submit(submission(&["Burger"])).unwrap();
        manager.submit(submission(&["Arepa"])).unwrap();

        let updated = manager
            .update_status("PED-001", "ready".to_string())
            .unwrap();
        assert_eq!(updated.status, "ready");

        let orders = manager.list_active();
        let first = orders.iter().find(|o| o.id == "PED-001").unwrap();
        let second = orders.iter().find(|o| o.id == "PED-002").unwrap();
        assert_eq!(first.status, "ready");
        assert_eq!(first.items[0].name, "Burger");
        assert_eq!(second.status, "preparing");
    }

    #[test]
    fn update_status_of_unknown_id_is_not_found() {
        let manager = manager();
        manager.submit(submission(&["Burger"])).unwrap();

        let err = manager
            .update_status("PED-999", "ready".to_string())
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(manager.list_active()[0].status, "preparing");
    }

    #[tokio::test]
    async fn lifecycle_events_reach_subscribers() {
        let bus = MessageBus::new();
        let manager = OrderManager::new(bus.clone(), Bogota);
        let mut rx = bus.subscribe();

        let order = manager.submit(submission(&["Burger"])).unwrap();
        manager.update_status(&order.id, "ready".to_string()).unwrap();

        let created = rx.recv().await.unwrap();
        assert_eq!(created.event, EventKind::OrderCreated);
        assert_eq!(created.payload["id"], "PED-001");
        assert_eq!(created.payload["priority"], "high");

        let changed = rx.recv().await.unwrap();
        assert_eq!(changed.event, EventKind::OrderStatusChanged);
        assert_eq!(changed.payload["id"], "PED-001");
        assert_eq!(changed.payload["newStatus"], "ready");
    }
}
