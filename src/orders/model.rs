//! Order domain model

use serde::{Deserialize, Serialize};

/// Kitchen triage priority, derived once at submission.
///
/// Drink-only style orders are quick to prepare, so an order containing any
/// drink item is deprioritized for the kitchen queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    High,
}

/// One line of a diner submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub name: String,
    pub price_local: f64,
    pub price_foreign: f64,
    pub quantity: u32,
}

/// An active (not yet archived) order.
///
/// Created by a diner submission; mutated only by status transitions; leaves
/// the store exclusively through the archive cycle, which stamps
/// `archived_date` and moves it to the history log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// `PED-NNN`, unique among active orders only; the sequence resets every
    /// archive cycle, so durable identity is `(archivedDate, id)`.
    pub id: String,
    pub table: String,
    pub items: Vec<OrderItem>,
    /// Free-form status string; starts as `"preparing"`.
    pub status: String,
    pub priority: Priority,
    /// Business-timezone `HH:MM`, immutable after creation.
    pub arrival_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_date: Option<String>,
}

/// Diner submission body for `POST /order`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub table: Option<String>,
}

/// Status update body for `PUT /order/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: String,
}

/// Broadcast payload for `order-status-changed`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub id: String,
    pub new_status: String,
}

impl Order {
    /// Sum of item quantities.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Order total in the local currency.
    pub fn total_local(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.price_local * i.quantity as f64)
            .sum()
    }

    /// Order total in the foreign currency.
    pub fn total_foreign(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.price_foreign * i.quantity as f64)
            .sum()
    }
}
