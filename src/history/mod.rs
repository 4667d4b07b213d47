//! History log
//!
//! Append-only record of every archived order across the lifetime of the
//! system. Logically append-only in memory; on disk it is a whole-file
//! overwrite of `history.json` after each archive cycle, read back in full at
//! startup.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::orders::Order;
use crate::storage;
use crate::utils::AppResult;

/// Shared handle over the archived order history.
#[derive(Clone)]
pub struct HistoryLog {
    records: Arc<RwLock<Vec<Order>>>,
    path: PathBuf,
}

impl HistoryLog {
    /// Load the history file, initializing it to `[]` when missing or corrupt.
    pub fn load(path: PathBuf) -> Self {
        let records: Vec<Order> = storage::load_or_init(&path);
        tracing::info!(records = records.len(), path = %path.display(), "History log loaded");
        Self {
            records: Arc::new(RwLock::new(records)),
            path,
        }
    }

    /// Append a batch of archived orders and rewrite the file.
    ///
    /// The in-memory append stands even when the write fails; the caller logs
    /// the failure and the next cycle's write retries the full file. Restart
    /// before a successful write loses the unpersisted tail — accepted
    /// best-effort durability.
    pub fn append(&self, archived: Vec<Order>) -> AppResult<()> {
        let snapshot = {
            let mut records = self.records.write();
            records.extend(archived);
            records.clone()
        };
        storage::save_json(&self.path, &snapshot)
    }

    /// Full history, oldest-first.
    pub fn snapshot(&self) -> Vec<Order> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::{OrderItem, Priority};

    fn archived_order(id: &str, date: &str) -> Order {
        Order {
            id: id.to_string(),
            table: "0".to_string(),
            items: vec![OrderItem {
                name: "Burger".to_string(),
                price_local: 12000.0,
                price_foreign: 3.0,
                quantity: 1,
            }],
            status: "preparing".to_string(),
            priority: Priority::High,
            arrival_time: "12:30".to_string(),
            archived_date: Some(date.to_string()),
        }
    }

    #[test]
    fn append_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let log = HistoryLog::load(path.clone());
        assert!(log.is_empty());

        log.append(vec![
            archived_order("PED-001", "2026-08-07"),
            archived_order("PED-002", "2026-08-07"),
        ])
        .unwrap();
        assert_eq!(log.len(), 2);

        // a fresh load sees the persisted records
        let reloaded = HistoryLog::load(path);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.snapshot()[0].id, "PED-001");
        assert_eq!(
            reloaded.snapshot()[0].archived_date.as_deref(),
            Some("2026-08-07")
        );
    }

    #[test]
    fn ids_may_repeat_across_dates() {
        let dir = tempfile::tempdir().unwrap();
        let log = HistoryLog::load(dir.path().join("history.json"));

        log.append(vec![archived_order("PED-001", "2026-08-06")]).unwrap();
        log.append(vec![archived_order("PED-001", "2026-08-07")]).unwrap();

        // durable identity is (archivedDate, id)
        assert_eq!(log.len(), 2);
    }
}
