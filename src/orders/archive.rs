//! Archive cycle — 订单归档
//!
//! One cycle: snapshot + clear the active store, write the daily spreadsheet
//! report, stamp and append the snapshot to the history log. The cycle is
//! the only path by which orders leave the active store.
//!
//! Partial-failure tolerance: a failed report write is logged and never
//! blocks the history append; a failed history write is logged and the
//! in-memory append stands. Nothing here returns an error to any caller.

use chrono_tz::Tz;

use crate::history::HistoryLog;
use crate::report::ReportWriter;
use crate::utils::time;

use super::manager::OrderManager;

/// Runs archive cycles against the active order queue.
#[derive(Clone)]
pub struct ArchiveService {
    manager: OrderManager,
    history: HistoryLog,
    reports: ReportWriter,
    tz: Tz,
}

impl ArchiveService {
    pub fn new(manager: OrderManager, history: HistoryLog, reports: ReportWriter, tz: Tz) -> Self {
        Self {
            manager,
            history,
            reports,
            tz,
        }
    }

    /// Execute one archive cycle.
    ///
    /// Runs unconditionally: an empty day produces a header-only report and
    /// no history rows. Returns the number of orders archived (logging only).
    pub fn run_cycle(&self) -> usize {
        let date = time::business_date(self.tz);

        // 快照 + 清空 + 计数器复位，一步完成；之后到达的订单属于下一周期
        let snapshot = self.manager.take_for_archive();
        let count = snapshot.len();

        tracing::info!(date = %date, orders = count, "Archive cycle started");

        // Report failure must not block the history append.
        if let Err(e) = self.reports.write_daily_report(&date, &snapshot) {
            tracing::error!(date = %date, error = %e, "Failed to write daily report");
        }

        let archived: Vec<_> = snapshot
            .into_iter()
            .map(|mut order| {
                order.archived_date = Some(date.clone());
                order
            })
            .collect();

        if let Err(e) = self.history.append(archived) {
            // 内存中的追加仍然生效，下个周期的整文件重写会再次尝试落盘
            tracing::error!(date = %date, error = %e, "Failed to persist history log");
        }

        tracing::info!(date = %date, orders = count, "Archive cycle finished");
        count
    }
}
