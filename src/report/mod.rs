//! Daily spreadsheet report
//!
//! One `.xlsx` workbook per business date, written by the archive cycle from
//! the day's order snapshot and served for download by `GET /report`. The
//! workbook is the front-of-house bookkeeping artifact; the history log is
//! the durable record.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook};

use crate::orders::Order;
use crate::utils::{AppError, AppResult};

/// Report columns: header and width.
const COLUMNS: &[(&str, f64)] = &[
    ("Order ID", 15.0),
    ("Table", 10.0),
    ("Items", 35.0),
    ("Total Quantity", 15.0),
    ("Total (local)", 15.0),
    ("Total (foreign)", 15.0),
    ("Submitted At", 20.0),
    ("Status", 15.0),
];

/// Writes per-date order reports into the reports directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Deterministic path of the report for a business date.
    pub fn report_path(&self, date: &str) -> PathBuf {
        self.dir.join(format!("orders_{}.xlsx", date))
    }

    /// Write the report for `date` from the archived snapshot.
    ///
    /// An empty snapshot still produces a header-only workbook.
    pub fn write_daily_report(&self, date: &str, orders: &[Order]) -> AppResult<PathBuf> {
        let path = self.report_path(date);

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet
            .set_name("Orders")
            .map_err(|e| AppError::internal(format!("report sheet: {}", e)))?;

        let bold = Format::new().set_bold();
        for (col, (header, width)) in COLUMNS.iter().enumerate() {
            let col = col as u16;
            sheet
                .set_column_width(col, *width)
                .and_then(|s| s.write_with_format(0, col, *header, &bold))
                .map_err(|e| AppError::internal(format!("report header: {}", e)))?;
        }

        for (idx, order) in orders.iter().enumerate() {
            let row = idx as u32 + 1;
            let items = order
                .items
                .iter()
                .map(|i| format!("{} (x{})", i.name, i.quantity))
                .collect::<Vec<_>>()
                .join("\n");

            sheet
                .write(row, 0, order.id.as_str())
                .and_then(|s| s.write(row, 1, order.table.as_str()))
                .and_then(|s| s.write(row, 2, items))
                .and_then(|s| s.write(row, 3, order.total_quantity()))
                .and_then(|s| s.write(row, 4, order.total_local()))
                .and_then(|s| s.write(row, 5, format!("{:.2}", order.total_foreign())))
                .and_then(|s| s.write(row, 6, order.arrival_time.as_str()))
                .and_then(|s| s.write(row, 7, order.status.as_str()))
                .map_err(|e| AppError::internal(format!("report row {}: {}", row, e)))?;
        }

        workbook
            .save(&path)
            .map_err(|e| AppError::persistence(format!("save report {}: {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), orders = orders.len(), "Daily report written");
        Ok(path)
    }

    /// Path of the report for `date` if it has been generated.
    pub fn existing_report(&self, date: &str) -> Option<PathBuf> {
        let path = self.report_path(date);
        path.exists().then_some(path)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
