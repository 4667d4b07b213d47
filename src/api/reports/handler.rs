//! Report API Handlers

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult, time};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// GET /report - download today's report file if one exists
///
/// The report only exists once an archive cycle has run for the current
/// business date; before that this is a 404.
pub async fn download(State(state): State<ServerState>) -> AppResult<Response> {
    let date = time::business_date(state.config.timezone);
    let path = state
        .reports
        .existing_report(&date)
        .ok_or_else(|| AppError::not_found("No report for today"))?;

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| AppError::persistence(format!("read report {}: {}", path.display(), e)))?;

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("report.xlsx")
        .to_string();

    Ok((
        [
            (header::CONTENT_TYPE.as_str(), XLSX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION.as_str(),
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}
