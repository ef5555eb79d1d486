//! Export, import and summary endpoints.

use crate::error::ApiError;
use crate::routes::validate::parse_body;
use axum::body::Bytes;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use didscope_core::{ReputationRecord, Timestamp};
use didscope_report::{export_filename, require_phone_numbers, to_csv, BulkSummary, Notice};
use serde::Serialize;

/// Numbers extracted from an uploaded CSV.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    /// Candidate numbers in scan order
    pub phone_numbers: Vec<String>,
}

/// Summary plus the notices a client should show.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Aggregate counts
    #[serde(flatten)]
    pub summary: BulkSummary,
    /// User-facing messages
    pub notices: Vec<Notice>,
}

/// `POST /api/export`
pub async fn export_handler(body: Bytes) -> Result<impl IntoResponse, ApiError> {
    let records = parse_records(&body)?;
    let filename = export_filename(&Timestamp::now());
    tracing::info!(rows = records.len(), %filename, "exporting CSV");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        to_csv(&records),
    ))
}

/// `POST /api/import`
pub async fn import_handler(body: Bytes) -> Result<Json<ImportResponse>, ApiError> {
    let text = String::from_utf8_lossy(&body);
    let phone_numbers = require_phone_numbers(&text)?;
    tracing::info!(count = phone_numbers.len(), "imported numbers from CSV");
    Ok(Json(ImportResponse { phone_numbers }))
}

/// `POST /api/summary`
pub async fn summary_handler(body: Bytes) -> Result<Json<SummaryResponse>, ApiError> {
    let records = parse_records(&body)?;
    let summary = BulkSummary::from_records(&records);
    let notices = summary.notices();
    Ok(Json(SummaryResponse { summary, notices }))
}

fn parse_records(body: &[u8]) -> Result<Vec<ReputationRecord>, ApiError> {
    serde_json::from_value(parse_body(body)?).map_err(|e| {
        tracing::debug!(error = %e, "body is not a record array");
        ApiError::InvalidJson
    })
}
