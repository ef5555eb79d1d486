//! CSV export of checked records.

use crate::error::{ReportError, Result};
use didscope_core::{ReputationRecord, Timestamp};
use std::path::{Path, PathBuf};

/// Column headers, in output order.
pub const CSV_HEADERS: [&str; 22] = [
    "Phone Number",
    "Health Grade",
    "Health Score",
    "Valid",
    "Carrier",
    "Line Type",
    "City",
    "State",
    "Country",
    "Risk Level",
    "Spam Score",
    "Spam Likely",
    "Scam Likely",
    "STIR/SHAKEN Level",
    "Flagged By Carriers",
    "CNAM Registered",
    "CNAM Display Name",
    "Disconnected",
    "Reassigned",
    "Recommendations",
    "Checked At",
    "Data Source",
];

/// Render records as CSV text.
///
/// Every field, headers included, is double-quoted with embedded quotes
/// doubled. Rows are separated by `\n` with no trailing newline.
#[must_use]
pub fn to_csv(records: &[ReputationRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(join_row(CSV_HEADERS.iter().map(|h| (*h).to_string())));
    for record in records {
        lines.push(join_row(row(record)));
    }
    lines.join("\n")
}

/// Download filename for an export made at `now`.
#[must_use]
pub fn export_filename(now: &Timestamp) -> String {
    format!("phone-reputation-{}.csv", now.timestamp_millis())
}

/// Write an export into `dir` and return the file path.
///
/// # Errors
/// Returns error if the file cannot be written.
pub fn write_csv(dir: &Path, records: &[ReputationRecord], now: &Timestamp) -> Result<PathBuf> {
    let path = dir.join(export_filename(now));
    std::fs::write(&path, to_csv(records)).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), rows = records.len(), "wrote CSV export");
    Ok(path)
}

fn row(record: &ReputationRecord) -> Vec<String> {
    let health = record.health_score.as_ref();
    let location = record.location.as_ref();
    let rep = &record.reputation;

    vec![
        record.phone_number.clone(),
        health.map(|h| h.grade.to_string()).unwrap_or_default(),
        health.map(|h| h.score.to_string()).unwrap_or_default(),
        yes_no(record.is_valid),
        record.carrier.clone().unwrap_or_default(),
        record.line_type.clone().unwrap_or_default(),
        location.and_then(|l| l.city.clone()).unwrap_or_default(),
        location.and_then(|l| l.state.clone()).unwrap_or_default(),
        location.and_then(|l| l.country.clone()).unwrap_or_default(),
        rep.risk_level.to_string(),
        rep.spam_score.map(|s| format!("{s:.2}")).unwrap_or_default(),
        yes_no(rep.spam_likely),
        yes_no(rep.scam_likely),
        rep.attestation_level
            .map(|a| a.to_string())
            .unwrap_or_default(),
        rep.flagged_by_carriers.join("; "),
        cnam_registered(record),
        record
            .cnam
            .as_ref()
            .and_then(|c| c.display_name.clone())
            .unwrap_or_default(),
        yes_no(record.disconnected.unwrap_or(false)),
        yes_no(record.reassigned.unwrap_or(false)),
        health
            .map(|h| h.recommendations.join("; "))
            .unwrap_or_default(),
        record.timestamp.to_iso8601(),
        record.source.to_string(),
    ]
}

fn cnam_registered(record: &ReputationRecord) -> String {
    match record.cnam.as_ref().map(|c| c.registered) {
        Some(None) => "N/A".to_string(),
        Some(Some(true)) => "Yes".to_string(),
        Some(Some(false)) | None => "No".to_string(),
    }
}

fn yes_no(value: bool) -> String {
    if value { "Yes" } else { "No" }.to_string()
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

fn join_row(cells: impl IntoIterator<Item = String>) -> String {
    cells
        .into_iter()
        .map(|c| quote(&c))
        .collect::<Vec<_>>()
        .join(",")
}
