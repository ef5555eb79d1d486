//! Plain-text rendering for terminal output.

use didscope_core::ReputationRecord;
use std::fmt::Write;

const COLUMNS: [(&str, usize); 9] = [
    ("Phone Number", 16),
    ("Health", 9),
    ("Valid", 5),
    ("Carrier", 20),
    ("Risk", 7),
    ("Spam/Scam", 10),
    ("STIR/SHAKEN", 11),
    ("Flagged By", 18),
    ("CNAM", 22),
];

/// Render records as a fixed-width table, one line per record.
///
/// High-risk rows are marked with `!` in the leading gutter. Cells wider
/// than their column are cut with `…`.
#[must_use]
pub fn render_table(records: &[ReputationRecord]) -> String {
    let mut out = String::new();
    let header: Vec<String> = COLUMNS.iter().map(|(h, _)| (*h).to_string()).collect();
    push_line(&mut out, ' ', &header);

    let rule: Vec<String> = COLUMNS.iter().map(|(_, w)| "-".repeat(*w)).collect();
    push_line(&mut out, ' ', &rule);

    for record in records {
        let marker = if record.reputation.risk_level == didscope_core::RiskLevel::High {
            '!'
        } else {
            ' '
        };
        push_line(&mut out, marker, &cells(record));
    }
    out
}

/// Render the health breakdown for one record.
#[must_use]
pub fn render_health(record: &ReputationRecord) -> String {
    let mut out = String::new();
    let Some(health) = record.health_score.as_ref() else {
        let _ = writeln!(out, "No health score for {}", record.phone_number);
        return out;
    };

    let _ = writeln!(out, "Health analysis for {}", record.phone_number);
    let _ = writeln!(out, "  Score: {}/100  Grade: {}", health.score, health.grade);
    let _ = writeln!(out, "  Carrier quality: {}/25", health.factors.carrier_quality);
    let _ = writeln!(out, "  Attestation:     {}/35", health.factors.attestation);
    let _ = writeln!(out, "  Spam risk:       {}/40", health.factors.spam_risk);
    let _ = writeln!(
        out,
        "  STIR/SHAKEN:     {}",
        record
            .reputation
            .attestation_level
            .map_or_else(|| "Unknown".to_string(), |a| a.to_string())
    );
    let _ = writeln!(
        out,
        "  Carrier:         {}",
        record.carrier.as_deref().unwrap_or("Unknown")
    );
    if record.is_simulated() {
        let _ = writeln!(out, "  Source:          simulated");
    }

    if !health.recommendations.is_empty() {
        let _ = writeln!(out, "  Recommendations:");
        for rec in &health.recommendations {
            let _ = writeln!(out, "    - {rec}");
        }
    }
    out
}

fn cells(record: &ReputationRecord) -> Vec<String> {
    let rep = &record.reputation;
    let health = record
        .health_score
        .as_ref()
        .map_or_else(|| "-".to_string(), |h| format!("{} {}%", h.grade, h.score));

    let spam_scam = match (rep.spam_likely, rep.scam_likely) {
        (true, true) => "Spam Scam",
        (true, false) => "Spam",
        (false, true) => "Scam",
        (false, false) => "Clean",
    };

    let flagged = if rep.flagged_by_carriers.is_empty() {
        "-".to_string()
    } else {
        rep.flagged_by_carriers.join(", ")
    };

    let cnam = match record.cnam.as_ref() {
        Some(c) if c.registered.is_none() => "N/A".to_string(),
        Some(c) if c.registered == Some(true) => c
            .display_name
            .clone()
            .unwrap_or_else(|| "Registered".to_string()),
        _ => "Not registered".to_string(),
    };

    vec![
        record.phone_number.clone(),
        health,
        if record.is_valid { "yes" } else { "no" }.to_string(),
        record.carrier.clone().unwrap_or_else(|| "-".to_string()),
        rep.risk_level.to_string(),
        spam_scam.to_string(),
        rep.attestation_level
            .map_or_else(|| "unknown".to_string(), |a| a.to_string()),
        flagged,
        cnam,
    ]
}

fn push_line(out: &mut String, marker: char, cells: &[String]) {
    out.push(marker);
    for ((_, width), cell) in COLUMNS.iter().zip(cells) {
        let _ = write!(out, " {:<width$}", fit(cell, *width), width = *width);
    }
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
    out.push('\n');
}

fn fit(cell: &str, width: usize) -> String {
    if cell.chars().count() <= width {
        cell.to_string()
    } else {
        let mut cut: String = cell.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
