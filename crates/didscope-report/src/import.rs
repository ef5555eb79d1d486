//! Phone number extraction from uploaded CSV files.

use crate::error::{ReportError, Result};
use didscope_core::looks_like_phone_number;
use std::path::Path;

/// Split CSV text into rows of cells.
///
/// Handles quoted cells containing commas, doubled quotes and line breaks.
/// A quote only opens a quoted cell at the start of a field; elsewhere it is
/// kept as a literal character. Both `\n` and `\r\n` end a row. An
/// unterminated quote runs to the end of the input.
#[must_use]
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut field_start = true;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    cell.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => cell.push(c),
            }
            continue;
        }

        match c {
            '"' if field_start => {
                in_quotes = true;
                field_start = false;
            }
            ',' => {
                row.push(std::mem::take(&mut cell));
                field_start = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                row.push(std::mem::take(&mut cell));
                rows.push(std::mem::take(&mut row));
                field_start = true;
            }
            _ => {
                cell.push(c);
                field_start = false;
            }
        }
    }

    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        rows.push(row);
    }

    rows
}

/// Every cell in `text` that looks like a phone number, trimmed, in scan order.
#[must_use]
pub fn extract_phone_numbers(text: &str) -> Vec<String> {
    parse_rows(text)
        .into_iter()
        .flatten()
        .map(|cell| cell.trim().to_string())
        .filter(|cell| !cell.is_empty() && looks_like_phone_number(cell))
        .collect()
}

/// Like [`extract_phone_numbers`], but an empty result is an error.
///
/// # Errors
/// Returns [`ReportError::NoPhoneNumbers`] if nothing qualified.
pub fn require_phone_numbers(text: &str) -> Result<Vec<String>> {
    let numbers = extract_phone_numbers(text);
    if numbers.is_empty() {
        return Err(ReportError::NoPhoneNumbers);
    }
    tracing::debug!(count = numbers.len(), "extracted phone numbers from CSV");
    Ok(numbers)
}

/// Read a CSV file and extract its phone numbers.
///
/// # Errors
/// Returns error if the file cannot be read or holds no phone numbers.
pub fn read_phone_numbers(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    require_phone_numbers(&text)
}
