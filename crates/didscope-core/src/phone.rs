//! Phone number helpers shared by the CLI and the CSV importer.

use regex::Regex;
use std::sync::OnceLock;

/// Minimum digit count for a string to be treated as a phone number.
pub const MIN_PHONE_DIGITS: usize = 10;

fn non_digit_regex() -> &'static Regex {
    static NON_DIGIT: OnceLock<Regex> = OnceLock::new();
    NON_DIGIT.get_or_init(|| Regex::new(r"\D").expect("valid regex"))
}

/// Strip every non-digit character.
#[must_use]
pub fn digits_only(input: &str) -> String {
    non_digit_regex().replace_all(input, "").into_owned()
}

/// Whether a free-text value looks like a phone number.
///
/// Permissive on purpose: any value with at least ten digits once
/// punctuation and letters are removed qualifies.
#[must_use]
pub fn looks_like_phone_number(input: &str) -> bool {
    digits_only(input).len() >= MIN_PHONE_DIGITS
}

/// Normalize a North American number to `+1XXXXXXXXXX` form.
///
/// - 10 digits: prefixed with `+1`
/// - 11 digits starting with `1`: prefixed with `+`
/// - more than 11 digits starting with `1`: prefixed with `+`
///
/// Anything else is returned unchanged.
#[must_use]
pub fn format_phone_number(input: &str) -> String {
    let cleaned = digits_only(input);

    if cleaned.len() == 10 {
        format!("+1{cleaned}")
    } else if cleaned.len() >= 11 && cleaned.starts_with('1') {
        format!("+{cleaned}")
    } else {
        input.to_string()
    }
}
