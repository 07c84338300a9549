//! Per-field validation rules.
//!
//! Each helper parses one raw field value and returns either the typed
//! value or a human-actionable message. Draft `validate` implementations
//! compose these into a [`FieldErrors`](crate::form::FieldErrors) map;
//! nothing here is called on keystroke, only on submit.

use chrono::NaiveDate;

pub const MAX_TEXT_LEN: usize = 200;

/// Required free-text field: non-empty, trimmed, bounded, printable.
pub fn require_text(raw: &str) -> Result<String, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("must not be empty".to_string());
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(format!("must be at most {MAX_TEXT_LEN} characters"));
    }
    if value.chars().any(char::is_control) {
        return Err("must not contain control characters".to_string());
    }
    Ok(value.to_string())
}

/// Numeric field within an inclusive range.
pub fn parse_number_in_range(raw: &str, min: f64, max: f64) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("must be a number between {min} and {max}"))?;
    if !value.is_finite() || value < min || value > max {
        return Err(format!("must be a number between {min} and {max}"));
    }
    Ok(value)
}

/// Integer field within an inclusive range.
pub fn parse_int_in_range(raw: &str, min: i64, max: i64) -> Result<i64, String> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("must be a whole number between {min} and {max}"))?;
    if value < min || value > max {
        return Err(format!("must be a whole number between {min} and {max}"));
    }
    Ok(value)
}

/// Membership in a fixed token vocabulary, matched case-insensitively.
///
/// Returns the canonical token so callers can parse it into their enum
/// without a second normalization pass.
pub fn parse_choice(raw: &str, tokens: &'static [&'static str]) -> Result<&'static str, String> {
    let wanted = raw.trim().to_lowercase();
    tokens
        .iter()
        .find(|t| **t == wanted)
        .copied()
        .ok_or_else(|| format!("must be one of: {}", tokens.join(", ")))
}

/// Calendar date in `YYYY-MM-DD` form.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| "must be a date in YYYY-MM-DD form".to_string())
}
