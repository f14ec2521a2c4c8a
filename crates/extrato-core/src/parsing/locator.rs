//! Shared field-locator helpers for the fixed-layout inspection form.
//!
//! The form is organized as numbered sections ("04 - Identificação") with
//! "Label: value" lines inside them. Keeping the locating logic here means a
//! form revision only touches the patterns in the section parsers, not the
//! parsing logic itself.

use regex::Regex;
use std::sync::LazyLock;

static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2}/\d{2}/\d{4})").unwrap());

/// Collapse any run of whitespace (including newlines) to a single space.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a decimal that may use a comma as separator ("-22,90" -> -22.90).
///
/// Returns `None` for malformed numeric text; callers must not coerce.
pub fn parse_decimal_flex(s: &str) -> Option<f64> {
    s.trim().replace(',', ".").parse::<f64>().ok()
}

/// Normalize a date field to dd/mm/yyyy by taking the first date-shaped
/// substring. Text with no date shape passes through trimmed — a defined
/// fallback, not an error.
pub fn formatted_date(raw: &str) -> String {
    match DATE_SHAPE.captures(raw) {
        Some(c) => c[1].to_string(),
        None => raw.trim().to_string(),
    }
}

/// First capture group of `re` in `text`, trimmed, or `None`.
pub fn captured<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

/// The full span matched by `re` in `text` (used for numbered-section
/// bounds, where the parsers scan inside the matched region).
pub fn span<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.find(text).map(|m| m.as_str())
}
