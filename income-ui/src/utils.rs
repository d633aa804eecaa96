use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

/// Dots grouping thousands with an optional decimal comma, as in `1.234,56` or `12.000`.
fn dotted_thousands() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?[1-9]\d{0,2}(\.\d{3})+(,\d+)?$").expect("valid pattern"))
}

/// A lone comma followed by one or two digits is a decimal comma, as in `12,5` or `21,40`.
fn decimal_comma() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?\d+,\d{1,2}$").expect("valid pattern"))
}

/// Trims whitespace, a trailing `€` or `%`, and inner spaces.
fn strip_units(s: &str) -> String {
    s.trim()
        .trim_end_matches(['€', '%'])
        .trim()
        .replace(' ', "")
}

/// Normalizes a money amount for decimal parsing.
///
/// Accepts both `1,234.56` (comma thousands) and the Portuguese `1.234,56`
/// or `12,5`.
fn normalize_amount_input(s: &str) -> String {
    let trimmed = strip_units(s);

    if dotted_thousands().is_match(&trimmed) {
        trimmed.replace('.', "").replace(',', ".")
    } else if decimal_comma().is_match(&trimmed) {
        trimmed.replace(',', ".")
    } else {
        trimmed.replace(',', "")
    }
}

/// Normalizes a percentage for decimal parsing.
///
/// Percentages never carry thousands separators, so a lone dot or comma is
/// always the decimal separator: `12.500` and `12,500` both read as 12.5.
fn normalize_percent_input(s: &str) -> String {
    let trimmed = strip_units(s);

    if trimmed.contains('.') {
        trimmed.replace(',', "")
    } else {
        trimmed.replace(',', ".")
    }
}

fn parse_normalized(
    raw: &str,
    normalized: String,
) -> Option<Decimal> {
    if normalized.is_empty() {
        return None;
    }
    normalized.parse().map_or_else(
        |e| {
            tracing::warn!(input = %raw, "invalid optional decimal: {}", e);
            None
        },
        Some,
    )
}

/// Parses a money field into an optional [`Decimal`].
///
/// Returns `None` for empty input, or when parsing fails (logs a warning on
/// parse failure). The calculator treats `None` as zero.
pub fn parse_optional_decimal(s: &str) -> Option<Decimal> {
    parse_normalized(s, normalize_amount_input(s))
}

/// Parses a percentage field into an optional [`Decimal`].
///
/// Like [`parse_optional_decimal`], but dots are never read as thousands
/// separators.
pub fn parse_optional_percent(s: &str) -> Option<Decimal> {
    parse_normalized(s, normalize_percent_input(s))
}

/// Formats an optional [`Decimal`] for display, using "—" when `None`.
pub fn opt_decimal_display(d: &Option<Decimal>) -> String {
    d.as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "—".to_string())
}
