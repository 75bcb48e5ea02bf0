//! Locale-tolerant numeric parsing for mixed-format spreadsheet values.
//!
//! Source tables mix Brazilian and US formats (`"1.234,56"`, `"1,234.56"`,
//! `"R$ 45,00"`) and stray symbols. Parsing never fails: malformed input
//! degrades to zero so one bad cell cannot poison an aggregation pass.

use crate::data::FieldValue;

/// Parse a resolved field into a number, treating a miss as zero.
pub fn parse_numeric(value: Option<&FieldValue>) -> f64 {
    match value {
        Some(value) => parse_field(value),
        None => 0.0,
    }
}

/// Parse a single field value into a number.
///
/// Typed numbers pass through unchanged; null and booleans yield zero; text
/// goes through [`parse_numeric_str`].
pub fn parse_field(value: &FieldValue) -> f64 {
    match value {
        FieldValue::Null => 0.0,
        FieldValue::Bool(_) => 0.0,
        FieldValue::Number(number) => *number,
        FieldValue::Text(text) => parse_numeric_str(text),
    }
}

/// Parse locale-formatted numeric text.
///
/// Strips currency markers (`R$`, `BRL`) and whitespace, drops trailing
/// non-digit symbols, then disambiguates the decimal separator:
/// - both `,` and `.` present: the one appearing last is the decimal point,
///   the other is a thousands separator and is removed;
/// - only `,`: a fragment of at most two characters after the last comma
///   makes it the decimal point, otherwise commas are thousands separators;
/// - only `.`: a fragment longer than two characters after the last period
///   makes periods thousands separators, otherwise the point stays.
///
/// Anything that still fails to parse yields zero.
pub fn parse_numeric_str(raw: &str) -> f64 {
    let mut s: String = raw
        .chars()
        .filter(|ch| !matches!(*ch, 'R' | '$' | 'B' | 'L') && !ch.is_whitespace())
        .collect();

    while s.chars().last().is_some_and(|ch| !ch.is_ascii_digit()) {
        s.pop();
    }
    if s.is_empty() {
        return 0.0;
    }

    let last_comma = s.rfind(',');
    let last_period = s.rfind('.');
    match (last_comma, last_period) {
        (Some(comma), Some(period)) => {
            if comma > period {
                s = with_decimal_comma(&s);
            } else {
                s.retain(|ch| ch != ',');
            }
        }
        (Some(comma), None) => {
            if s[comma + 1..].chars().count() <= 2 {
                s = with_decimal_comma(&s);
            } else {
                s.retain(|ch| ch != ',');
            }
        }
        (None, Some(period)) => {
            if s[period + 1..].chars().count() > 2 {
                s.retain(|ch| ch != '.');
            }
        }
        (None, None) => {}
    }

    parse_lenient(&s)
}

/// Rewrite the last comma as the decimal point and drop every other separator.
fn with_decimal_comma(s: &str) -> String {
    let last_comma = s.rfind(',').unwrap_or(s.len());
    s.char_indices()
        .filter_map(|(idx, ch)| match ch {
            ',' if idx == last_comma => Some('.'),
            ',' | '.' => None,
            other => Some(other),
        })
        .collect()
}

/// Strict parse with a longest-numeric-prefix fallback.
///
/// Keeps partially numeric leftovers like `"12.34.56"` usable instead of
/// collapsing them to zero outright. Non-finite results count as failures.
fn parse_lenient(s: &str) -> f64 {
    if let Ok(value) = s.parse::<f64>() {
        return if value.is_finite() { value } else { 0.0 };
    }
    for end in (1..s.len()).rev() {
        if !s.is_char_boundary(end) {
            continue;
        }
        if let Ok(value) = s[..end].parse::<f64>() {
            return if value.is_finite() { value } else { 0.0 };
        }
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_values_round_trip_in_both_locales() {
        assert_eq!(parse_numeric_str("1.234,56"), 1234.56);
        assert_eq!(parse_numeric_str("1,234.56"), 1234.56);
        assert_eq!(parse_numeric_str("1234.56"), 1234.56);
        assert_eq!(parse_numeric_str("100"), 100.0);
        assert_eq!(parse_numeric_str("-45,00"), -45.0);
    }

    #[test]
    fn currency_markers_and_whitespace_are_stripped() {
        assert_eq!(parse_numeric_str("R$ 45,00"), 45.0);
        assert_eq!(parse_numeric_str("R$ 1.234,56 BRL"), 1234.56);
        assert_eq!(parse_numeric_str(" 1 234 "), 1234.0);
    }

    #[test]
    fn lone_comma_depends_on_fragment_length() {
        assert_eq!(parse_numeric_str("1,5"), 1.5);
        assert_eq!(parse_numeric_str("45,00"), 45.0);
        assert_eq!(parse_numeric_str("12,345"), 12345.0);
        assert_eq!(parse_numeric_str("1,234,567"), 1234567.0);
    }

    #[test]
    fn lone_period_is_thousands_only_for_long_fragments() {
        assert_eq!(parse_numeric_str("1.234"), 1234.0);
        assert_eq!(parse_numeric_str("45.5"), 45.5);
        assert_eq!(parse_numeric_str("45.50"), 45.5);
        assert_eq!(parse_numeric_str("1.234.567"), 1234567.0);
    }

    #[test]
    fn trailing_symbols_are_dropped_repeatedly() {
        assert_eq!(parse_numeric_str("45,00 %"), 45.0);
        assert_eq!(parse_numeric_str("89,"), 89.0);
        assert_eq!(parse_numeric_str("120.50*?"), 120.5);
    }

    #[test]
    fn garbage_and_empty_input_degrade_to_zero() {
        assert_eq!(parse_numeric_str(""), 0.0);
        assert_eq!(parse_numeric_str("---"), 0.0);
        assert_eq!(parse_numeric_str("abc"), 0.0);
        assert_eq!(parse_numeric_str("R$"), 0.0);
    }

    #[test]
    fn typed_values_pass_through_or_zero() {
        assert_eq!(parse_field(&FieldValue::Number(987.65)), 987.65);
        assert_eq!(parse_field(&FieldValue::Null), 0.0);
        assert_eq!(parse_field(&FieldValue::Bool(true)), 0.0);
        assert_eq!(parse_numeric(None), 0.0);
        assert_eq!(parse_numeric(Some(&FieldValue::Text("7".into()))), 7.0);
    }

    #[test]
    fn parsing_is_idempotent_on_its_own_output() {
        for raw in ["1.234,56", "R$ 89,90", "12,345"] {
            let parsed = parse_numeric_str(raw);
            assert_eq!(parse_numeric_str(&parsed.to_string()), parsed);
        }
    }
}
