//! Fuzzy column resolution over schemaless records.
//!
//! Source spreadsheets disagree on language, accents, casing, and
//! space/underscore conventions for the same logical column. Lookups go
//! through an ordered alias list: keys are compared in a normalized form,
//! exact matches are preferred over substring containment, and earlier
//! aliases always win over later ones.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::data::{FieldValue, Record};
use crate::numeric::parse_numeric;
use crate::types::NormalizedKey;

/// Normalize a column name or alias for comparison.
///
/// Lowercases, strips diacritics via NFD decomposition, and removes all
/// whitespace and underscores, so `"Conjunto de Anúncios"`,
/// `"conjunto_de_anuncios"`, and `"CONJUNTO DE ANUNCIOS"` normalize alike.
pub fn normalize_key(raw: &str) -> NormalizedKey {
    raw.to_lowercase()
        .nfd()
        .filter(|ch| !is_combining_mark(*ch) && !ch.is_whitespace() && *ch != '_')
        .collect()
}

/// Resolve the best-matching field for an ordered alias list.
///
/// For each alias in priority order, record keys are scanned twice: first
/// for normalized equality, then for substring containment. The first match
/// carrying a usable value (not null, not empty text) wins; a matched key
/// with a missing value falls through to later matches and aliases.
pub fn find_value<'a>(record: &'a Record, aliases: &[&str]) -> Option<&'a FieldValue> {
    for alias in aliases {
        let wanted = normalize_key(alias);
        let exact = record.iter().filter_map(|(key, value)| {
            (normalize_key(key) == wanted).then_some(value)
        });
        let partial = record.iter().filter_map(|(key, value)| {
            let normalized = normalize_key(key);
            (normalized != wanted && normalized.contains(wanted.as_str())).then_some(value)
        });
        if let Some(value) = exact.chain(partial).find(|value| !value.is_missing()) {
            return Some(value);
        }
    }
    None
}

/// Returns `true` when any alias resolves to a usable value.
pub fn resolves(record: &Record, aliases: &[&str]) -> bool {
    find_value(record, aliases).is_some()
}

/// Resolve a field and render it as display text.
pub fn find_text(record: &Record, aliases: &[&str]) -> Option<String> {
    find_value(record, aliases).map(FieldValue::display)
}

/// Resolve a field and parse it as a locale-tolerant number (miss = zero).
pub fn find_number(record: &Record, aliases: &[&str]) -> f64 {
    parse_numeric(find_value(record, aliases))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_from(pairs: &[(&str, FieldValue)]) -> Record {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn normalization_folds_case_accents_and_separators() {
        assert_eq!(normalize_key("Conjunto de Anúncios"), "conjuntodeanuncios");
        assert_eq!(normalize_key("conjunto_de_anuncios"), "conjuntodeanuncios");
        assert_eq!(normalize_key("  Amount Spent "), "amountspent");
        assert_eq!(normalize_key("Impressões"), "impressoes");
    }

    #[test]
    fn alias_order_beats_key_order() {
        let record = record_from(&[
            ("investimento", FieldValue::Number(20.0)),
            ("Amount Spent", FieldValue::Number(10.0)),
        ]);
        let value = find_value(&record, &["Amount Spent", "investimento"]);
        assert_eq!(value, Some(&FieldValue::Number(10.0)));
    }

    #[test]
    fn accented_key_matches_plain_alias() {
        let record = record_from(&[(
            "Conjunto de Anúncios",
            FieldValue::Text("Conjunto A".into()),
        )]);
        assert_eq!(
            find_text(&record, &["Conjunto de Anuncios"]),
            Some("Conjunto A".to_string())
        );
    }

    #[test]
    fn exact_match_wins_over_substring_match() {
        let record = record_from(&[
            ("total leads qualificados", FieldValue::Number(99.0)),
            ("Leads", FieldValue::Number(7.0)),
        ]);
        let value = find_value(&record, &["leads"]);
        assert_eq!(value, Some(&FieldValue::Number(7.0)));
    }

    #[test]
    fn substring_containment_is_the_fallback() {
        let record = record_from(&[("Total de Unidades", FieldValue::Number(150.0))]);
        assert_eq!(find_number(&record, &["unidades"]), 150.0);
    }

    #[test]
    fn missing_values_fall_through_to_later_matches() {
        let record = record_from(&[
            ("Amount Spent", FieldValue::Null),
            ("investimento", FieldValue::Text("R$ 50,00".into())),
        ]);
        assert_eq!(find_number(&record, &["Amount Spent", "investimento"]), 50.0);

        let empty_then_partial = record_from(&[
            ("leads", FieldValue::Text(String::new())),
            ("leads_gerados", FieldValue::Number(4.0)),
        ]);
        assert_eq!(find_number(&empty_then_partial, &["leads"]), 4.0);
    }

    #[test]
    fn unresolvable_aliases_yield_none_and_zero() {
        let record = record_from(&[("whatever", FieldValue::Text("x".into()))]);
        assert_eq!(find_value(&record, &["VGV"]), None);
        assert!(!resolves(&record, &["VGV", "unidades"]));
        assert_eq!(find_number(&record, &["VGV"]), 0.0);
    }
}
