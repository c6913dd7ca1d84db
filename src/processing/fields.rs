// Generic pattern-table-driven field extraction with accumulated
// confidence scoring.

use super::patterns::{
    BASE_PATTERN_CONFIDENCE, DATE_SHAPE_BOOST, FIELD_PATTERNS, ID_SHAPE, ID_SHAPE_BOOST,
    LABEL_ADJACENCY_BOOST, LICENCE_SHAPE, LICENCE_SHAPE_BOOST, MAX_CONFIDENCE,
    PLAUSIBLE_YEAR_BOOST, STRICT_DATE_SHAPE,
};
use crate::models::{FieldCandidate, FieldName};
use log::debug;

/// Clean a raw capture for a numeric-shaped field before shape validation:
/// common digit/letter OCR confusions, stray spaces, case.
fn normalize_capture(field: FieldName, raw: &str) -> String {
    let value = raw.trim();
    match field {
        FieldName::LicenceNumber | FieldName::IdNumber => value
            .replace(' ', "")
            .replace('O', "0")
            .replace('o', "0")
            .replace('l', "1")
            .replace('I', "1")
            .replace('i', "1")
            .to_uppercase(),
        FieldName::DateOfBirth | FieldName::LicenceIssueDate => value
            .replace('O', "0")
            .replace('I', "1")
            .replace('l', "1")
            .replace('i', "1")
            .replace('|', "/"),
        _ => value.to_string(),
    }
}

fn plausible_year(value: &str) -> bool {
    value
        .rsplit('/')
        .next()
        .and_then(|y| y.parse::<u32>().ok())
        .map(|y| (1900..=2030).contains(&y))
        .unwrap_or(false)
}

fn shape_boost(field: FieldName, value: &str) -> i32 {
    match field {
        FieldName::LicenceNumber if LICENCE_SHAPE.is_match(value) => LICENCE_SHAPE_BOOST,
        FieldName::DateOfBirth | FieldName::LicenceIssueDate
            if STRICT_DATE_SHAPE.is_match(value) =>
        {
            DATE_SHAPE_BOOST + if plausible_year(value) { PLAUSIBLE_YEAR_BOOST } else { 0 }
        }
        FieldName::IdNumber if ID_SHAPE.is_match(value) => ID_SHAPE_BOOST,
        _ => 0,
    }
}

/// Run a field's ordered pattern rules against `text`, score every hit
/// (base confidence plus label-adjacency and shape boosts, capped at 100),
/// and return the single best candidate. `None` when nothing matched.
pub fn extract_field_value(text: &str, field: FieldName) -> Option<FieldCandidate> {
    let rules = FIELD_PATTERNS.get(&field)?;

    let mut hits: Vec<FieldCandidate> = Vec::new();
    for rule in rules {
        if let Some(caps) = rule.regex.captures(text) {
            let raw = caps
                .get(1)
                .or_else(|| caps.get(0))
                .map(|m| m.as_str())
                .unwrap_or_default();
            let value = normalize_capture(field, raw);
            if value.is_empty() {
                continue;
            }

            let mut score = BASE_PATTERN_CONFIDENCE;
            if rule.label_adjacent {
                score += LABEL_ADJACENCY_BOOST;
            }
            score += shape_boost(field, &value);
            score = score.clamp(0, MAX_CONFIDENCE);

            debug!(
                "field {}: pattern '{}' matched '{}' at confidence {}",
                field, rule.name, value, score
            );
            hits.push(FieldCandidate::new(
                value,
                score as u8,
                format!("pattern:{}", rule.name),
            ));
        }
    }

    // Stable sort: on equal confidence, earlier pattern order wins.
    hits.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    hits.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_licence_number_reaches_full_confidence() {
        let candidate = extract_field_value("Permis N° 06/269094", FieldName::LicenceNumber)
            .expect("licence number should match");
        assert_eq!(candidate.value, "06/269094");
        assert_eq!(candidate.confidence, 100);
        assert_eq!(candidate.source, "pattern:licence-label-fr");
    }

    #[test]
    fn test_bare_licence_number_scores_lower_than_labelled() {
        let candidate = extract_field_value("num 06/269094", FieldName::LicenceNumber).unwrap();
        // 60 base + 30 shape, no label adjacency.
        assert_eq!(candidate.confidence, 90);
    }

    #[test]
    fn test_id_number_shape_boost() {
        let candidate = extract_field_value("CT801898", FieldName::IdNumber).unwrap();
        assert_eq!(candidate.value, "CT801898");
        assert_eq!(candidate.confidence, 80);
    }

    #[test]
    fn test_ocr_confused_digits_are_repaired_before_scoring() {
        let candidate =
            extract_field_value("Permis N° O6/2690I4", FieldName::LicenceNumber).unwrap();
        assert_eq!(candidate.value, "06/269014");
        assert_eq!(candidate.confidence, 100);
    }

    #[test]
    fn test_lowercase_i_confusion_is_repaired() {
        // The case-insensitive label pattern captures a lowercase i, which
        // must become a digit rather than an uppercase I.
        let candidate =
            extract_field_value("Permis N° O6/2690i4", FieldName::LicenceNumber).unwrap();
        assert_eq!(candidate.value, "06/269014");
        assert_eq!(candidate.confidence, 100);
    }

    #[test]
    fn test_issue_date_requires_label() {
        // A bare date must not be claimed as an issue date.
        assert!(extract_field_value("15/06/2010", FieldName::LicenceIssueDate).is_none());
        let candidate =
            extract_field_value("DELIVRE A CASABLANCA LE 15/06/2010", FieldName::LicenceIssueDate)
                .unwrap();
        assert_eq!(candidate.value, "15/06/2010");
        assert_eq!(candidate.confidence, 100);
    }

    #[test]
    fn test_no_match_returns_none() {
        assert!(extract_field_value("مرحبا", FieldName::LicenceNumber).is_none());
    }
}
