use crate::models::{ExtractionResult, FieldName, ProcessedField, ProcessedOcrResults};
use crate::processing::name_recovery::recover_name;
use crate::processing::parsers::parse_date;
use crate::processing::patterns::{
    has_kingdom_header, DEFAULT_NATIONALITY, NATIONALITY_FALLBACK_CONFIDENCE,
    NATIONALITY_HEADER_CONFIDENCE,
};
use crate::processing::preprocess::preprocess_transcript;
use crate::processing::extract_field_value;
use crate::utils::title_case;
use chrono::Utc;
use log::{debug, info};
use std::collections::BTreeMap;

pub const DEFAULT_MIN_CONFIDENCE: u8 = 60;

pub struct FieldExtractor;

impl FieldExtractor {
    pub fn new() -> Self {
        FieldExtractor
    }

    // Main extraction function that orchestrates the entire pipeline.
    // Never fails: malformed transcripts degrade to empty fields plus
    // `errors` entries.
    pub fn extract_fields_from_ocr(&self, ocr_text: &str, min_confidence: u8) -> ExtractionResult {
        // Step 1: normalize the raw transcript.
        let cleaned = preprocess_transcript(ocr_text);

        let mut fields = BTreeMap::new();
        let mut confidences = BTreeMap::new();
        let mut errors = Vec::new();

        if cleaned.trim().is_empty() {
            errors.push("OCR transcript is empty; nothing to extract".to_string());
        }

        // Step 2: run each canonical field's extractor in fixed order.
        for field in FieldName::ALL {
            let candidate = match field {
                FieldName::FullName => Some(recover_name(&cleaned)),
                _ => extract_field_value(&cleaned, field),
            };

            let (value, confidence) = match candidate {
                Some(candidate) => {
                    debug!(
                        "{}: '{}' at {}% via {}",
                        field, candidate.value, candidate.confidence, candidate.source
                    );
                    (normalize_field(field, candidate.value), candidate.confidence)
                }
                None if field == FieldName::Nationality => nationality_default(&cleaned),
                None => (String::new(), 0),
            };

            // Step 3: record every result, low-confidence ones included;
            // the caller decides what to discard.
            if value.is_empty() && confidence == 0 {
                errors.push(format!("Could not extract {}", field.label()));
            } else if confidence < min_confidence {
                errors.push(format!(
                    "Low confidence for {} ({}%)",
                    field.label(),
                    confidence
                ));
            }
            fields.insert(field, value);
            confidences.insert(field, confidence);
        }

        // Step 4: aggregate. Zero-confidence fields do not drag down the
        // overall average.
        let positive: Vec<u8> = confidences.values().copied().filter(|c| *c > 0).collect();
        let overall_confidence = if positive.is_empty() {
            0
        } else {
            let sum: u32 = positive.iter().map(|c| *c as u32).sum();
            (sum as f64 / positive.len() as f64).round() as u8
        };

        let extracted_fields_count = FieldName::ALL
            .iter()
            .filter(|f| confidences[f] >= min_confidence && !fields[f].is_empty())
            .count();
        let summary = format!("✅ {} fields extracted successfully", extracted_fields_count);
        info!(
            "extraction finished: {} of 8 fields at or above {}%, overall {}%",
            extracted_fields_count, min_confidence, overall_confidence
        );

        ExtractionResult {
            fields,
            confidences,
            overall_confidence,
            errors: if errors.is_empty() { None } else { Some(errors) },
            summary,
            extracted_fields_count,
            processing_timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Field-specific normalization applied after extraction: dates reformatted
/// to DD/MM/YYYY, places title-cased, document numbers upper-cased.
fn normalize_field(field: FieldName, value: String) -> String {
    match field {
        FieldName::DateOfBirth | FieldName::LicenceIssueDate => {
            let parsed = parse_date(&value);
            if parsed.date.is_empty() {
                value
            } else {
                parsed.date
            }
        }
        FieldName::PlaceOfBirth | FieldName::LicenceIssueLocation => title_case(&value),
        FieldName::LicenceNumber | FieldName::IdNumber => value.to_uppercase(),
        FieldName::Nationality => normalize_nationality(&value),
        FieldName::FullName => value,
    }
}

fn normalize_nationality(value: &str) -> String {
    if value.to_uppercase().contains("MAROC") || value.contains("المغرب") {
        DEFAULT_NATIONALITY.to_string()
    } else {
        title_case(value)
    }
}

// All processed documents are Moroccan licences, so nationality keeps a
// default even without an explicit match. The kingdom header earns the
// higher confidence.
fn nationality_default(cleaned: &str) -> (String, u8) {
    let confidence = if has_kingdom_header(cleaned) {
        NATIONALITY_HEADER_CONFIDENCE
    } else {
        NATIONALITY_FALLBACK_CONFIDENCE
    };
    (DEFAULT_NATIONALITY.to_string(), confidence)
}

/// Shape an extraction for the customer-record consumer: per-field value
/// plus confidence rescaled to 0.0-1.0, with the raw values duplicated at
/// the top level of the serialized payload.
pub fn process_ocr_results(ocr_text: &str, min_confidence: u8) -> ProcessedOcrResults {
    let result = FieldExtractor::new().extract_fields_from_ocr(ocr_text, min_confidence);

    let mut shaped = BTreeMap::new();
    for field in FieldName::ALL {
        shaped.insert(
            field,
            ProcessedField {
                value: result.field(field).to_string(),
                confidence: result.confidence(field) as f64 / 100.0,
            },
        );
    }

    ProcessedOcrResults {
        fields: shaped,
        raw_values: result.fields.clone(),
        overall_confidence: result.overall_confidence,
        summary: result.summary.clone(),
    }
}
