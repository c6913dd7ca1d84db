use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Writing system detected for a span of text, derived from Unicode
/// code-point ranges. Never persisted; recomputed per span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptType {
    Arabic,
    Latin,
    Mixed,
    Numeric,
    Unknown,
}

/// The eight canonical licence fields. This set is closed: downstream
/// consumers expect exactly these keys, so it must not grow or shrink
/// without a domain decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    LicenceNumber,
    FullName,
    DateOfBirth,
    PlaceOfBirth,
    IdNumber,
    LicenceIssueDate,
    LicenceIssueLocation,
    Nationality,
}

impl FieldName {
    /// All canonical fields in extraction order.
    pub const ALL: [FieldName; 8] = [
        FieldName::LicenceNumber,
        FieldName::FullName,
        FieldName::DateOfBirth,
        FieldName::PlaceOfBirth,
        FieldName::IdNumber,
        FieldName::LicenceIssueDate,
        FieldName::LicenceIssueLocation,
        FieldName::Nationality,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::LicenceNumber => "licence_number",
            FieldName::FullName => "full_name",
            FieldName::DateOfBirth => "date_of_birth",
            FieldName::PlaceOfBirth => "place_of_birth",
            FieldName::IdNumber => "id_number",
            FieldName::LicenceIssueDate => "licence_issue_date",
            FieldName::LicenceIssueLocation => "licence_issue_location",
            FieldName::Nationality => "nationality",
        }
    }

    /// Human-readable label used in error messages and reports.
    pub fn label(&self) -> &'static str {
        match self {
            FieldName::LicenceNumber => "licence number",
            FieldName::FullName => "full name",
            FieldName::DateOfBirth => "date of birth",
            FieldName::PlaceOfBirth => "place of birth",
            FieldName::IdNumber => "ID number",
            FieldName::LicenceIssueDate => "licence issue date",
            FieldName::LicenceIssueLocation => "licence issue location",
            FieldName::Nationality => "nationality",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate value produced by an extraction strategy. `source` records
/// which strategy produced it (e.g. "label", "uppercase", "arabic",
/// "document-specific", "pattern:<name>") for debugging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCandidate {
    pub value: String,
    pub confidence: u8,
    pub source: String,
}

impl FieldCandidate {
    pub fn new(value: impl Into<String>, confidence: u8, source: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            confidence: confidence.min(100),
            source: source.into(),
        }
    }
}

/// Output of the extraction orchestrator. `fields` and `confidences` always
/// carry exactly the eight canonical keys; confidences are integers in
/// [0, 100].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub fields: BTreeMap<FieldName, String>,
    pub confidences: BTreeMap<FieldName, u8>,
    pub overall_confidence: u8,
    pub errors: Option<Vec<String>>,
    pub summary: String,
    pub extracted_fields_count: usize,
    pub processing_timestamp: String,
}

impl ExtractionResult {
    pub fn field(&self, name: FieldName) -> &str {
        self.fields.get(&name).map(String::as_str).unwrap_or("")
    }

    pub fn confidence(&self, name: FieldName) -> u8 {
        self.confidences.get(&name).copied().unwrap_or(0)
    }
}

/// A field shaped for the customer-record consumer: value plus confidence
/// rescaled to 0.0-1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedField {
    pub value: String,
    pub confidence: f64,
}

/// Consumer-shaped extraction payload. The raw field values are duplicated
/// at the top level of the serialized object for convenience.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedOcrResults {
    pub fields: BTreeMap<FieldName, ProcessedField>,
    #[serde(flatten)]
    pub raw_values: BTreeMap<FieldName, String>,
    pub overall_confidence: u8,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_serializes_to_canonical_key() {
        let json = serde_json::to_string(&FieldName::LicenceIssueDate).unwrap();
        assert_eq!(json, "\"licence_issue_date\"");
    }

    #[test]
    fn test_all_contains_eight_distinct_fields() {
        let mut seen: Vec<&str> = FieldName::ALL.iter().map(|f| f.as_str()).collect();
        seen.dedup();
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_candidate_confidence_is_capped() {
        let candidate = FieldCandidate::new("06/269094", 130, "pattern:licence");
        assert_eq!(candidate.confidence, 100);
    }
}
