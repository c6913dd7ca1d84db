// Script classification for mixed Arabic/Latin OCR transcripts.
// Classification is pure code-point range counting; no statistical
// language detection is involved.

use crate::models::ScriptType;
use regex::{Regex, RegexBuilder};

const ARABIC_DOMINANCE_THRESHOLD: f64 = 0.6;
const LATIN_DOMINANCE_THRESHOLD: f64 = 0.6;
const MIXED_PRESENCE_THRESHOLD: f64 = 0.2;

fn is_arabic_char(c: char) -> bool {
    matches!(c,
        '\u{0600}'..='\u{06FF}'   // Arabic
        | '\u{0750}'..='\u{077F}' // Arabic Supplement
        | '\u{08A0}'..='\u{08FF}' // Arabic Extended-A
        | '\u{FB50}'..='\u{FDFF}' // Presentation Forms-A
        | '\u{FE70}'..='\u{FEFF}' // Presentation Forms-B
    )
}

fn is_latin_char(c: char) -> bool {
    c.is_ascii_alphabetic()
        || (matches!(c, '\u{00C0}'..='\u{024F}') && c != '\u{00D7}' && c != '\u{00F7}')
}

/// Classify a text span by writing system.
///
/// Every character is bucketed as Arabic, Latin, ASCII digit, or other;
/// ratios are computed over all four buckets. Dominance above 0.6 decides
/// `Arabic`/`Latin`, balanced presence above 0.2 on both sides decides
/// `Mixed`, digits without letters decide `Numeric`, everything else
/// (including empty input) is `Unknown`. Total over all string inputs.
pub fn detect_script(text: &str) -> ScriptType {
    let mut arabic = 0usize;
    let mut latin = 0usize;
    let mut digits = 0usize;
    let mut other = 0usize;

    for c in text.chars() {
        if is_arabic_char(c) {
            arabic += 1;
        } else if is_latin_char(c) {
            latin += 1;
        } else if c.is_ascii_digit() {
            digits += 1;
        } else {
            other += 1;
        }
    }

    let total = arabic + latin + digits + other;
    if total == 0 {
        return ScriptType::Unknown;
    }

    let arabic_ratio = arabic as f64 / total as f64;
    let latin_ratio = latin as f64 / total as f64;

    if arabic_ratio > ARABIC_DOMINANCE_THRESHOLD {
        ScriptType::Arabic
    } else if latin_ratio > LATIN_DOMINANCE_THRESHOLD {
        ScriptType::Latin
    } else if arabic_ratio > MIXED_PRESENCE_THRESHOLD && latin_ratio > MIXED_PRESENCE_THRESHOLD {
        ScriptType::Mixed
    } else if digits > 0 && arabic == 0 && latin == 0 {
        ScriptType::Numeric
    } else {
        ScriptType::Unknown
    }
}

/// Target script for token filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFilter {
    Latin,
    Arabic,
    Numeric,
    /// Accept any token whose script is not `Unknown`.
    Any,
}

/// Options for [`filter_tokens_by_script`].
#[derive(Debug, Clone)]
pub struct TokenFilterOptions {
    pub allow_mixed: bool,
    pub min_token_length: usize,
    pub exclude_patterns: Vec<Regex>,
}

impl Default for TokenFilterOptions {
    fn default() -> Self {
        Self {
            allow_mixed: true,
            min_token_length: 1,
            exclude_patterns: Vec::new(),
        }
    }
}

impl TokenFilterOptions {
    /// Compiles exclusion patterns case-insensitively. Invalid pattern
    /// sources are skipped rather than failing the whole filter.
    pub fn with_exclude_patterns(mut self, sources: &[&str]) -> Self {
        self.exclude_patterns = sources
            .iter()
            .filter_map(|s| RegexBuilder::new(s).case_insensitive(true).build().ok())
            .collect();
        self
    }
}

/// Return the subset of `tokens` matching `preferred`, applying minimum
/// length and exclusion rules first. Tokens that trim to empty are dropped
/// silently.
pub fn filter_tokens_by_script(
    tokens: &[&str],
    preferred: ScriptFilter,
    options: &TokenFilterOptions,
) -> Vec<String> {
    let mut kept = Vec::new();

    for token in tokens {
        let trimmed = token.trim();
        if trimmed.chars().count() < options.min_token_length.max(1) {
            continue;
        }
        if options.exclude_patterns.iter().any(|p| p.is_match(trimmed)) {
            continue;
        }

        let script = detect_script(trimmed);
        let accepted = match preferred {
            ScriptFilter::Latin => {
                script == ScriptType::Latin
                    || script == ScriptType::Numeric
                    || (options.allow_mixed && script == ScriptType::Mixed)
            }
            ScriptFilter::Arabic => {
                script == ScriptType::Arabic
                    || (options.allow_mixed && script == ScriptType::Mixed)
            }
            ScriptFilter::Numeric => {
                script == ScriptType::Numeric || trimmed.chars().all(|c| c.is_ascii_digit())
            }
            ScriptFilter::Any => script != ScriptType::Unknown,
        };

        if accepted {
            kept.push(trimmed.to_string());
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_script_arabic() {
        assert_eq!(detect_script("مرحبا"), ScriptType::Arabic);
    }

    #[test]
    fn test_detect_script_latin() {
        assert_eq!(detect_script("HELLO"), ScriptType::Latin);
    }

    #[test]
    fn test_detect_script_balanced_mix() {
        assert_eq!(detect_script("abc مرحبا"), ScriptType::Mixed);
    }

    #[test]
    fn test_detect_script_numeric() {
        assert_eq!(detect_script("12345"), ScriptType::Numeric);
    }

    #[test]
    fn test_detect_script_empty_and_whitespace() {
        assert_eq!(detect_script(""), ScriptType::Unknown);
        assert_eq!(detect_script("   "), ScriptType::Unknown);
    }

    #[test]
    fn test_detect_script_accented_latin() {
        assert_eq!(detect_script("Kénitra"), ScriptType::Latin);
    }

    #[test]
    fn test_filter_keeps_preferred_script_only() {
        let tokens = ["AMRANI", "العمراني", "1977", ""];
        let options = TokenFilterOptions {
            allow_mixed: false,
            ..Default::default()
        };
        let latin = filter_tokens_by_script(&tokens, ScriptFilter::Latin, &options);
        assert_eq!(latin, vec!["AMRANI", "1977"]);
        let arabic = filter_tokens_by_script(&tokens, ScriptFilter::Arabic, &options);
        assert_eq!(arabic, vec!["العمراني"]);
    }

    #[test]
    fn test_filter_applies_exclusions_and_min_length() {
        let tokens = ["PERMIS", "AMRANI", "DE"];
        let options = TokenFilterOptions {
            min_token_length: 3,
            ..Default::default()
        }
        .with_exclude_patterns(&["^permis$"]);
        let kept = filter_tokens_by_script(&tokens, ScriptFilter::Latin, &options);
        assert_eq!(kept, vec!["AMRANI"]);
    }
}
