// Script-scoped text extraction built on the token filter.

use super::script::{filter_tokens_by_script, ScriptFilter, TokenFilterOptions};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Fixed battery of numeric shapes found on Moroccan licences: bare digit
    // runs, DD/MM/YYYY-like triplets, the two-letter CNIE shape, and the
    // NN/NNNNNN licence-number shape.
    static ref NUMERIC_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"\b\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}\b").unwrap(),
        Regex::new(r"\b[A-Z]{2}\d{6,8}\b").unwrap(),
        Regex::new(r"\b\d{2}/\d{6}\b").unwrap(),
        Regex::new(r"\d+").unwrap(),
    ];
}

const DEFAULT_MIN_DIGITS: usize = 1;
const DEFAULT_MAX_DIGITS: usize = 20;

fn extract_script_text(text: &str, preferred: ScriptFilter) -> String {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let options = TokenFilterOptions {
        allow_mixed: false,
        ..Default::default()
    };
    filter_tokens_by_script(&tokens, preferred, &options).join(" ")
}

/// Pull the pure-Latin portion out of mixed text, rejoined with single
/// spaces.
pub fn extract_latin_text(text: &str) -> String {
    extract_script_text(text, ScriptFilter::Latin)
}

/// Pull the pure-Arabic portion out of mixed text.
pub fn extract_arabic_text(text: &str) -> String {
    extract_script_text(text, ScriptFilter::Arabic)
}

/// Bounds on the digit count of accepted numeric tokens.
#[derive(Debug, Clone, Copy)]
pub struct NumericTokenOptions {
    pub min_digits: usize,
    pub max_digits: usize,
}

impl Default for NumericTokenOptions {
    fn default() -> Self {
        Self {
            min_digits: DEFAULT_MIN_DIGITS,
            max_digits: DEFAULT_MAX_DIGITS,
        }
    }
}

/// Collect every match of the numeric pattern battery, in pattern order,
/// keeping only matches whose digit count falls within the bounds. Matches
/// are not deduplicated; a date also yields its component digit runs.
pub fn extract_numeric_tokens(text: &str, options: NumericTokenOptions) -> Vec<String> {
    let mut matches = Vec::new();
    for pattern in NUMERIC_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            matches.push(m.as_str().to_string());
        }
    }

    matches
        .into_iter()
        .filter(|token| {
            let digits = token.chars().filter(|c| c.is_ascii_digit()).count();
            digits >= options.min_digits && digits <= options.max_digits
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_latin_text_drops_arabic_tokens() {
        let text = "PERMIS رخصة DE السياقة CONDUIRE";
        assert_eq!(extract_latin_text(text), "PERMIS DE CONDUIRE");
    }

    #[test]
    fn test_extract_arabic_text_drops_latin_tokens() {
        let text = "PERMIS رخصة DE السياقة";
        assert_eq!(extract_arabic_text(text), "رخصة السياقة");
    }

    #[test]
    fn test_extract_numeric_tokens_finds_licence_and_date_shapes() {
        let tokens = extract_numeric_tokens("Permis N° 06/269094 né le 08/09/1977", NumericTokenOptions::default());
        assert!(tokens.contains(&"06/269094".to_string()));
        assert!(tokens.contains(&"08/09/1977".to_string()));
    }

    #[test]
    fn test_extract_numeric_tokens_respects_digit_bounds() {
        let options = NumericTokenOptions {
            min_digits: 6,
            max_digits: 8,
        };
        let tokens = extract_numeric_tokens("CT801898 12 123456789", options);
        // The CNIE shape matches first, then the bare digit run inside it;
        // "12" and the nine-digit run fall outside the bounds.
        assert_eq!(tokens, vec!["CT801898", "801898"]);
    }
}
