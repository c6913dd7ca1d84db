// Domain-specific parsers for date, place, and name values recovered from
// noisy transcript fragments.

use super::extractors::extract_latin_text;
use super::script::detect_script;
use crate::models::ScriptType;
use lazy_static::lazy_static;
use regex::Regex;

pub const DATE_CONFIDENCE: f64 = 0.9;
pub const PLACE_CONFIDENCE: f64 = 0.8;
pub const LATIN_NAME_CONFIDENCE: f64 = 0.8;
pub const ARABIC_NAME_CONFIDENCE: f64 = 0.6;

const MIN_YEAR: u32 = 1900;
const MAX_YEAR: u32 = 2030;
const MIN_PLACE_LEN: usize = 3;
const MAX_PLACE_LEN: usize = 50;

/// Which capture position holds the day, month, and year.
#[derive(Debug, Clone, Copy)]
enum DateOrder {
    Dmy,
    Mdy,
    Ymd,
}

lazy_static! {
    // Tried strictly in priority order; only the first structurally-valid
    // match is used.
    static ref DATE_FORMS: Vec<(Regex, DateOrder)> = vec![
        (Regex::new(r"\b(\d{1,2})[/\-.](\d{1,2})[/\-.](\d{4})\b").unwrap(), DateOrder::Dmy),
        (Regex::new(r"\b(\d{1,2})[/\-.](\d{1,2})[/\-.](\d{4})\b").unwrap(), DateOrder::Mdy),
        (Regex::new(r"\b(\d{4})[/\-.](\d{1,2})[/\-.](\d{1,2})\b").unwrap(), DateOrder::Ymd),
        (Regex::new(r"\b(\d{1,2})\s+(\d{1,2})\s+(\d{4})\b").unwrap(), DateOrder::Dmy),
    ];
    static ref DATE_LIKE: Regex =
        Regex::new(r"\b\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}\b").unwrap();
    static ref PLACE_SHAPE: Regex =
        Regex::new(r"^[A-ZÀ-Ý]+(?:\s+[A-ZÀ-Ý]+)*$").unwrap();
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDate {
    pub date: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPlace {
    pub place: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    pub latin_name: String,
    pub arabic_name: String,
    pub primary: String,
    pub confidence: f64,
}

fn plausible(day: u32, month: u32, year: u32) -> bool {
    (1..=31).contains(&day) && (1..=12).contains(&month) && (MIN_YEAR..=MAX_YEAR).contains(&year)
}

/// Find the first date in `text` that validates against the plausibility
/// ranges and reformat it as DD/MM/YYYY at confidence 0.9. No scoring
/// across candidate dates takes place; pattern priority decides.
pub fn parse_date(text: &str) -> ParsedDate {
    for (pattern, order) in DATE_FORMS.iter() {
        if let Some(caps) = pattern.captures(text) {
            let a: u32 = caps[1].parse().unwrap_or(0);
            let b: u32 = caps[2].parse().unwrap_or(0);
            let c: u32 = caps[3].parse().unwrap_or(0);
            let (day, month, year) = match order {
                DateOrder::Dmy => (a, b, c),
                DateOrder::Mdy => (b, a, c),
                DateOrder::Ymd => (c, b, a),
            };
            if plausible(day, month, year) {
                return ParsedDate {
                    date: format!("{:02}/{:02}/{:04}", day, month, year),
                    confidence: DATE_CONFIDENCE,
                };
            }
        }
    }
    ParsedDate {
        date: String::new(),
        confidence: 0.0,
    }
}

/// Recover a place name from a transcript fragment: strip embedded dates if
/// requested, keep the Latin portion, and accept it only if it has the
/// all-caps-with-spaces shape of a printed place line.
pub fn parse_place(text: &str, strip_dates: bool) -> ParsedPlace {
    let stripped;
    let source = if strip_dates {
        stripped = DATE_LIKE.replace_all(text, " ").into_owned();
        stripped.as_str()
    } else {
        text
    };

    let latin = extract_latin_text(source);
    let len = latin.chars().count();
    if (MIN_PLACE_LEN..=MAX_PLACE_LEN).contains(&len) && PLACE_SHAPE.is_match(&latin) {
        ParsedPlace {
            place: latin,
            confidence: PLACE_CONFIDENCE,
        }
    } else {
        ParsedPlace {
            place: String::new(),
            confidence: 0.0,
        }
    }
}

fn is_uppercase_word(word: &str) -> bool {
    word.chars().any(|c| c.is_alphabetic()) && !word.chars().any(|c| c.is_lowercase())
}

/// Script-aware name split: the first Latin/mixed line with two or more
/// uppercase words becomes the Latin name, the first Arabic/mixed line the
/// Arabic name. `prefer_latin` picks the primary value.
pub fn parse_name(text: &str, prefer_latin: bool) -> ParsedName {
    let mut latin_name = String::new();
    let mut arabic_name = String::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let script = detect_script(line);

        if latin_name.is_empty() && matches!(script, ScriptType::Latin | ScriptType::Mixed) {
            let words: Vec<&str> = line.split_whitespace().collect();
            if words.len() >= 2 && words.iter().all(|w| is_uppercase_word(w)) {
                latin_name = line.to_string();
            }
        }
        if arabic_name.is_empty() && matches!(script, ScriptType::Arabic | ScriptType::Mixed) {
            arabic_name = line.to_string();
        }
        if !latin_name.is_empty() && !arabic_name.is_empty() {
            break;
        }
    }

    let confidence = if !latin_name.is_empty() {
        LATIN_NAME_CONFIDENCE
    } else if !arabic_name.is_empty() {
        ARABIC_NAME_CONFIDENCE
    } else {
        0.0
    };

    let primary = if prefer_latin {
        if latin_name.is_empty() {
            arabic_name.clone()
        } else {
            latin_name.clone()
        }
    } else if arabic_name.is_empty() {
        latin_name.clone()
    } else {
        arabic_name.clone()
    };

    ParsedName {
        latin_name,
        arabic_name,
        primary,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_valid_dmy() {
        let parsed = parse_date("15/03/1985");
        assert_eq!(parsed.date, "15/03/1985");
        assert_eq!(parsed.confidence, DATE_CONFIDENCE);
    }

    #[test]
    fn test_parse_date_rejects_out_of_range_month() {
        let parsed = parse_date("31/13/2024");
        assert_eq!(parsed.date, "");
        assert_eq!(parsed.confidence, 0.0);
    }

    #[test]
    fn test_parse_date_mdy_fallback() {
        // 3/25 is invalid as a month under DMY but valid as MDY.
        let parsed = parse_date("3/25/1990");
        assert_eq!(parsed.date, "25/03/1990");
    }

    #[test]
    fn test_parse_date_space_separated() {
        let parsed = parse_date("08 09 1977");
        assert_eq!(parsed.date, "08/09/1977");
    }

    #[test]
    fn test_parse_place_strips_dates_and_title_shape() {
        let parsed = parse_place("08/09/1977 EDMONTON CANADA", true);
        assert_eq!(parsed.place, "EDMONTON CANADA");
        assert_eq!(parsed.confidence, PLACE_CONFIDENCE);
    }

    #[test]
    fn test_parse_place_rejects_short_or_mixed_case() {
        assert_eq!(parse_place("ab", true).confidence, 0.0);
        assert_eq!(parse_place("Edmonton canada", true).confidence, 0.0);
    }

    #[test]
    fn test_parse_name_prefers_latin_line() {
        let text = "HUSSEIN AMRANI\nحسين العمراني";
        let parsed = parse_name(text, true);
        assert_eq!(parsed.latin_name, "HUSSEIN AMRANI");
        assert_eq!(parsed.arabic_name, "حسين العمراني");
        assert_eq!(parsed.primary, "HUSSEIN AMRANI");
        assert_eq!(parsed.confidence, LATIN_NAME_CONFIDENCE);
    }

    #[test]
    fn test_parse_name_arabic_only() {
        let parsed = parse_name("حسين العمراني", true);
        assert_eq!(parsed.primary, "حسين العمراني");
        assert_eq!(parsed.confidence, ARABIC_NAME_CONFIDENCE);
    }
}
