// Transcript preprocessing: noise stripping, dash and whitespace
// normalization, and repair of known label misreads. Line structure is
// preserved because the name recovery engine works on the line list.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Decorative glyphs the OCR engine emits around card artwork. The
    // degree sign stays: "N°" is a real label.
    static ref NOISE_GLYPHS: Regex = Regex::new(r"[•■□▪●◦☐¤©®«»™§†‡]").unwrap();
}

// Misreads of the "Permis" label seen in production transcripts. Fixing
// them here lets one label pattern serve all of them.
const LABEL_MISREADS: [(&str, &str); 4] = [
    ("Perrnis", "Permis"),
    ("Permls", "Permis"),
    ("Pernis", "Permis"),
    ("PERMlS", "PERMIS"),
];

const DASH_VARIANTS: [char; 6] = ['\u{2013}', '\u{2014}', '\u{2012}', '\u{2015}', '\u{2010}', '\u{2011}'];

/// Normalize a raw OCR transcript. Idempotent: running it on already-clean
/// text returns the same text.
pub fn preprocess_transcript(text: &str) -> String {
    let mut cleaned = NOISE_GLYPHS.replace_all(text, " ").into_owned();

    for dash in DASH_VARIANTS {
        cleaned = cleaned.replace(dash, "-");
    }
    for (wrong, right) in LABEL_MISREADS {
        cleaned = cleaned.replace(wrong, right);
    }

    cleaned
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace_per_line() {
        let raw = "PERMIS   DE\tCONDUIRE\n\n  رخصة السياقة  ";
        assert_eq!(preprocess_transcript(raw), "PERMIS DE CONDUIRE\nرخصة السياقة");
    }

    #[test]
    fn test_strips_noise_glyphs_and_normalizes_dashes() {
        let raw = "■ Permis N° 06/269094 «valable» 2010–2020";
        assert_eq!(preprocess_transcript(raw), "Permis N° 06/269094 valable 2010-2020");
    }

    #[test]
    fn test_repairs_known_label_misreads() {
        assert_eq!(preprocess_transcript("Perrnis N° 06/269094"), "Permis N° 06/269094");
    }

    #[test]
    fn test_idempotent_on_clean_text() {
        let raw = "•  Permls  N°   06/269094\nné le 08/09/1977 – EDMONTON";
        let once = preprocess_transcript(raw);
        assert_eq!(preprocess_transcript(&once), once);
    }
}
