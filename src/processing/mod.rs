pub mod extractors;
pub mod fields;
pub mod name_recovery;
pub mod parsers;
pub mod patterns;
pub mod preprocess;
pub mod script;

pub use extractors::{extract_arabic_text, extract_latin_text, extract_numeric_tokens};
pub use fields::extract_field_value;
pub use name_recovery::recover_name;
pub use parsers::{parse_date, parse_name, parse_place};
pub use preprocess::preprocess_transcript;
pub use script::{detect_script, filter_tokens_by_script, ScriptFilter, TokenFilterOptions};
