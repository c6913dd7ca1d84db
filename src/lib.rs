pub mod field_extractor;
pub mod models;
pub mod processing;
pub mod utils;

pub use field_extractor::{process_ocr_results, FieldExtractor};
pub use models::{ExtractionResult, FieldCandidate, FieldName, ScriptType};
