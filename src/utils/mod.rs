pub mod error;
pub mod text;

pub use error::ExtractionError;
pub use text::title_case;
