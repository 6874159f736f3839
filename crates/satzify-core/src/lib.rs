//! # Satzify Core
//!
//! Turns a parsed sentence into alternating runs of plain and highlighted
//! text.
//!
//! ## Architecture Overview
//!
//! ```text
//!  text + tokens ──► Span Builder ──► Run Merger ──► Group Splitter ──► renderer
//!                        │
//!            ┌───────────┴───────────┐
//!            │  Category (registry)  │
//!            │  Extractor per kind   │
//!            │  Selection + Colors   │
//!            └───────────────────────┘
//! ```
//!
//! - [`build_spans`] gives every token its slice of the text (trailing
//!   whitespace and punctuation included) and asks the category's
//!   [`Extractor`] whether it is highlighted.
//! - [`merge`] coalesces neighbouring entries with the same label and color.
//! - [`split`] cuts the result into groups at a separator (paragraphs).
//!
//! ## Learning: Pure Functions
//!
//! None of the stages hold state. Each is a function from values to values,
//! which keeps them trivially testable and safe to run on many texts in
//! parallel.

pub mod annotator;
pub mod colors;
pub mod config;
pub mod extract;
pub mod merge;
pub mod morph;
pub mod registry;
pub mod segment;
pub mod selection;
pub mod spans;
pub mod split;

pub use annotator::Annotator;
pub use colors::ColorTable;
pub use config::{Config, ConfigError, OutputFormat};
pub use extract::{CasesExtractor, Extractor, PosExtractor};
pub use merge::merge;
pub use morph::MorphFeatures;
pub use registry::{Category, KeySettings};
pub use segment::{Group, RawEntry, Segment};
pub use selection::{ActiveKeys, Selection};
pub use spans::build_spans;
pub use split::split;

/// The sentence shown when no text is given.
pub const EXAMPLE_TEXT: &str = "Besser ein Spatz in der Hand, als eine Taube auf dem Dach.";

/// Language the category tables were written for.
pub const LANGUAGE: &str = "de";

/// Default separator between independently rendered groups.
pub const DEFAULT_SEPARATOR: &str = "\n";

/// Result type for annotation operations
pub type AnnotateResult<T> = Result<T, AnnotateError>;

/// Errors that can occur while annotating text
#[derive(Debug, thiserror::Error)]
pub enum AnnotateError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown key {key:?} for category {category}")]
    UnknownKey { category: Category, key: String },

    #[error("No color assigned to key {0:?}")]
    MissingColor(String),

    #[error("Malformed morphological feature {part:?} in {morph:?}")]
    MalformedMorph { morph: String, part: String },

    #[error("Invalid tokens: {0}")]
    Tokens(#[from] satzify_tokens::TokenError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AnnotateError::UnknownCategory("TENSES".into()).to_string(),
            "Unknown category: TENSES"
        );
        assert_eq!(
            AnnotateError::MissingColor("NOUN".into()).to_string(),
            "No color assigned to key \"NOUN\""
        );
        let err = AnnotateError::UnknownKey {
            category: Category::Pos,
            key: "DET".into(),
        };
        assert_eq!(err.to_string(), "Unknown key \"DET\" for category POS");
    }
}
