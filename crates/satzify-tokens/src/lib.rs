//! # Satzify Tokens
//!
//! The token model shared by every stage of the annotation pipeline, and the
//! sources that produce tokens from raw text.
//!
//! ## Key Concepts
//!
//! ### Tokens are produced, never edited
//! - A [`TokenSource`] turns text into an ordered `Vec<Token>`
//! - Offsets are byte offsets into the analysed text, strictly increasing
//! - Everything downstream only borrows tokens (`&[Token]`)
//!
//! ### The parser lives elsewhere
//! Linguistic analysis is done by an external NLP engine. This crate reads
//! its output ([`AnalysisFile`]), offers an offline fallback
//! ([`WordTokenizer`]) and memoises results ([`CachedSource`]).

mod analysis;
mod cache;
mod source;
mod table;
mod token;
mod tree;

pub use analysis::{AnalysisFile, AnalyzedDocument, OffsetUnit};
pub use cache::CachedSource;
pub use source::{TokenSource, WordTokenizer};
pub use table::TokenTable;
pub use token::{validate_tokens, Token};
pub use tree::DependencyTree;

/// Result type for token operations
pub type TokenResult<T> = Result<T, TokenError>;

/// Errors that can occur while producing tokens
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("No analysis available for text: {0:?}")]
    NotAnalyzed(String),

    #[error("Token {index} has invalid offset {offset} (text length {len})")]
    InvalidOffset {
        index: usize,
        offset: usize,
        len: usize,
    },

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
