//! Pre-computed parser output.
//!
//! The NLP engine runs outside this program and writes its analysis as
//! JSON:
//!
//! ```json
//! {
//!   "language": "de",
//!   "offsets": "char",
//!   "documents": [
//!     { "text": "Ein Spatz.", "tokens": [{ "idx": 0, "text": "Ein", "pos_": "DET" }] }
//!   ]
//! }
//! ```
//!
//! Offsets written by Python tools count characters, not bytes, so they
//! are converted once at load time.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::{validate_tokens, Token, TokenError, TokenResult, TokenSource};

/// How token offsets in an analysis file are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetUnit {
    /// Unicode scalar values (what spaCy's `idx` counts)
    #[default]
    Char,
    /// UTF-8 bytes
    Byte,
}

/// One analysed text as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedDocument {
    pub text: String,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    offsets: OffsetUnit,
    documents: Vec<AnalyzedDocument>,
}

/// A token source backed by an analysis file.
///
/// Lookup is by exact text: a text that was not analysed yields
/// [`TokenError::NotAnalyzed`].
#[derive(Debug, Clone, Default)]
pub struct AnalysisFile {
    language: Option<String>,
    documents: HashMap<String, Vec<Token>>,
}

impl AnalysisFile {
    /// Loads an analysis from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> TokenResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Parses an analysis from JSON, converting offsets to bytes and
    /// checking every document against the token contract.
    pub fn from_json_str(json: &str) -> TokenResult<Self> {
        let raw: RawAnalysis = serde_json::from_str(json)?;
        let mut analysis = Self {
            language: raw.language,
            documents: HashMap::with_capacity(raw.documents.len()),
        };
        for document in raw.documents {
            analysis.insert(document, raw.offsets)?;
        }
        tracing::debug!(
            documents = analysis.documents.len(),
            language = ?analysis.language,
            "loaded analysis"
        );
        Ok(analysis)
    }

    /// Adds one analysed document.
    pub fn insert(&mut self, document: AnalyzedDocument, unit: OffsetUnit) -> TokenResult<()> {
        let AnalyzedDocument { text, mut tokens } = document;
        if unit == OffsetUnit::Char {
            chars_to_bytes(&text, &mut tokens)?;
        }
        validate_tokens(&text, &tokens)?;
        self.documents.insert(text, tokens);
        Ok(())
    }

    /// Language code declared by the analysis, if any.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Fails unless the analysis was produced for `expected`.
    ///
    /// An analysis without a declared language is accepted for any.
    pub fn ensure_language(&self, expected: &str) -> TokenResult<()> {
        match &self.language {
            Some(lang) if !lang.eq_ignore_ascii_case(expected) => {
                Err(TokenError::UnsupportedLanguage(lang.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Number of analysed texts.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Iterates over the analysed texts.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }
}

impl TokenSource for AnalysisFile {
    fn tokenize(&self, text: &str) -> TokenResult<Vec<Token>> {
        self.documents
            .get(text)
            .cloned()
            .ok_or_else(|| TokenError::NotAnalyzed(text.to_string()))
    }
}

/// Rewrites character offsets as byte offsets.
fn chars_to_bytes(text: &str, tokens: &mut [Token]) -> TokenResult<()> {
    let boundaries: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
    for (index, token) in tokens.iter_mut().enumerate() {
        token.offset = *boundaries
            .get(token.offset)
            .ok_or(TokenError::InvalidOffset {
                index,
                offset: token.offset,
                len: boundaries.len(),
            })?;
    }
    Ok(())
}
