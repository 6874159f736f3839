//! The token produced by a parser.
//!
//! ## Learning: Serde Aliases
//!
//! Parsers name their attributes differently (spaCy writes `idx`, `pos_`,
//! `lemma_`). `#[serde(alias = "...")]` lets one struct accept several
//! spellings without a hand-written `Deserialize` impl.

use serde::{Deserialize, Serialize};

use crate::{TokenError, TokenResult};

/// One token of analysed text.
///
/// Only `offset`, `text`, `pos` and `morph` matter for annotation. The other
/// attributes are carried along for the token table and the dependency tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Token {
    /// Byte offset of the token start in the analysed text
    #[serde(alias = "idx")]
    pub offset: usize,

    /// Surface form
    pub text: String,

    /// Coarse part-of-speech tag (e.g. `NOUN`), possibly empty
    #[serde(default, alias = "pos_")]
    pub pos: String,

    /// Morphological features, `Key=Value` pairs joined by `|`
    #[serde(default)]
    pub morph: String,

    /// Base form
    #[serde(default, alias = "lemma_")]
    pub lemma: String,

    /// Fine-grained tag
    #[serde(default, alias = "tag_")]
    pub tag: String,

    /// Dependency relation to the head
    #[serde(default, alias = "dep_")]
    pub dep: String,

    /// Index of the syntactic head within the same document
    #[serde(default)]
    pub head: Option<usize>,

    /// Whether the token starts a sentence
    #[serde(default)]
    pub is_sent_start: bool,
}

impl Token {
    /// Creates a token with only offset and surface text.
    pub fn new(offset: usize, text: impl Into<String>) -> Self {
        Self {
            offset,
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets the coarse part-of-speech tag.
    pub fn with_pos(mut self, pos: impl Into<String>) -> Self {
        self.pos = pos.into();
        self
    }

    /// Sets the morphological feature string.
    pub fn with_morph(mut self, morph: impl Into<String>) -> Self {
        self.morph = morph.into();
        self
    }

    /// Sets the dependency relation and head index.
    pub fn with_dep(mut self, dep: impl Into<String>, head: usize) -> Self {
        self.dep = dep.into();
        self.head = Some(head);
        self
    }

    /// Byte offset one past the surface form.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// Checks the token contract against the text the tokens came from.
///
/// Offsets must be strictly increasing, lie inside `[0, len)` and fall on
/// UTF-8 character boundaries.
pub fn validate_tokens(text: &str, tokens: &[Token]) -> TokenResult<()> {
    let mut previous: Option<usize> = None;
    for (index, token) in tokens.iter().enumerate() {
        let offset = token.offset;
        let increasing = previous.is_none_or(|p| offset > p);
        if offset >= text.len() || !increasing || !text.is_char_boundary(offset) {
            return Err(TokenError::InvalidOffset {
                index,
                offset,
                len: text.len(),
            });
        }
        previous = Some(offset);
    }
    Ok(())
}
