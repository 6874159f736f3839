//! The category registry.
//!
//! ## Learning: Closed Enums Instead of String Keys
//!
//! Categories could be looked up by name on every call, but then a typo is
//! only noticed at runtime, deep inside rendering. Parsing the name into a
//! [`Category`] once means every later `match` is checked for
//! exhaustiveness by the compiler.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::extract::{CasesExtractor, Extractor, PosExtractor};
use crate::AnnotateError;

/// Display settings for one annotatable key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySettings {
    /// Raw key as produced by the parser (or derived from it), e.g. `NOUN`
    pub key: &'static str,
    /// Human readable name, used as the annotation label for POS
    pub name: &'static str,
    /// Default highlight color, hex
    pub color: &'static str,
}

const fn key(key: &'static str, name: &'static str, color: &'static str) -> KeySettings {
    KeySettings { key, name, color }
}

const POS: &[KeySettings] = &[
    key("NOUN", "Noun", "#afa"),
    key("PRON", "Pronoun", "#fea"),
    key("VERB", "Verb", "#8ef"),
    key("ADJ", "Adjective", "#faa"),
    key("ADV", "Adverb", "#d94"),
    key("ADP", "Adposition", "#ccc"),
];

const CASES: &[KeySettings] = &[
    key("NOM", "Nominativ", "#afa"),
    key("ACC", "Akkusativ", "#fea"),
    key("DAT", "Dativ", "#8ef"),
    key("GEN", "Genetiv", "#faa"),
];

/// An annotatable category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Coarse part of speech
    Pos,
    /// Grammatical case, with gender when known
    Cases,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 2] = [Category::Pos, Category::Cases];

    /// Registry name.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Pos => "POS",
            Category::Cases => "CASES",
        }
    }

    /// Heading shown above the category's output.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Pos => "Parts of speech",
            Category::Cases => "Cases and genders",
        }
    }

    /// Keys of this category, in registry order.
    pub fn keys(&self) -> &'static [KeySettings] {
        match self {
            Category::Pos => POS,
            Category::Cases => CASES,
        }
    }

    /// Settings of a single key.
    pub fn get(&self, key: &str) -> Option<&'static KeySettings> {
        self.keys().iter().find(|k| k.key == key)
    }

    /// The extractor deciding which tokens of this category are highlighted.
    pub fn extractor(&self) -> &'static dyn Extractor {
        match self {
            Category::Pos => &PosExtractor,
            Category::Cases => &CasesExtractor,
        }
    }

    /// Maps display names back to keys, in registry order.
    ///
    /// Names not in the registry are ignored.
    pub fn names_to_keys<S: AsRef<str>>(&self, names: &[S]) -> Vec<&'static str> {
        self.keys()
            .iter()
            .filter(|k| names.iter().any(|n| n.as_ref() == k.name))
            .map(|k| k.key)
            .collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = AnnotateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AnnotateError::UnknownCategory(s.to_string()))
    }
}
