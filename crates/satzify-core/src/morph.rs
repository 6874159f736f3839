//! Morphological feature strings (`Case=Nom|Gender=Fem|Number=Sing`).
//!
//! A part with anything other than exactly one `=` is malformed.
//! [`MorphFeatures::parse`] skips malformed parts and keeps the rest, which
//! is what annotation uses. [`MorphFeatures::parse_strict`] rejects them and
//! is meant for validating an analysis up front.

use crate::{AnnotateError, AnnotateResult};

/// Parsed feature pairs, borrowing from the original string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MorphFeatures<'a> {
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> MorphFeatures<'a> {
    /// Parses leniently: malformed parts are logged and dropped.
    pub fn parse(morph: &'a str) -> Self {
        let pairs = split_parts(morph)
            .filter_map(|part| {
                let pair = split_pair(part);
                if pair.is_none() {
                    tracing::debug!(morph, part, "skipping malformed feature");
                }
                pair
            })
            .collect();
        Self { pairs }
    }

    /// Parses strictly: the first malformed part is an error.
    pub fn parse_strict(morph: &'a str) -> AnnotateResult<Self> {
        let pairs = split_parts(morph)
            .map(|part| {
                split_pair(part).ok_or_else(|| AnnotateError::MalformedMorph {
                    morph: morph.to_string(),
                    part: part.to_string(),
                })
            })
            .collect::<AnnotateResult<_>>()?;
        Ok(Self { pairs })
    }

    /// Value of a feature. A repeated feature resolves to its last value.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    /// Grammatical case (`Case`), if present and non-empty.
    pub fn case(&self) -> Option<&'a str> {
        self.get("Case").filter(|v| !v.is_empty())
    }

    /// Grammatical gender (`Gender`), if present and non-empty.
    pub fn gender(&self) -> Option<&'a str> {
        self.get("Gender").filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.pairs.iter().copied()
    }
}

/// An empty string has no parts at all, not one empty part.
fn split_parts(morph: &str) -> impl Iterator<Item = &str> {
    morph.split('|').filter(move |_| !morph.is_empty())
}

fn split_pair(part: &str) -> Option<(&str, &str)> {
    let mut pieces = part.split('=');
    match (pieces.next(), pieces.next(), pieces.next()) {
        (Some(key), Some(value), None) => Some((key, value)),
        _ => None,
    }
}
