//! Output values of the pipeline.
//!
//! ## Learning: One Enum Instead of Runtime Type Checks
//!
//! A segment is either plain text or highlighted text. Encoding that as an
//! enum means the merger branches on the variant, and the compiler makes
//! sure every consumer handles both.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// The annotation of a single token, before merging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawEntry {
    /// Text that is not highlighted
    Plain(String),
    /// Text with a label and a color
    Annotated {
        text: String,
        label: String,
        color: String,
    },
}

impl RawEntry {
    pub fn plain(text: impl Into<String>) -> Self {
        RawEntry::Plain(text.into())
    }

    pub fn annotated(
        text: impl Into<String>,
        label: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        RawEntry::Annotated {
            text: text.into(),
            label: label.into(),
            color: color.into(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            RawEntry::Plain(text) | RawEntry::Annotated { text, .. } => text,
        }
    }

    pub fn is_annotated(&self) -> bool {
        matches!(self, RawEntry::Annotated { .. })
    }
}

/// A run of merged output: plain text, or one or more consecutive texts
/// sharing a label and color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    Plain(String),
    Annotated {
        texts: Vec<String>,
        label: String,
        color: String,
    },
}

/// Segments rendered together, e.g. one paragraph.
pub type Group = Vec<Segment>;

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Segment::Plain(text.into())
    }

    pub fn annotated<S: Into<String>>(
        texts: impl IntoIterator<Item = S>,
        label: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Segment::Annotated {
            texts: texts.into_iter().map(Into::into).collect(),
            label: label.into(),
            color: color.into(),
        }
    }

    pub fn is_annotated(&self) -> bool {
        matches!(self, Segment::Annotated { .. })
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Segment::Plain(_) => None,
            Segment::Annotated { label, .. } => Some(label),
        }
    }

    pub fn color(&self) -> Option<&str> {
        match self {
            Segment::Plain(_) => None,
            Segment::Annotated { color, .. } => Some(color),
        }
    }

    /// The covered text, with an annotated run's parts joined.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Segment::Plain(text) => Cow::Borrowed(text.as_str()),
            Segment::Annotated { texts, .. } if texts.len() == 1 => Cow::Borrowed(texts[0].as_str()),
            Segment::Annotated { texts, .. } => Cow::Owned(texts.concat()),
        }
    }

    /// Appends `other` to this run if both are annotated with the same
    /// label and color. Otherwise hands `other` back untouched.
    pub(crate) fn try_extend(&mut self, other: Segment) -> Result<(), Segment> {
        match (self, other) {
            (
                Segment::Annotated {
                    texts,
                    label,
                    color,
                },
                Segment::Annotated {
                    texts: more,
                    label: other_label,
                    color: other_color,
                },
            ) if *label == other_label && *color == other_color => {
                texts.extend(more);
                Ok(())
            }
            (_, other) => Err(other),
        }
    }
}

impl From<RawEntry> for Segment {
    fn from(entry: RawEntry) -> Self {
        match entry {
            RawEntry::Plain(text) => Segment::Plain(text),
            RawEntry::Annotated { text, label, color } => Segment::Annotated {
                texts: vec![text],
                label,
                color,
            },
        }
    }
}

/// Concatenates the text of every segment in order.
pub fn joined_text<'a>(segments: impl IntoIterator<Item = &'a Segment>) -> String {
    segments.into_iter().map(|s| s.text()).collect()
}
