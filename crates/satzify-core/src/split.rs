//! The group splitter.

use crate::segment::{Group, Segment};

/// Splits segments into groups at plain segments equal to `separator`.
///
/// Separators are dropped and never produce empty groups; order is kept.
/// Only plain segments can act as separators.
pub fn split(segments: impl IntoIterator<Item = Segment>, separator: &str) -> Vec<Group> {
    let mut groups = Vec::new();
    let mut current = Group::new();

    for segment in segments {
        if !matches!(&segment, Segment::Plain(text) if text == separator) {
            current.push(segment);
        } else if !current.is_empty() {
            groups.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}
