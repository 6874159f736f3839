//! The run merger.
//!
//! Neighbouring annotated entries with the same label and color become one
//! segment listing each entry's text. Plain entries are never merged, not
//! even with an identical plain neighbour: a renderer must still see every
//! unannotated chunk on its own.

use crate::segment::Segment;

/// Coalesces maximal runs of equally annotated entries, keeping order.
///
/// Accepts raw entries as well as already merged segments. An annotated
/// segment is treated as one unit keyed by its label and color, which makes
/// merging idempotent: `merge(merge(x)) == merge(x)`.
pub fn merge<E: Into<Segment>>(entries: impl IntoIterator<Item = E>) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::new();
    for entry in entries {
        let segment = match merged.last_mut() {
            Some(last) => match last.try_extend(entry.into()) {
                Ok(()) => continue,
                Err(segment) => segment,
            },
            None => entry.into(),
        };
        merged.push(segment);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{joined_text, RawEntry};
    use proptest::prelude::*;

    #[test]
    fn test_merges_equal_neighbours() {
        let entries = vec![
            RawEntry::annotated("Alles ", "Nom+N", "#afa"),
            RawEntry::plain("hat "),
            RawEntry::annotated("ein ", "Acc+N", "#fea"),
            RawEntry::annotated("Ende", "Acc+N", "#fea"),
            RawEntry::plain(", "),
        ];
        assert_eq!(
            merge(entries),
            [
                Segment::annotated(["Alles "], "Nom+N", "#afa"),
                Segment::plain("hat "),
                Segment::annotated(["ein ", "Ende"], "Acc+N", "#fea"),
                Segment::plain(", "),
            ]
        );
    }

    #[test]
    fn test_plain_entries_never_merge() {
        let entries = vec![RawEntry::plain("a "), RawEntry::plain("a "), RawEntry::plain("b")];
        assert_eq!(
            merge(entries),
            [Segment::plain("a "), Segment::plain("a "), Segment::plain("b")]
        );
    }

    #[test]
    fn test_same_label_different_color_not_merged() {
        let entries = vec![
            RawEntry::annotated("der ", "Dat+F", "#8ef"),
            RawEntry::annotated("Hand", "Dat+F", "#000"),
        ];
        assert_eq!(merge(entries).len(), 2);
    }

    #[test]
    fn test_plain_breaks_run() {
        let entries = vec![
            RawEntry::annotated("Wurst ", "Noun", "#afa"),
            RawEntry::plain("und "),
            RawEntry::annotated("Brot", "Noun", "#afa"),
        ];
        assert_eq!(merge(entries).len(), 3);
    }

    #[test]
    fn test_empty() {
        assert!(merge(Vec::<RawEntry>::new()).is_empty());
    }

    fn raw_entry() -> impl Strategy<Value = RawEntry> {
        prop_oneof![
            "[a-z ,.]{0,4}".prop_map(RawEntry::Plain),
            ("[a-z]{1,4} ?", 0..3usize, 0..2usize).prop_map(|(text, label, color)| {
                RawEntry::annotated(text, ["Noun", "Verb", "Nom+F"][label], ["#afa", "#8ef"][color])
            }),
        ]
    }

    proptest! {
        #[test]
        fn prop_merge_is_idempotent(entries in prop::collection::vec(raw_entry(), 0..40)) {
            let once = merge(entries);
            let twice = merge(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_merge_preserves_text(entries in prop::collection::vec(raw_entry(), 0..40)) {
            let expected: String = entries.iter().map(RawEntry::text).collect();
            let merged = merge(entries);
            prop_assert_eq!(joined_text(&merged), expected);
        }

        #[test]
        fn prop_plain_count_unchanged(entries in prop::collection::vec(raw_entry(), 0..40)) {
            let plain_in = entries.iter().filter(|e| !e.is_annotated()).count();
            let merged = merge(entries);
            let plain_out = merged.iter().filter(|s| !s.is_annotated()).count();
            prop_assert_eq!(plain_in, plain_out);
        }

        #[test]
        fn prop_no_equal_annotated_neighbours(entries in prop::collection::vec(raw_entry(), 0..40)) {
            let merged = merge(entries);
            for pair in merged.windows(2) {
                if pair[0].is_annotated() && pair[1].is_annotated() {
                    prop_assert!(
                        (pair[0].label(), pair[0].color()) != (pair[1].label(), pair[1].color())
                    );
                }
            }
        }
    }
}
