//! The span builder.
//!
//! Each token owns the text from its own offset up to the next token's
//! offset (or the end of the text). Whitespace and punctuation between
//! tokens therefore belong to the token before them:
//!
//! ```text
//! "Ende, nur"   tokens: Ende@0  ,@4  nur@6
//!  ────         span of "Ende" = "Ende"
//!      ──       span of ","    = ", "
//!        ───    span of "nur"  = "nur"
//! ```

use satzify_tokens::{validate_tokens, Token};

use crate::colors::ColorTable;
use crate::registry::Category;
use crate::segment::RawEntry;
use crate::selection::ActiveKeys;
use crate::AnnotateResult;

/// Builds one raw entry per token, in token order.
///
/// Text before the first token (leading whitespace) becomes a plain entry of
/// its own, so the entries always cover `text` exactly. Fails if the tokens
/// violate the offset contract or a highlighted key has no color.
pub fn build_spans(
    text: &str,
    tokens: &[Token],
    category: Category,
    active: &ActiveKeys,
    colors: &ColorTable,
) -> AnnotateResult<Vec<RawEntry>> {
    validate_tokens(text, tokens)?;

    let extractor = category.extractor();
    let mut entries = Vec::with_capacity(tokens.len() + 1);

    let first = tokens.first().map_or(text.len(), |t| t.offset);
    if first > 0 {
        entries.push(RawEntry::plain(&text[..first]));
    }

    let ends = tokens.iter().skip(1).map(|t| t.offset).chain([text.len()]);
    for (token, end) in tokens.iter().zip(ends) {
        let span = &text[token.offset..end];
        entries.push(extractor.extract(span, token, active, colors)?);
    }

    tracing::trace!(%category, tokens = tokens.len(), entries = entries.len(), "built spans");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Selection;
    use crate::AnnotateError;

    fn tokens() -> Vec<Token> {
        vec![
            Token::new(0, "Ende").with_pos("NOUN"),
            Token::new(4, ",").with_pos("PUNCT"),
            Token::new(6, "nur").with_pos("ADV"),
        ]
    }

    #[test]
    fn test_spans_attach_trailing_material() {
        let selection = Selection::all();
        let entries = build_spans(
            "Ende, nur",
            &tokens(),
            Category::Pos,
            selection.keys(Category::Pos),
            &ColorTable::defaults(),
        )
        .unwrap();
        assert_eq!(
            entries,
            [
                RawEntry::annotated("Ende", "Noun", "#afa"),
                RawEntry::plain(", "),
                RawEntry::annotated("nur", "Adverb", "#d94"),
            ]
        );
    }

    #[test]
    fn test_last_span_runs_to_end() {
        let selection = Selection::none();
        let entries = build_spans(
            "Ende, nur  \n",
            &tokens(),
            Category::Pos,
            selection.keys(Category::Pos),
            &ColorTable::defaults(),
        )
        .unwrap();
        assert_eq!(entries.last().unwrap(), &RawEntry::plain("nur  \n"));
    }

    #[test]
    fn test_leading_text_kept() {
        let text = "  Hand";
        let tokens = vec![Token::new(2, "Hand").with_pos("NOUN")];
        let selection = Selection::all();
        let entries = build_spans(
            text,
            &tokens,
            Category::Pos,
            selection.keys(Category::Pos),
            &ColorTable::defaults(),
        )
        .unwrap();
        assert_eq!(entries[0], RawEntry::plain("  "));
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_no_tokens() {
        let active = ActiveKeys::new();
        let colors = ColorTable::defaults();
        let entries = build_spans("   ", &[], Category::Cases, &active, &colors).unwrap();
        assert_eq!(entries, [RawEntry::plain("   ")]);
        assert!(build_spans("", &[], Category::Cases, &active, &colors)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_invalid_offsets() {
        let tokens = vec![Token::new(3, "b"), Token::new(1, "a")];
        let err = build_spans(
            "a b c",
            &tokens,
            Category::Pos,
            &ActiveKeys::new(),
            &ColorTable::defaults(),
        )
        .unwrap_err();
        assert!(matches!(err, AnnotateError::Tokens(_)));
    }

    #[test]
    fn test_missing_color_surfaces() {
        let selection = Selection::all();
        let mut colors = ColorTable::defaults();
        colors.remove("ADV");
        let err = build_spans(
            "Ende, nur",
            &tokens(),
            Category::Pos,
            selection.keys(Category::Pos),
            &colors,
        )
        .unwrap_err();
        assert!(matches!(err, AnnotateError::MissingColor(k) if k == "ADV"));
    }
}
