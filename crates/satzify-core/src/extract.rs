//! Annotation extractors.
//!
//! An extractor looks at one token and decides whether its span is
//! highlighted, and with which label and color. Extractors are pure: the
//! answer depends only on the token, the active keys and the color table.
//!
//! ## Trait Objects vs Enums
//!
//! [`Category`](crate::Category) is a closed enum and hands out its
//! extractor from an exhaustive `match`. The extractors themselves sit
//! behind a trait so the span builder never needs to know which category
//! it is working for.

use satzify_tokens::Token;

use crate::colors::ColorTable;
use crate::morph::MorphFeatures;
use crate::registry::Category;
use crate::segment::RawEntry;
use crate::selection::ActiveKeys;
use crate::AnnotateResult;

/// Classifies a token for one category.
pub trait Extractor: Send + Sync {
    /// The category this extractor serves.
    fn category(&self) -> Category;

    /// Returns the span either plain or annotated.
    ///
    /// Fails only when a resolved key has no color.
    fn extract(
        &self,
        span: &str,
        token: &Token,
        active: &ActiveKeys,
        colors: &ColorTable,
    ) -> AnnotateResult<RawEntry>;
}

/// Highlights tokens whose coarse tag is active, labelled with the tag's
/// display name.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosExtractor;

impl Extractor for PosExtractor {
    fn category(&self) -> Category {
        Category::Pos
    }

    fn extract(
        &self,
        span: &str,
        token: &Token,
        active: &ActiveKeys,
        colors: &ColorTable,
    ) -> AnnotateResult<RawEntry> {
        if !active.contains(token.pos.as_str()) {
            return Ok(RawEntry::plain(span));
        }
        // Active keys are registry keys, but a hand-built set may not be
        let Some(settings) = Category::Pos.get(&token.pos) else {
            return Ok(RawEntry::plain(span));
        };
        let color = colors.get(settings.key)?;
        Ok(RawEntry::annotated(span, settings.name, color))
    }
}

/// Highlights tokens whose `Case` feature is active, labelled
/// `Case[+G]` where `G` is the first letter of the gender.
#[derive(Debug, Clone, Copy, Default)]
pub struct CasesExtractor;

impl Extractor for CasesExtractor {
    fn category(&self) -> Category {
        Category::Cases
    }

    fn extract(
        &self,
        span: &str,
        token: &Token,
        active: &ActiveKeys,
        colors: &ColorTable,
    ) -> AnnotateResult<RawEntry> {
        let morph = MorphFeatures::parse(&token.morph);
        let Some(case) = morph.case() else {
            return Ok(RawEntry::plain(span));
        };
        let key = case.to_uppercase();
        if !active.contains(&key) {
            return Ok(RawEntry::plain(span));
        }

        let color = colors.get(&key)?;
        let label = match morph.gender().and_then(|g| g.chars().next()) {
            Some(initial) => format!("{case}+{initial}"),
            None => case.to_string(),
        };
        Ok(RawEntry::annotated(span, label, color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Selection;
    use crate::AnnotateError;

    fn all(category: Category) -> ActiveKeys {
        Selection::all().keys(category).clone()
    }

    #[test]
    fn test_pos_active_tag() {
        let token = Token::new(0, "Wurst").with_pos("NOUN");
        let entry = PosExtractor
            .extract("Wurst ", &token, &all(Category::Pos), &ColorTable::defaults())
            .unwrap();
        assert_eq!(entry, RawEntry::annotated("Wurst ", "Noun", "#afa"));
    }

    #[test]
    fn test_pos_inactive_or_unknown_tag() {
        let colors = ColorTable::defaults();
        let det = Token::new(0, "die").with_pos("DET");
        let entry = PosExtractor
            .extract("die ", &det, &all(Category::Pos), &colors)
            .unwrap();
        assert_eq!(entry, RawEntry::plain("die "));

        let noun = Token::new(0, "Ende").with_pos("NOUN");
        let entry = PosExtractor
            .extract("Ende", &noun, &ActiveKeys::new(), &colors)
            .unwrap();
        assert_eq!(entry, RawEntry::plain("Ende"));
    }

    #[test]
    fn test_pos_missing_color() {
        let token = Token::new(0, "hat").with_pos("VERB");
        let mut colors = ColorTable::defaults();
        colors.remove("VERB");
        let err = PosExtractor
            .extract("hat ", &token, &all(Category::Pos), &colors)
            .unwrap_err();
        assert!(matches!(err, AnnotateError::MissingColor(k) if k == "VERB"));
    }

    #[test]
    fn test_cases_label_with_gender() {
        let token = Token::new(0, "die").with_morph("Case=Nom|Definite=Def|Gender=Fem|Number=Sing");
        let entry = CasesExtractor
            .extract("die ", &token, &all(Category::Cases), &ColorTable::defaults())
            .unwrap();
        assert_eq!(entry, RawEntry::annotated("die ", "Nom+F", "#afa"));
    }

    #[test]
    fn test_cases_label_without_gender() {
        let token = Token::new(0, "uns").with_morph("Case=Dat|Number=Plur|Person=1");
        let entry = CasesExtractor
            .extract("uns ", &token, &all(Category::Cases), &ColorTable::defaults())
            .unwrap();
        assert_eq!(entry, RawEntry::annotated("uns ", "Dat", "#8ef"));
    }

    #[test]
    fn test_cases_not_annotated() {
        let colors = ColorTable::defaults();
        let active = all(Category::Cases);
        for morph in ["", "Mood=Ind|Tense=Pres", "Case=Loc"] {
            let token = Token::new(0, "x").with_morph(morph);
            let entry = CasesExtractor.extract("x", &token, &active, &colors).unwrap();
            assert_eq!(entry, RawEntry::plain("x"), "morph {morph:?}");
        }

        let mut only_dat = ActiveKeys::new();
        only_dat.insert("DAT".to_string());
        let token = Token::new(0, "Hand").with_morph("Case=Acc");
        let entry = CasesExtractor.extract("Hand", &token, &only_dat, &colors).unwrap();
        assert_eq!(entry, RawEntry::plain("Hand"));
    }

    #[test]
    fn test_cases_malformed_parts_skipped() {
        let token = Token::new(0, "Dach").with_morph("Foreign|Case=Dat|Gender=Neut");
        let entry = CasesExtractor
            .extract("Dach", &token, &all(Category::Cases), &ColorTable::defaults())
            .unwrap();
        assert_eq!(entry, RawEntry::annotated("Dach", "Dat+N", "#8ef"));
    }

    #[test]
    fn test_category_dispatch() {
        for category in Category::ALL {
            assert_eq!(category.extractor().category(), category);
        }
    }
}
