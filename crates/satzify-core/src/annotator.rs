//! One rendering pass: tokens in, segments out.

use satzify_tokens::{Token, TokenSource};

use crate::colors::ColorTable;
use crate::config::Config;
use crate::merge::merge;
use crate::registry::Category;
use crate::segment::{Group, Segment};
use crate::selection::Selection;
use crate::spans::build_spans;
use crate::split::split;
use crate::AnnotateResult;

/// Active selection and colors for annotating texts.
#[derive(Debug, Clone, Default)]
pub struct Annotator {
    selection: Selection,
    colors: ColorTable,
}

impl Annotator {
    pub fn new(selection: Selection, colors: ColorTable) -> Self {
        Self { selection, colors }
    }

    /// Selection and colors as configured.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.selection(), config.color_table())
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut ColorTable {
        &mut self.colors
    }

    /// Annotates already tokenized text and merges equal neighbours.
    pub fn annotate(
        &self,
        category: Category,
        text: &str,
        tokens: &[Token],
    ) -> AnnotateResult<Vec<Segment>> {
        let entries = build_spans(
            text,
            tokens,
            category,
            self.selection.keys(category),
            &self.colors,
        )?;
        Ok(merge(entries))
    }

    /// Like [`Annotator::annotate`], then split into groups at `separator`.
    pub fn annotate_groups(
        &self,
        category: Category,
        text: &str,
        tokens: &[Token],
        separator: &str,
    ) -> AnnotateResult<Vec<Group>> {
        Ok(split(self.annotate(category, text, tokens)?, separator))
    }

    /// Tokenizes `text` with `source`, then annotates it.
    ///
    /// Token source failures are passed through unchanged.
    pub fn annotate_text<S: TokenSource + ?Sized>(
        &self,
        source: &S,
        category: Category,
        text: &str,
    ) -> AnnotateResult<Vec<Segment>> {
        let tokens = source.tokenize(text)?;
        self.annotate(category, text, &tokens)
    }
}
