//! Tabular view of tokens for debugging an analysis.

use std::fmt;
use unicode_width::UnicodeWidthStr;

use crate::Token;

const HEADERS: [&str; 9] = [
    "offset", "text", "lemma", "pos", "tag", "dep", "head", "morph", "sent_start",
];

/// Every token attribute rendered as a string, one row per token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTable {
    rows: Vec<[String; 9]>,
}

impl TokenTable {
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let rows = tokens
            .iter()
            .map(|t| {
                [
                    t.offset.to_string(),
                    t.text.clone(),
                    t.lemma.clone(),
                    t.pos.clone(),
                    t.tag.clone(),
                    t.dep.clone(),
                    t.head.map(|h| h.to_string()).unwrap_or_default(),
                    t.morph.clone(),
                    t.is_sent_start.to_string(),
                ]
            })
            .collect();
        Self { rows }
    }

    /// Column names, in display order.
    pub fn headers() -> &'static [&'static str] {
        &HEADERS
    }

    pub fn rows(&self) -> &[[String; 9]] {
        &self.rows
    }

    /// Values of a single column by header name.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = HEADERS.iter().position(|h| *h == name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Display width of each column (header included).
    fn widths(&self) -> [usize; 9] {
        let mut widths = HEADERS.map(UnicodeWidthStr::width);
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }
        widths
    }
}

impl fmt::Display for TokenTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        let write_row = |f: &mut fmt::Formatter<'_>, cells: &[&str]| -> fmt::Result {
            let line: Vec<String> = cells
                .iter()
                .zip(widths)
                .map(|(cell, width)| {
                    // format! pads by char count, which is wrong for wide glyphs
                    let pad = width.saturating_sub(cell.width());
                    format!("{cell}{}", " ".repeat(pad))
                })
                .collect();
            writeln!(f, "{}", line.join(" | ").trim_end())
        };

        write_row(f, &HEADERS)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;
        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            write_row(f, &cells)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> Vec<Token> {
        vec![
            Token::new(0, "Die").with_pos("DET").with_morph("Case=Nom|Gender=Fem"),
            Token::new(4, "Taube").with_pos("NOUN").with_dep("sb", 2),
        ]
    }

    #[test]
    fn test_columns() {
        let table = TokenTable::from_tokens(&tokens());
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.column("pos").unwrap(), ["DET", "NOUN"]);
        assert_eq!(table.column("head").unwrap(), ["", "2"]);
        assert!(table.column("nonexistent").is_none());
    }

    #[test]
    fn test_render_aligns_columns() {
        let rendered = TokenTable::from_tokens(&tokens()).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("offset | text  | lemma"));
        assert!(lines[2].starts_with("0      | Die   |"));
        assert!(!lines[3].contains("Case="));
    }
}
