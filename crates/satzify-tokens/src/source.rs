//! Token sources.

use unicode_segmentation::UnicodeSegmentation;

use crate::{Token, TokenResult};

/// Anything that can turn text into an ordered sequence of tokens.
///
/// Implementations must return tokens with strictly increasing byte offsets
/// inside `[0, text.len())`.
pub trait TokenSource {
    fn tokenize(&self, text: &str) -> TokenResult<Vec<Token>>;
}

impl<S: TokenSource + ?Sized> TokenSource for &S {
    fn tokenize(&self, text: &str) -> TokenResult<Vec<Token>> {
        (**self).tokenize(text)
    }
}

impl<S: TokenSource + ?Sized> TokenSource for Box<S> {
    fn tokenize(&self, text: &str) -> TokenResult<Vec<Token>> {
        (**self).tokenize(text)
    }
}

impl<S: TokenSource + ?Sized> TokenSource for std::sync::Arc<S> {
    fn tokenize(&self, text: &str) -> TokenResult<Vec<Token>> {
        (**self).tokenize(text)
    }
}

/// Offline fallback that splits on Unicode word boundaries.
///
/// Produces no tags or morphology, so nothing gets annotated, but the
/// output still covers the whole text. Other whitespace is left to the
/// preceding token's span; line breaks become `SPACE` tokens of their own,
/// as a parser would emit them, so paragraphs can still be split.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl TokenSource for WordTokenizer {
    fn tokenize(&self, text: &str) -> TokenResult<Vec<Token>> {
        let tokens = text
            .split_word_bound_indices()
            .filter_map(|(offset, word)| {
                if word.contains('\n') {
                    Some(Token::new(offset, word).with_pos("SPACE"))
                } else if word.trim().is_empty() {
                    None
                } else {
                    let mut token = Token::new(offset, word);
                    token.lemma = word.to_string();
                    Some(token)
                }
            })
            .collect();
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_tokens;
    use proptest::prelude::*;

    #[test]
    fn test_splits_words_and_punctuation() {
        let text = "Besser ein Spatz in der Hand.";
        let tokens = WordTokenizer::new().tokenize(text).unwrap();
        let words: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(words, ["Besser", "ein", "Spatz", "in", "der", "Hand", "."]);
        assert!(validate_tokens(text, &tokens).is_ok());
    }

    #[test]
    fn test_skips_spaces_keeps_line_breaks() {
        let tokens = WordTokenizer::new().tokenize("  Wurst \nBrot").unwrap();
        let words: Vec<_> = tokens.iter().map(|t| (t.offset, t.text.as_str())).collect();
        assert_eq!(words, [(2, "Wurst"), (8, "\n"), (9, "Brot")]);
        assert_eq!(tokens[1].pos, "SPACE");
    }

    #[test]
    fn test_empty_text() {
        assert!(WordTokenizer::new().tokenize("").unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn prop_tokens_satisfy_contract(text in "[a-zA-Zäöüß .,!?\n\t]{0,80}") {
            let tokens = WordTokenizer::new().tokenize(&text).unwrap();
            prop_assert!(validate_tokens(&text, &tokens).is_ok());
            for token in &tokens {
                prop_assert_eq!(&text[token.offset..token.end()], token.text.as_str());
            }
        }
    }
}
