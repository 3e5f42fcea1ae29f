//! Splitting a base name into words, separators and markers.

use super::chars::is_marker;
use crate::lexicon::Lexicon;

/// Upper bound on tokens per name; ordinary names produce 30 to 90.
pub(crate) const TOKEN_LIMIT: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// A single boundary character.
    Separator,
    Word,
    /// A preserved-term marker.
    Marker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
}

impl Token<'_> {
    pub fn is_separator(&self, c: char) -> bool {
        self.kind == TokenKind::Separator && self.text.starts_with(c)
    }

    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

/// The name produced more tokens than [`TOKEN_LIMIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TokenLimitExceeded {
    pub count: usize,
}

/// Split `text` on boundary characters, keeping every boundary character as
/// its own token.
pub(crate) fn tokenize<'a>(
    text: &'a str,
    lexicon: &Lexicon,
) -> Result<Vec<Token<'a>>, TokenLimitExceeded> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        let kind = if is_marker(c) {
            TokenKind::Marker
        } else if lexicon.is_boundary(c) {
            TokenKind::Separator
        } else {
            word_start.get_or_insert(i);
            continue;
        };
        if let Some(start) = word_start.take() {
            tokens.push(Token {
                text: &text[start..i],
                kind: TokenKind::Word,
            });
        }
        tokens.push(Token {
            text: &text[i..i + c.len_utf8()],
            kind,
        });
    }
    if let Some(start) = word_start {
        tokens.push(Token {
            text: &text[start..],
            kind: TokenKind::Word,
        });
    }

    if tokens.len() > TOKEN_LIMIT {
        return Err(TokenLimitExceeded {
            count: tokens.len(),
        });
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(text: &str) -> Vec<&str> {
        tokenize(text, &Lexicon::default())
            .unwrap()
            .iter()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_separators_are_kept() {
        assert_eq!(
            texts("hello world-again"),
            vec!["hello", " ", "world", "-", "again"]
        );
        assert_eq!(texts("m.d"), vec!["m", ".", "d"]);
        assert_eq!(texts("(draft)"), vec!["(", "draft", ")"]);
    }

    #[test]
    fn test_glyphs_are_boundaries() {
        assert_eq!(
            texts("a\u{02D0}b\u{2047}"),
            vec!["a", "\u{02D0}", "b", "\u{2047}"]
        );
        assert_eq!(texts("don\u{2019}t"), vec!["don", "\u{2019}", "t"]);
    }

    #[test]
    fn test_underscore_stays_in_word() {
        assert_eq!(texts("photo_2024 x"), vec!["photo_2024", " ", "x"]);
    }

    #[test]
    fn test_markers_are_atomic() {
        let tokens = tokenize("a\u{F0000}b", &Lexicon::default()).unwrap();
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Word, TokenKind::Marker, TokenKind::Word]
        );
    }

    #[test]
    fn test_token_limit() {
        let text = "x-".repeat(150);
        let err = tokenize(&text, &Lexicon::default()).unwrap_err();
        assert_eq!(err, TokenLimitExceeded { count: 300 });
        assert!(tokenize(&"x-".repeat(100), &Lexicon::default()).is_ok());
    }
}
