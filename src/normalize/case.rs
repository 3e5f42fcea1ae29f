//! Title-case policy for plain words.

use super::classify::{Class, Classified};
use crate::lexicon::Lexicon;

/// Render each token, applying the title-case policy to plain words.
///
/// A word is capitalized when it opens the name, closes it, or follows a
/// trigger separator such as a hyphen or an ellipsis. Otherwise articles,
/// conjunctions and short prepositions after a space stay lower-case.
pub(crate) fn render(tokens: &[Classified], lexicon: &Lexicon) -> Vec<String> {
    // measured upper-cased so a ligature such as `ﬁ` counts the same
    // before and after capitalizing
    let last_word = tokens
        .iter()
        .rposition(|t| t.is_content() && t.text.to_uppercase().chars().count() >= 2);

    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            if token.class != Class::Word {
                return token.text.clone();
            }
            let forced = i == 0 || Some(i) == last_word || follows_trigger(&tokens[..i], lexicon);
            let after_space = i > 0 && tokens[i - 1].is_separator(' ');
            if !forced && after_space && lexicon.is_lowercase_word(&token.text) {
                token.text.to_lowercase()
            } else {
                capitalize_first(&token.text)
            }
        })
        .collect()
}

/// Whether the nearest token before this one, spaces aside, is a trigger.
fn follows_trigger(before: &[Classified], lexicon: &Lexicon) -> bool {
    before
        .iter()
        .rev()
        .find(|t| !t.is_separator(' '))
        .and_then(Classified::separator)
        .is_some_and(|c| lexicon.is_trigger(c))
}

/// Upper-case the first character and lower-case the rest.
///
/// Only the first character of an expanding upper-case mapping stays upper
/// case, so `ﬁle` becomes `File` rather than `FIle`.
pub(crate) fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut upper = first.to_uppercase();
    let head = upper.next();
    head.into_iter()
        .chain(upper.flat_map(char::to_lowercase))
        .chain(chars.flat_map(char::to_lowercase))
        .collect()
}
