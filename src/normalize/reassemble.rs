//! Clean-up passes over the rendered name.

use super::chars::is_marker;
use crate::lexicon::Lexicon;
use crate::lexicon::tables::ELLIPSIS;

/// Put a space after a period that ends a sentence, as in `Hello. The`.
///
/// Periods after digits, between single letters (`a.b`), or inside an
/// abbreviation (`Ph.D`) stay tight.
pub(crate) fn space_periods(text: &str, lexicon: &Lexicon) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        out.push(c);
        if c != '.' {
            continue;
        }
        let Some(&next) = chars.get(i + 1) else {
            continue;
        };
        if !next.is_alphabetic() || lexicon.is_boundary(next) || is_marker(next) {
            continue;
        }
        if i > 0 && chars[i - 1].is_ascii_digit() {
            continue;
        }
        if ends_sentence(&chars[..i], &chars[i + 1..], lexicon) {
            out.push(' ');
        }
    }
    out
}

fn ends_sentence(before: &[char], after: &[char], lexicon: &Lexicon) -> bool {
    let is_letter = |c: &&char| c.is_alphabetic() && !lexicon.is_boundary(**c);
    let left_len = before.iter().rev().take_while(is_letter).count();
    let left: String = before[before.len() - left_len..].iter().collect();
    let right: String = after.iter().take_while(is_letter).collect();

    if left_len == 1 && right.chars().count() == 1 {
        return false;
    }
    if !left.is_empty()
        && (lexicon.abbreviation(&left) == Some(left.as_str())
            || lexicon.is_compound_abbreviation(&left)
            || lexicon.is_standalone_unit(&left))
    {
        return false;
    }
    lexicon.abbreviation(&format!("{left}{right}")).is_none()
}

/// Remove trailing periods, ellipses and replacement glyphs that are not
/// allowed to end a name.
///
/// A name made only of such characters is returned unchanged.
pub(crate) fn strip_trailing(text: &str, lexicon: &Lexicon) -> String {
    let mut text = text;
    loop {
        if text.ends_with(['.', ELLIPSIS]) {
            let rest = text.trim_end_matches(['.', ELLIPSIS]).trim_end();
            if rest.is_empty() {
                break;
            }
            text = rest;
            continue;
        }
        match text.chars().next_back() {
            Some(c) if lexicon.is_glyph(c) && !lexicon.is_allowed_trailing(c) => {
                text = text[..text.len() - c.len_utf8()].trim_end();
            }
            _ => break,
        }
    }
    text.to_string()
}
