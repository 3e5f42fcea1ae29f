//! Base name and extension splitting.

use super::reassemble::strip_trailing;
use crate::lexicon::Lexicon;

/// Split `filename` into its base name and extension.
///
/// Trailing periods never start an extension, and an extension is made of
/// letters, digits, `_` and `-` only. A period between two digits is a
/// decimal point unless the suffix is a known extension (`2.4GHz` vs
/// `backup.7z`).
pub(crate) fn split<'a>(filename: &'a str, lexicon: &Lexicon) -> (&'a str, Option<&'a str>) {
    if filename.trim_end().ends_with('.') {
        return (filename, None);
    }
    let Some(dot) = filename.rfind('.') else {
        return (filename, None);
    };

    let base = &filename[..dot];
    let extension = &filename[dot + 1..];
    let valid = !extension.is_empty()
        && extension
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-');
    if !valid {
        return (filename, None);
    }

    let decimal = base.chars().last().is_some_and(|c| c.is_ascii_digit())
        && extension.chars().next().is_some_and(|c| c.is_ascii_digit());
    if decimal && !lexicon.is_known_extension(extension) {
        return (filename, None);
    }
    (base, Some(extension))
}

/// Promote a known extension exposed by trailing cleanup.
///
/// `script.py＂…` loses its ellipsis and quote during cleanup, which leaves
/// `py` at the end. Replacement glyphs are ignored when reading the
/// candidate. Returns the cleaned base name and the lower-cased extension.
pub(crate) fn recover(name: &str, lexicon: &Lexicon) -> Option<(String, String)> {
    let dot = name.rfind('.')?;
    let candidate: String = name[dot + 1..]
        .chars()
        .filter(|&c| !lexicon.is_glyph(c))
        .collect();
    if candidate.is_empty() || !lexicon.is_known_extension(&candidate) {
        return None;
    }
    let base = strip_trailing(&name[..dot], lexicon);
    Some((base, candidate.to_lowercase()))
}
