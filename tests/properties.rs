//! Property-based tests for name normalization
//!
//! Names are built from a vocabulary that mixes plain words, lower-case
//! words, abbreviations, units, times, dates and brand names in several
//! spellings, then checked for:
//! - idempotence
//! - a lower-case extension
//! - no spaces when the input had no whitespace
//! - no trailing period or ellipsis
//!
//! A second set glues fragments together without separators, so periods,
//! colons, ligatures and runs of abbreviations land in every position.

use file_renamer::{Lexicon, normalize};
use proptest::prelude::*;

const VOCABULARY: &[&str] = &[
    "apple", "river", "the", "of", "and", "report", "ny", "fbi", "5kb", "10am", "jan", "2025",
    "THE", "Apple", "OR", "or", "dr", "wifi", "ipad", "don't", "AND", "Report", "&", "(draft)",
    "2nd",
];

/// Fragments that stress periods and case mapping when glued to words.
const FRAGMENTS: &[&str] = &[
    ".", ":", "|", "...", "e.g.", "fbi.cia", "\u{FB01}", "\u{FB01}le", "lt.col", "-", " ", "?",
    "'", "ny.ny", "md.gb", "min", "12.", "dr.", "\u{DF}", "\"", "(", "ac/dc", "i.e.",
];

const EXTENSIONS: &[&str] = &[".TXT", ".Pdf", ".mp4"];

const OPTIONAL_EXTENSIONS: &[&str] = &["", ".TXT", ".Pdf", ".mp4"];

const TRAILING: &[&str] = &["...", ".", "!", "?", "|", ":", "\"", "*", "..", ". ", "\u{2026}"];

/// Generate one to six vocabulary words
fn words_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 1..=6)
}

fn extension_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(EXTENSIONS)
}

fn trailing_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(TRAILING)
}

/// Generate one to eight words or fragments, glued together
fn glued_strategy() -> impl Strategy<Value = String> {
    let pieces: Vec<&'static str> = [VOCABULARY, FRAGMENTS].concat();
    prop::collection::vec(prop::sample::select(pieces), 1..=8).prop_map(|pieces| pieces.concat())
}

fn optional_extension_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(OPTIONAL_EXTENSIONS)
}

/// Whether a name is made only of periods and ellipses, which may end a
/// name because nothing else is left.
fn only_dots(name: &str) -> bool {
    name.chars().all(|c| c == '.' || c == '\u{2026}')
}

proptest! {
    #[test]
    fn normalizing_twice_changes_nothing(words in words_strategy()) {
        let lexicon = Lexicon::default();
        let name = format!("{}.txt", words.join(" "));
        let once = normalize(&name, &lexicon).unwrap();
        let twice = normalize(&once, &lexicon).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn no_spaces_without_whitespace(
        words in words_strategy(),
        extension in extension_strategy(),
    ) {
        let lexicon = Lexicon::default();
        let name = format!("{}{}", words.join("-"), extension);
        prop_assume!(!name.contains(' '));
        let normalized = normalize(&name, &lexicon).unwrap();
        prop_assert!(!normalized.contains(' '), "{:?} -> {:?}", name, normalized);
        prop_assert!(
            normalized.ends_with(&extension.to_lowercase()),
            "{:?} -> {:?}",
            name,
            normalized
        );
        prop_assert_eq!(normalize(&normalized, &lexicon).unwrap(), normalized);
    }

    #[test]
    fn no_trailing_periods(
        words in words_strategy(),
        trailing in trailing_strategy(),
    ) {
        let lexicon = Lexicon::default();
        let name = format!("{}{}", words.join(" "), trailing);
        let normalized = normalize(&name, &lexicon).unwrap();
        prop_assert!(
            !normalized.ends_with('.') && !normalized.ends_with('\u{2026}'),
            "{:?} -> {:?}",
            name,
            normalized
        );
        prop_assert_eq!(normalize(&normalized, &lexicon).unwrap(), normalized);
    }

    #[test]
    fn glued_fragments_are_stable(
        stem in glued_strategy(),
        extension in optional_extension_strategy(),
    ) {
        let lexicon = Lexicon::default();
        let name = format!("{stem}{extension}");
        let once = normalize(&name, &lexicon).unwrap();
        let twice = normalize(&once, &lexicon).unwrap();
        prop_assert_eq!(&once, &twice, "{:?}", name);
        if !name.chars().any(char::is_whitespace) {
            prop_assert!(!once.contains(' '), "{:?} -> {:?}", name, once);
        }
        if !only_dots(&once) {
            prop_assert!(
                !once.ends_with('.') && !once.ends_with('\u{2026}'),
                "{:?} -> {:?}",
                name,
                once
            );
        }
    }
}
