// SPDX-FileCopyrightText: 2025 File Renamer contributors
// SPDX-License-Identifier: GPL-3.0-or-later
//! The immutable rule tables shared by every pipeline stage.
//!
//! A [`Lexicon`] is built once, either as the built-in default or through a
//! [`LexiconBuilder`] that merges user abbreviations, preserved terms and
//! replacement overrides, and is then only read.

mod replacements;
pub(crate) mod tables;
mod units;

use std::collections::{HashMap, HashSet};
use std::fmt;

use indexmap::IndexMap;
use regex::Regex;
use thiserror::Error;

pub use replacements::{InvalidReplacement, ReplacementTable};
pub use units::{UnitCase, UnitPattern};

use tables::{
    ABBREVIATIONS, ALLOWED_TRAILING_SOURCES, ASCII_CLOSING_BRACKETS, ASCII_OPENING_BRACKETS,
    BASE_BOUNDARY_CHARS, BASE_TRIGGERS, CONTRACTIONS, KEEP_CAPITALIZED_IF_ALL_CAPS,
    KNOWN_EXTENSIONS, LOWERCASE_WORDS, MISSPELLINGS, MONTHS, PRESERVE_CASE_EXTENSIONS,
    PRESERVED_TERMS, SPECIAL_CASE_WORDS, STANDALONE_UNITS, TRIGGER_SOURCES,
};

/// First and last code points of the range used for preserved-term markers.
pub(crate) const MARKER_BASE: u32 = 0xF0000;
pub(crate) const MARKER_LAST: u32 = 0xFFFFD;

/// The kind of a user-supplied lexicon entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    Abbreviation,
    PreservedTerm,
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermKind::Abbreviation => write!(f, "abbreviation"),
            TermKind::PreservedTerm => write!(f, "preserved term"),
        }
    }
}

/// Errors raised while building a [`Lexicon`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexiconError {
    /// A replacement rule is malformed.
    #[error("invalid replacement {from:?} -> {to:?}: {reason}")]
    InvalidReplacement {
        from: String,
        to: String,
        reason: InvalidReplacement,
    },
    /// An abbreviation or preserved term is empty or contains control
    /// characters.
    #[error("invalid {kind} {entry:?}")]
    InvalidTerm { kind: TermKind, entry: String },
    /// A preserved term could not be compiled into a matcher.
    #[error("preserved term {term:?} cannot be matched: {message}")]
    Pattern { term: String, message: String },
}

/// A literal term that must survive normalization verbatim.
#[derive(Debug, Clone)]
pub struct PreservedTerm {
    literal: String,
    exact: Regex,
    flexible: Option<Regex>,
    folded: String,
}

impl PreservedTerm {
    /// Compile `term` against the default replacement table.
    ///
    /// Fails with [`LexiconError::InvalidTerm`] when the term has no letters
    /// or digits to match on.
    pub fn new(term: &str) -> Result<Self, LexiconError> {
        Self::compile(term, &ReplacementTable::default())
    }

    /// Compile `term` after running it through the replacement table.
    fn compile(term: &str, replacements: &ReplacementTable) -> Result<Self, LexiconError> {
        let glyphs: HashSet<char> = replacements.glyphs().collect();
        let is_word = |c: char| c.is_alphanumeric() && !glyphs.contains(&c);

        let literal = replacements.apply(term.trim());
        let words: Vec<&str> = literal
            .split(|c: char| !is_word(c))
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return Err(LexiconError::InvalidTerm {
                kind: TermKind::PreservedTerm,
                entry: term.to_string(),
            });
        }

        let pattern_error = |e: regex::Error| LexiconError::Pattern {
            term: term.to_string(),
            message: e.to_string(),
        };

        let starts_with_word = literal.chars().next().is_some_and(is_word);
        let ends_with_word = literal.chars().last().is_some_and(is_word);
        let exact = Regex::new(&format!(
            "(?i){}{}{}",
            if starts_with_word { r"\b" } else { "" },
            regex::escape(&literal),
            if ends_with_word { r"\b" } else { "" },
        ))
        .map_err(pattern_error)?;

        let flexible = if words.len() > 1 {
            let leading = &literal[..literal.len() - literal.trim_start_matches(|c: char| !is_word(c)).len()];
            let trailing = &literal[literal.trim_end_matches(|c: char| !is_word(c)).len()..];
            let glyph_class: String = glyphs.iter().map(|c| regex::escape(&c.to_string())).collect();
            let separator = format!(
                r"(?:[^\p{{L}}\p{{N}}\x{{{MARKER_BASE:X}}}-\x{{{MARKER_LAST:X}}}]{})+",
                if glyph_class.is_empty() {
                    String::new()
                } else {
                    format!("|[{glyph_class}]")
                }
            );
            let body: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
            Some(
                Regex::new(&format!(
                    r"(?i)(?:{})?\b{}\b(?:{})?",
                    regex::escape(leading),
                    body.join(&separator),
                    regex::escape(trailing),
                ))
                .map_err(pattern_error)?,
            )
        } else {
            None
        };

        let folded = words.concat().to_lowercase();
        Ok(Self {
            literal,
            exact,
            flexible,
            folded,
        })
    }

    /// The term as it appears in output.
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Case-insensitive match of the literal text.
    pub fn exact(&self) -> &Regex {
        &self.exact
    }

    /// Match tolerating any punctuation or spacing between the term's words.
    pub fn flexible(&self) -> Option<&Regex> {
        self.flexible.as_ref()
    }

    /// Lower-cased alphanumeric content of the term.
    pub fn folded(&self) -> &str {
        &self.folded
    }
}

/// Character classes derived from the replacement table.
#[derive(Debug, Clone, Default)]
struct CharClasses {
    glyphs: HashSet<char>,
    opening: HashSet<char>,
    closing: HashSet<char>,
    triggers: HashSet<char>,
    allowed_trailing: HashSet<char>,
    boundaries: HashSet<char>,
}

impl CharClasses {
    fn derive(replacements: &ReplacementTable) -> Self {
        let single = |to: &str| {
            let mut chars = to.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        };

        let glyphs: HashSet<char> = replacements.glyphs().collect();
        let mut opening: HashSet<char> = ASCII_OPENING_BRACKETS.iter().copied().collect();
        let mut closing: HashSet<char> = ASCII_CLOSING_BRACKETS.iter().copied().collect();
        for (from, to) in replacements.iter() {
            let Some(glyph) = single(to) else { continue };
            match from.chars().next() {
                Some(c) if ASCII_OPENING_BRACKETS.contains(&c) => {
                    opening.insert(glyph);
                }
                Some(c) if ASCII_CLOSING_BRACKETS.contains(&c) => {
                    closing.insert(glyph);
                }
                _ => {}
            }
        }

        let glyphs_of = |sources: &[&str]| -> Vec<char> {
            sources
                .iter()
                .filter_map(|from| replacements.get(from).and_then(single))
                .collect()
        };

        let mut triggers: HashSet<char> = BASE_TRIGGERS.iter().copied().collect();
        triggers.extend(opening.iter().copied());
        triggers.extend(glyphs_of(TRIGGER_SOURCES));

        let mut allowed_trailing: HashSet<char> = closing.clone();
        allowed_trailing.extend(glyphs_of(ALLOWED_TRAILING_SOURCES));

        let mut boundaries: HashSet<char> = BASE_BOUNDARY_CHARS.iter().copied().collect();
        boundaries.extend(glyphs.iter().copied());
        boundaries.extend(opening.iter().copied());
        boundaries.extend(closing.iter().copied());

        Self {
            glyphs,
            opening,
            closing,
            triggers,
            allowed_trailing,
            boundaries,
        }
    }
}

/// Every rule table the pipeline consults.
#[derive(Debug, Clone)]
pub struct Lexicon {
    replacements: ReplacementTable,
    abbreviations: HashMap<String, String>,
    units: Vec<UnitPattern>,
    months: IndexMap<String, String>,
    contractions: HashSet<String>,
    lowercase_words: HashSet<String>,
    keep_caps: HashMap<String, String>,
    special_case: HashMap<String, String>,
    standalone_units: HashSet<String>,
    preserve_case_extensions: HashSet<String>,
    known_extensions: HashSet<String>,
    preserved_terms: Vec<PreservedTerm>,
    classes: CharClasses,
}

impl Default for Lexicon {
    fn default() -> Self {
        let replacements = ReplacementTable::default();
        let terms = PRESERVED_TERMS
            .iter()
            .filter_map(|term| match PreservedTerm::compile(term, &replacements) {
                Ok(term) => Some(term),
                Err(e) => {
                    log::warn!("skipping built-in preserved term: {e}");
                    None
                }
            })
            .collect();
        Self::assemble(replacements, &[], terms)
    }
}

impl Lexicon {
    /// Start a builder seeded with the built-in tables.
    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::new()
    }

    fn assemble(
        replacements: ReplacementTable,
        user_abbreviations: &[String],
        mut preserved_terms: Vec<PreservedTerm>,
    ) -> Self {
        let keep_caps: HashMap<String, String> = KEEP_CAPITALIZED_IF_ALL_CAPS
            .iter()
            .map(|word| (word.to_uppercase(), word.to_lowercase()))
            .collect();

        let months: IndexMap<String, String> = MONTHS
            .iter()
            .map(|(name, proper)| (name.to_string(), proper.to_string()))
            .collect();

        let mut abbreviations: HashMap<String, String> = HashMap::new();
        for entry in ABBREVIATIONS.iter().copied().chain(months.values().map(String::as_str)) {
            let canonical = entry.replace('.', "");
            let key = canonical.to_uppercase();
            if !keep_caps.contains_key(&key) {
                abbreviations.entry(key).or_insert(canonical);
            }
        }

        let mut keep_caps = keep_caps;
        for entry in user_abbreviations {
            let canonical = entry.trim().replace('.', "");
            let key = canonical.to_uppercase();
            keep_caps.remove(&key);
            abbreviations.insert(key, canonical);
        }

        let special_case = SPECIAL_CASE_WORDS
            .iter()
            .map(|word| (word.to_lowercase(), word.to_string()))
            .chain(
                MISSPELLINGS
                    .iter()
                    .map(|(wrong, right)| (wrong.to_string(), right.to_string())),
            )
            // corrected spellings must map to themselves on a second pass
            .chain(
                MISSPELLINGS
                    .iter()
                    .map(|(_, right)| (right.to_lowercase(), right.to_string())),
            )
            .collect();

        preserved_terms.sort_by_key(|term| std::cmp::Reverse(term.literal.chars().count()));

        let set = |words: &[&str]| -> HashSet<String> { words.iter().map(|w| w.to_string()).collect() };

        let classes = CharClasses::derive(&replacements);
        Self {
            replacements,
            abbreviations,
            units: units::builtin(),
            months,
            contractions: set(CONTRACTIONS),
            lowercase_words: set(LOWERCASE_WORDS),
            keep_caps,
            special_case,
            standalone_units: set(STANDALONE_UNITS),
            preserve_case_extensions: set(PRESERVE_CASE_EXTENSIONS),
            known_extensions: set(KNOWN_EXTENSIONS)
                .union(&set(PRESERVE_CASE_EXTENSIONS))
                .cloned()
                .collect(),
            preserved_terms,
            classes,
        }
    }

    pub fn replacements(&self) -> &ReplacementTable {
        &self.replacements
    }

    /// Canonical form of an abbreviation, matched case-insensitively with
    /// periods ignored.
    pub fn abbreviation(&self, word: &str) -> Option<&str> {
        let key = word.replace('.', "").to_uppercase();
        if key.is_empty() {
            return None;
        }
        self.abbreviations.get(&key).map(String::as_str)
    }

    /// Whether `word` is written exactly as a run of two or more canonical
    /// abbreviations, such as `LtColGen`.
    pub fn is_compound_abbreviation(&self, word: &str) -> bool {
        word.char_indices().skip(1).any(|(at, _)| {
            let (head, tail) = word.split_at(at);
            self.abbreviation(head) == Some(head)
                && (self.abbreviation(tail) == Some(tail) || self.is_compound_abbreviation(tail))
        })
    }

    /// Render `token` with the first matching unit pattern.
    pub fn unit(&self, token: &str) -> Option<String> {
        self.units.iter().find_map(|pattern| pattern.render(token))
    }

    /// Render a separator-less date such as `2025jan12`.
    pub fn month_date(&self, token: &str) -> Option<String> {
        units::render_month_date(token, |month| self.month(month).map(str::to_string))
    }

    /// Display form of a month name or abbreviation.
    pub fn month(&self, word: &str) -> Option<&str> {
        self.months.get(&word.to_lowercase()).map(String::as_str)
    }

    pub fn is_contraction(&self, word: &str) -> bool {
        self.contractions.contains(&word.to_lowercase())
    }

    pub fn is_lowercase_word(&self, word: &str) -> bool {
        self.lowercase_words.contains(&word.to_lowercase())
    }

    /// Forced lower-case form of an ambiguous all-caps word.
    pub fn keep_caps(&self, word: &str) -> Option<&str> {
        self.keep_caps.get(&word.to_uppercase()).map(String::as_str)
    }

    /// Fixed display form of a brand name or common misspelling.
    pub fn special_case(&self, word: &str) -> Option<&str> {
        self.special_case.get(&word.to_lowercase()).map(String::as_str)
    }

    pub fn is_standalone_unit(&self, word: &str) -> bool {
        self.standalone_units.contains(&word.to_lowercase())
    }

    /// Whether a base name with this extension keeps its original case.
    pub fn preserves_case(&self, extension: &str) -> bool {
        self.preserve_case_extensions
            .contains(&extension.to_lowercase())
    }

    pub fn is_known_extension(&self, extension: &str) -> bool {
        self.known_extensions.contains(&extension.to_lowercase())
    }

    /// Preserved terms, longest first.
    pub fn preserved_terms(&self) -> &[PreservedTerm] {
        &self.preserved_terms
    }

    /// Whether `c` is a single-character replacement glyph.
    pub fn is_glyph(&self, c: char) -> bool {
        self.classes.glyphs.contains(&c)
    }

    pub fn is_boundary(&self, c: char) -> bool {
        self.classes.boundaries.contains(&c)
    }

    pub fn is_trigger(&self, c: char) -> bool {
        self.classes.triggers.contains(&c)
    }

    pub fn is_opening_bracket(&self, c: char) -> bool {
        self.classes.opening.contains(&c)
    }

    pub fn is_closing_bracket(&self, c: char) -> bool {
        self.classes.closing.contains(&c)
    }

    pub fn is_allowed_trailing(&self, c: char) -> bool {
        self.classes.allowed_trailing.contains(&c)
    }
}

/// Builds a [`Lexicon`] from the built-in tables plus user entries.
///
/// ```
/// use file_renamer::Lexicon;
///
/// let lexicon = Lexicon::builder()
///     .abbreviation("NATO")
///     .preserved_term("Star Trek: The Next Generation")
///     .build()
///     .unwrap();
/// assert_eq!(lexicon.abbreviation("nato"), Some("NATO"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LexiconBuilder {
    abbreviations: Vec<String>,
    preserved_terms: Vec<String>,
    replacements: Vec<(String, String)>,
}

impl LexiconBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abbreviation(mut self, entry: impl Into<String>) -> Self {
        self.abbreviations.push(entry.into());
        self
    }

    pub fn abbreviations<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abbreviations.extend(entries.into_iter().map(Into::into));
        self
    }

    pub fn preserved_term(mut self, term: impl Into<String>) -> Self {
        self.preserved_terms.push(term.into());
        self
    }

    pub fn preserved_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preserved_terms.extend(terms.into_iter().map(Into::into));
        self
    }

    /// Add or override a character replacement.
    pub fn replacement(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.replacements.push((from.into(), to.into()));
        self
    }

    /// Validate every entry and freeze the lexicon.
    pub fn build(self) -> Result<Lexicon, LexiconError> {
        let mut replacements = ReplacementTable::default();
        for (from, to) in &self.replacements {
            replacements.insert(from, to)?;
        }

        for entry in &self.abbreviations {
            check_term(TermKind::Abbreviation, entry)?;
        }

        let mut seen = HashSet::new();
        let mut terms = Vec::new();
        let builtin = PRESERVED_TERMS.iter().map(|term| term.to_string());
        for term in builtin.chain(self.preserved_terms.iter().cloned()) {
            check_term(TermKind::PreservedTerm, &term)?;
            let compiled = PreservedTerm::compile(&term, &replacements)?;
            if seen.insert(compiled.literal.to_lowercase()) {
                terms.push(compiled);
            }
        }

        Ok(Lexicon::assemble(replacements, &self.abbreviations, terms))
    }
}

fn check_term(kind: TermKind, entry: &str) -> Result<(), LexiconError> {
    if entry.trim().is_empty() || entry.chars().any(char::is_control) {
        return Err(LexiconError::InvalidTerm {
            kind,
            entry: entry.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviation_lookup_ignores_case_and_periods() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.abbreviation("fbi"), Some("FBI"));
        assert_eq!(lexicon.abbreviation("ph.d"), Some("PhD"));
        assert_eq!(lexicon.abbreviation("NVME"), Some("NVMe"));
        assert_eq!(lexicon.abbreviation("col"), Some("Col"));
        assert_eq!(lexicon.abbreviation("hello"), None);
        assert_eq!(lexicon.abbreviation("."), None);
    }

    #[test]
    fn test_keep_caps_entries_leave_abbreviations() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.abbreviation("pa"), None);
        assert_eq!(lexicon.keep_caps("PA"), Some("pa"));
        assert_eq!(lexicon.abbreviation("ny"), Some("NY"));
    }

    #[test]
    fn test_preserved_term_needs_words() {
        assert_eq!(PreservedTerm::new("e.g.").unwrap().literal(), "e.g.");
        assert!(matches!(
            PreservedTerm::new("---"),
            Err(LexiconError::InvalidTerm {
                kind: TermKind::PreservedTerm,
                ..
            })
        ));
    }

    #[test]
    fn test_compound_abbreviation() {
        let lexicon = Lexicon::default();
        assert!(lexicon.is_compound_abbreviation("LtCol"));
        assert!(lexicon.is_compound_abbreviation("LtColGen"));
        assert!(lexicon.is_compound_abbreviation("MDPhD"));
        assert!(!lexicon.is_compound_abbreviation("Ltcol"));
        assert!(!lexicon.is_compound_abbreviation("Lt"));
        assert!(!lexicon.is_compound_abbreviation(""));
    }

    #[test]
    fn test_months_are_abbreviations() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.abbreviation("JAN"), Some("Jan"));
        assert_eq!(lexicon.month("Septiembre"), Some("Septiembre"));
        assert_eq!(lexicon.month_date("12jan2025"), Some("12Jan2025".to_string()));
    }

    #[test]
    fn test_user_abbreviation_overrides_keep_caps() {
        let lexicon = Lexicon::builder().abbreviation("OR").build().unwrap();
        assert_eq!(lexicon.abbreviation("or"), Some("OR"));
        assert_eq!(lexicon.keep_caps("OR"), None);
    }

    #[test]
    fn test_derived_classes() {
        let lexicon = Lexicon::default();
        assert!(lexicon.is_opening_bracket('\u{276C}'));
        assert!(lexicon.is_opening_bracket('\u{300A}'));
        assert!(lexicon.is_closing_bracket('\u{27E7}'));
        assert!(lexicon.is_trigger('\u{02D0}'));
        assert!(lexicon.is_trigger('\u{2502}'));
        assert!(lexicon.is_trigger('('));
        assert!(!lexicon.is_trigger('\u{2215}'));
        assert!(lexicon.is_allowed_trailing('\u{2047}'));
        assert!(lexicon.is_allowed_trailing(')'));
        assert!(!lexicon.is_allowed_trailing('\u{2502}'));
        assert!(lexicon.is_boundary('\u{2731}'));
        assert!(lexicon.is_boundary('\u{00BF}'));
        assert!(!lexicon.is_boundary('_'));
    }

    #[test]
    fn test_extensions() {
        let lexicon = Lexicon::default();
        assert!(lexicon.preserves_case("PY"));
        assert!(!lexicon.preserves_case("txt"));
        assert!(lexicon.is_known_extension("txt"));
        assert!(lexicon.is_known_extension("rs"));
        assert!(!lexicon.is_known_extension("unknown"));
    }

    #[test]
    fn test_preserved_term_is_substituted() {
        let lexicon = Lexicon::builder()
            .preserved_term("Star Trek: The Next Generation")
            .build()
            .unwrap();
        let term = &lexicon.preserved_terms()[0];
        assert_eq!(term.literal(), "Star Trek\u{02D0} The Next Generation");
        assert_eq!(term.folded(), "startrekthenextgeneration");
    }

    #[test]
    fn test_preserved_term_flexible_match() {
        let lexicon = Lexicon::builder()
            .preserved_term("My Product Name")
            .build()
            .unwrap();
        let term = lexicon
            .preserved_terms()
            .iter()
            .find(|t| t.literal() == "My Product Name")
            .unwrap();
        assert!(term.exact().is_match("review of my product name"));
        let flexible = term.flexible().unwrap();
        assert!(flexible.is_match("my_product-name"));
        assert!(!flexible.is_match("myproductname"));
    }

    #[test]
    fn test_invalid_entries_rejected() {
        assert_eq!(
            Lexicon::builder().abbreviation("  ").build().unwrap_err(),
            LexiconError::InvalidTerm {
                kind: TermKind::Abbreviation,
                entry: "  ".to_string(),
            }
        );
        assert!(matches!(
            Lexicon::builder().preserved_term("a\u{0}b").build(),
            Err(LexiconError::InvalidTerm {
                kind: TermKind::PreservedTerm,
                ..
            })
        ));
        assert!(matches!(
            Lexicon::builder().replacement("abc", "x").build(),
            Err(LexiconError::InvalidReplacement { .. })
        ));
    }
}
