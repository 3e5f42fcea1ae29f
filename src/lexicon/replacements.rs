//! The ordered character replacement table.

use std::fmt;

use indexmap::IndexMap;

use super::LexiconError;
use super::tables::{CHAR_REPLACEMENTS, MULTI_CHAR_TRIGGERS};

/// Characters that may never appear in an NTFS file name.
const NTFS_FORBIDDEN: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Why a replacement entry was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReplacement {
    /// The key is neither a single character nor a known multi-character
    /// trigger.
    KeyShape,
    /// The replacement is empty.
    EmptyValue,
    /// The replacement contains a character an NTFS name cannot hold.
    Unencodable(char),
}

impl fmt::Display for InvalidReplacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReplacement::KeyShape => {
                write!(f, "key must be one character or one of {MULTI_CHAR_TRIGGERS:?}")
            }
            InvalidReplacement::EmptyValue => write!(f, "replacement cannot be empty"),
            InvalidReplacement::Unencodable(c) => {
                write!(f, "replacement contains {c:?}, which a file name cannot hold")
            }
        }
    }
}

/// Replacement rules, split by key shape.
///
/// Multi-character entries are always applied before single-character ones
/// so a single-character rule cannot break up a multi-character trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplacementTable {
    multi: IndexMap<String, String>,
    single: IndexMap<char, String>,
}

impl Default for ReplacementTable {
    fn default() -> Self {
        let mut table = Self {
            multi: IndexMap::new(),
            single: IndexMap::new(),
        };
        for (from, to) in CHAR_REPLACEMENTS {
            table.insert_unchecked(from, to);
        }
        table
    }
}

impl ReplacementTable {
    /// Add or override a rule after validating it.
    pub fn insert(&mut self, from: &str, to: &str) -> Result<(), LexiconError> {
        validate(from, to).map_err(|reason| LexiconError::InvalidReplacement {
            from: from.to_string(),
            to: to.to_string(),
            reason,
        })?;
        self.insert_unchecked(from, to);
        Ok(())
    }

    fn insert_unchecked(&mut self, from: &str, to: &str) {
        let mut chars = from.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                self.single.insert(c, to.to_string());
            }
            _ => {
                self.multi.insert(from.to_string(), to.to_string());
                // longest trigger first
                self.multi
                    .sort_by(|a, _, b, _| b.chars().count().cmp(&a.chars().count()));
            }
        }
    }

    /// The replacement for a source key, if any.
    pub fn get(&self, from: &str) -> Option<&str> {
        let mut chars = from.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.single.get(&c).map(String::as_str),
            _ => self.multi.get(from).map(String::as_str),
        }
    }

    /// Every rule in application order.
    pub fn iter(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        self.multi
            .iter()
            .map(|(from, to)| (from.clone(), to.as_str()))
            .chain(self.single.iter().map(|(c, to)| (c.to_string(), to.as_str())))
    }

    /// Replacement values that are a single character.
    pub fn glyphs(&self) -> impl Iterator<Item = char> + '_ {
        self.multi
            .values()
            .chain(self.single.values())
            .filter_map(|to| single_char(to))
    }

    /// Apply every rule to `text`.
    ///
    /// `...` matches any run of three or more periods. A single-character
    /// rule replaces a whole run of its character with one replacement.
    pub fn apply(&self, text: &str) -> String {
        let mut text = text.to_string();
        for (from, to) in &self.multi {
            text = if from == "..." {
                replace_period_runs(&text, to)
            } else {
                text.replace(from.as_str(), to)
            };
        }

        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match self.single.get(&c) {
                Some(to) => {
                    out.push_str(to);
                    while chars.peek() == Some(&c) {
                        chars.next();
                    }
                }
                None => out.push(c),
            }
        }
        out
    }
}

fn validate(from: &str, to: &str) -> Result<(), InvalidReplacement> {
    if single_char(from).is_none() && !MULTI_CHAR_TRIGGERS.contains(&from) {
        return Err(InvalidReplacement::KeyShape);
    }
    if to.is_empty() {
        return Err(InvalidReplacement::EmptyValue);
    }
    if let Some(c) = to
        .chars()
        .find(|c| NTFS_FORBIDDEN.contains(c) || c.is_control())
    {
        return Err(InvalidReplacement::Unencodable(c));
    }
    Ok(())
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn replace_period_runs(text: &str, to: &str) -> String {
    let flush = |out: &mut String, run: usize| {
        if run >= 3 {
            out.push_str(to);
        } else {
            out.extend(std::iter::repeat_n('.', run));
        }
    };

    let mut out = String::with_capacity(text.len());
    let mut run = 0;
    for c in text.chars() {
        if c == '.' {
            run += 1;
            continue;
        }
        flush(&mut out, run);
        run = 0;
        out.push(c);
    }
    flush(&mut out, run);
    out
}
