//! File Renamer turns file names into portable, consistently title-cased
//! names.
//!
//! Characters that NTFS forbids are swapped for look-alike Unicode glyphs,
//! words are title-cased with English and Spanish rules, and abbreviations,
//! units, dates, contractions and user-preserved terms keep their own
//! spelling.
//!
//! # Example
//!
//! ```
//! use file_renamer::{Lexicon, normalize};
//!
//! let lexicon = Lexicon::default();
//! let name = normalize("dr. smith md phd.txt", &lexicon).unwrap();
//! assert_eq!(name, "Dr Smith MD PhD.txt");
//! ```

pub mod config;
pub mod lexicon;
mod normalize;
pub mod renamer;
pub mod report;

use std::ffi::OsStr;

use thiserror::Error;

pub use lexicon::{Lexicon, LexiconBuilder, LexiconError};

/// Errors that can occur while normalizing a name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The name contains a control character that no file system accepts.
    #[error("control character {character:?} at position {position}")]
    Encoding { character: char, position: usize },
    /// The platform file name is not valid Unicode.
    #[error("file name {0:?} is not valid Unicode")]
    NotUnicode(String),
}

/// Normalizes a file name.
///
/// The result is stable: normalizing it again returns it unchanged.
///
/// # Errors
///
/// Returns [`NormalizeError::Encoding`] if `filename` contains a control
/// character other than tab, line feed, carriage return, vertical tab or
/// form feed. `position` counts characters, not bytes.
pub fn normalize(filename: &str, lexicon: &Lexicon) -> Result<String, NormalizeError> {
    let rejected = filename
        .chars()
        .enumerate()
        .find(|&(_, c)| c < ' ' && !matches!(c, '\t' | '\n' | '\r' | '\u{0B}' | '\u{0C}'));
    if let Some((position, character)) = rejected {
        return Err(NormalizeError::Encoding {
            character,
            position,
        });
    }
    Ok(normalize::run(filename, lexicon))
}

/// Normalizes a file name as handed out by the operating system.
///
/// # Errors
///
/// Returns [`NormalizeError::NotUnicode`] if `filename` is not valid
/// Unicode, or any error [`normalize`] returns.
pub fn normalize_os_str(filename: &OsStr, lexicon: &Lexicon) -> Result<String, NormalizeError> {
    let filename = filename
        .to_str()
        .ok_or_else(|| NormalizeError::NotUnicode(filename.to_string_lossy().into_owned()))?;
    normalize(filename, lexicon)
}
