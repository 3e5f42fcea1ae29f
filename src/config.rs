// SPDX-FileCopyrightText: 2025 File Renamer contributors
// SPDX-License-Identifier: GPL-3.0-or-later
//! Settings file support.
//!
//! Two formats are read: a `.file-renamer.toml` file and the line-oriented
//! `settings.ini` file:
//!
//! ~~~~ text
//! # comments start with a hash
//! [abbreviations]
//! NATO
//! MyCompany
//!
//! [preserved_terms]
//! Star Trek: The Next Generation
//! ~~~~
//!
//! Entries are validated one by one, and a bad entry is reported without
//! rejecting the rest of the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::lexicon::{Lexicon, LexiconError, PreservedTerm, TermKind};

/// The TOML configuration file name.
pub const CONFIG_FILE_NAME: &str = ".file-renamer.toml";

/// The line-oriented settings file name.
pub const SETTINGS_FILE_NAME: &str = "settings.ini";

/// Longest accepted entry, in UTF-16 code units.
pub const MAX_ENTRY_LENGTH: usize = 255;

/// Settings for the renamer.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Abbreviations added to the built-in list, in their display form.
    pub abbreviations: Vec<String>,

    /// Terms kept verbatim wherever they appear.
    pub preserved_terms: Vec<String>,

    /// Glob patterns for file names that are never renamed (default: empty).
    pub exclude: Vec<String>,

    /// Descend into subdirectories (default: false).
    pub recursive: bool,

    /// Entries dropped during validation.
    #[serde(skip)]
    pub rejected: Vec<RejectedEntry>,
}

/// A settings entry that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    pub kind: TermKind,
    pub entry: String,
    pub reason: RejectReason,
}

/// Why a settings entry was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("entry is empty")]
    Empty,
    #[error("entry contains a control character")]
    ControlCharacter,
    #[error("entry is {0} UTF-16 code units long (limit {max})", max = MAX_ENTRY_LENGTH)]
    TooLong(usize),
    #[error("entry has no letters or digits")]
    NoWords,
    #[error("entry cannot be matched")]
    Unmatchable,
}

/// Check a single settings entry.
pub fn check_entry(entry: &str) -> Result<(), RejectReason> {
    if entry.trim().is_empty() {
        return Err(RejectReason::Empty);
    }
    if entry.chars().any(char::is_control) {
        return Err(RejectReason::ControlCharacter);
    }
    let units = entry.encode_utf16().count();
    if units > MAX_ENTRY_LENGTH {
        return Err(RejectReason::TooLong(units));
    }
    Ok(())
}

impl Config {
    /// Parse a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Self = toml::from_str(toml_str)?;
        Ok(config.validated())
    }

    /// Parse a line-oriented settings file.
    ///
    /// Section headers are matched case-insensitively. Lines outside a known
    /// section are ignored.
    pub fn from_ini(content: &str) -> Self {
        let mut config = Self::default();
        let mut section = None;
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                section = match name.trim().to_lowercase().as_str() {
                    "abbreviations" => Some(TermKind::Abbreviation),
                    "preserved_terms" => Some(TermKind::PreservedTerm),
                    other => {
                        log::debug!("ignoring unknown settings section [{other}]");
                        None
                    }
                };
                continue;
            }
            match section {
                Some(TermKind::Abbreviation) => config.abbreviations.push(line.to_string()),
                Some(TermKind::PreservedTerm) => config.preserved_terms.push(line.to_string()),
                None => {}
            }
        }
        config.validated()
    }

    /// Load configuration from a file, choosing the format by extension.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let is_toml = path.extension().is_some_and(|ext| ext == "toml");
        if is_toml {
            Self::from_toml(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
        } else {
            Ok(Self::from_ini(&content))
        }
    }

    /// Search for a settings file from `start_dir` up to the filesystem
    /// root. In each directory `.file-renamer.toml` wins over `settings.ini`.
    pub fn find(start_dir: &Path) -> Option<PathBuf> {
        start_dir.ancestors().find_map(|dir| {
            [CONFIG_FILE_NAME, SETTINGS_FILE_NAME]
                .iter()
                .map(|name| dir.join(name))
                .find(|path| path.is_file())
        })
    }

    /// The per-user settings file, `~/.config/file_renamer/settings.ini`.
    pub fn user_settings_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("file_renamer")
                .join(SETTINGS_FILE_NAME),
        )
    }

    /// Discover and load configuration.
    ///
    /// Searches up the directory tree from `start_dir`, then falls back to
    /// the per-user settings file. Returns `None` if neither exists.
    pub fn discover(start_dir: &Path) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        let path = Self::find(start_dir)
            .or_else(|| Self::user_settings_path().filter(|path| path.is_file()));
        let Some(path) = path else {
            return Ok(None);
        };
        log::debug!("using settings from {}", path.display());
        let config = Self::from_file(&path)?;
        Ok(Some((path, config)))
    }

    /// Merge the configured entries into the built-in lexicon.
    pub fn lexicon(&self) -> Result<Lexicon, ConfigError> {
        let lexicon = Lexicon::builder()
            .abbreviations(self.abbreviations.iter().cloned())
            .preserved_terms(self.preserved_terms.iter().cloned())
            .build()?;
        Ok(lexicon)
    }

    /// Compile the exclude patterns.
    pub fn exclude_patterns(&self) -> Result<Vec<glob::Pattern>, ConfigError> {
        self.exclude
            .iter()
            .map(|p| glob::Pattern::new(p).map_err(|e| ConfigError::Glob(p.clone(), e)))
            .collect()
    }

    fn validated(mut self) -> Self {
        let mut rejected = Vec::new();
        let mut keep = |kind: TermKind, entries: Vec<String>| -> Vec<String> {
            entries
                .into_iter()
                .filter_map(|entry| {
                    match check_entry(&entry).and_then(|()| check_term(kind, &entry)) {
                        Ok(()) => Some(entry.trim().to_string()),
                        Err(reason) => {
                            log::warn!("ignoring {kind} {entry:?}: {reason}");
                            rejected.push(RejectedEntry {
                                kind,
                                entry,
                                reason,
                            });
                            None
                        }
                    }
                })
                .collect()
        };
        self.abbreviations = keep(TermKind::Abbreviation, std::mem::take(&mut self.abbreviations));
        self.preserved_terms = keep(
            TermKind::PreservedTerm,
            std::mem::take(&mut self.preserved_terms),
        );
        self.rejected.extend(rejected);
        self
    }
}

/// Check that a preserved term compiles, so one bad entry cannot stop the
/// whole lexicon from building.
fn check_term(kind: TermKind, entry: &str) -> Result<(), RejectReason> {
    if kind != TermKind::PreservedTerm {
        return Ok(());
    }
    match PreservedTerm::new(entry) {
        Ok(_) => Ok(()),
        Err(LexiconError::InvalidTerm { .. }) => Err(RejectReason::NoWords),
        Err(_) => Err(RejectReason::Unmatchable),
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading the configuration file.
    #[error("failed to read {}: {1}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),
    /// Error parsing the TOML configuration.
    #[error("failed to parse {}: {1}", .0.display())]
    Parse(PathBuf, #[source] toml::de::Error),
    /// Error parsing a glob pattern.
    #[error("invalid glob pattern '{0}': {1}")]
    Glob(String, #[source] glob::PatternError),
    /// The configured entries do not form a valid lexicon.
    #[error(transparent)]
    Lexicon(#[from] LexiconError),
}
