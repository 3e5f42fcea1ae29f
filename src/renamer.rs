//! Batch renaming of the files in a directory.
//!
//! [`plan`] only reads the file system; [`apply`] performs the renames the
//! plan proposes.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use walkdir::WalkDir;

use crate::{Lexicon, NormalizeError, normalize_os_str};

/// Which files a plan covers.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Descend into subdirectories.
    pub recursive: bool,
    /// File name patterns to leave alone.
    pub exclude: Vec<glob::Pattern>,
}

/// What happens to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The file gets a new name.
    Rename { to: PathBuf },
    /// The name is already normalized.
    Unchanged,
    /// Another file already has, or will get, the normalized name.
    TargetExists { to: PathBuf },
    /// The name could not be normalized.
    Failed(NormalizeError),
}

/// A file and its planned outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    pub outcome: Outcome,
}

/// Counts of each kind of outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub renames: usize,
    pub unchanged: usize,
    pub conflicts: usize,
    pub failures: usize,
}

/// The outcome for every file, sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub entries: Vec<Entry>,
}

impl Plan {
    /// The proposed renames as `(from, to)` pairs.
    pub fn renames(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.entries.iter().filter_map(|entry| match &entry.outcome {
            Outcome::Rename { to } => Some((entry.path.as_path(), to.as_path())),
            _ => None,
        })
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for entry in &self.entries {
            match entry.outcome {
                Outcome::Rename { .. } => summary.renames += 1,
                Outcome::Unchanged => summary.unchanged += 1,
                Outcome::TargetExists { .. } => summary.conflicts += 1,
                Outcome::Failed(_) => summary.failures += 1,
            }
        }
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.renames().next().is_none()
    }
}

/// Errors that can occur while planning or applying renames.
#[derive(Debug, Error)]
pub enum RenameError {
    /// The directory could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    /// The target name was taken after the plan was made.
    #[error("{} already exists", .0.display())]
    TargetExists(PathBuf),
    /// Renaming, and then copying, failed.
    #[error("failed to rename {} to {}: {source}", from.display(), to.display())]
    Io {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
}

/// Decide the outcome for every regular file in `dir`.
///
/// Names are normalized in parallel. A file whose name cannot be normalized
/// is recorded as [`Outcome::Failed`] and does not stop the rest.
pub fn plan(dir: &Path, lexicon: &Lexicon, options: &Options) -> Result<Plan, RenameError> {
    let max_depth = if options.recursive { usize::MAX } else { 1 };
    let mut existing = HashSet::new();
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(max_depth) {
        let entry = entry.map_err(|source| RenameError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        existing.insert(entry.path().to_path_buf());
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if options.exclude.iter().any(|pattern| pattern.matches(&name)) {
            log::debug!("excluding {}", entry.path().display());
            continue;
        }
        files.push(entry.into_path());
    }
    files.sort();

    let normalized: Vec<_> = files
        .into_par_iter()
        .map(|path| {
            let result = normalize_os_str(path.file_name().unwrap_or_default(), lexicon);
            (path, result)
        })
        .collect();

    let mut claimed = HashSet::new();
    let entries = normalized
        .into_iter()
        .map(|(path, result)| {
            let outcome = match result {
                Ok(name) => resolve(&path, &name, &existing, &mut claimed),
                Err(err) => {
                    log::warn!("cannot normalize {}: {err}", path.display());
                    Outcome::Failed(err)
                }
            };
            Entry { path, outcome }
        })
        .collect();
    Ok(Plan { entries })
}

fn resolve(
    path: &Path,
    name: &str,
    existing: &HashSet<PathBuf>,
    claimed: &mut HashSet<PathBuf>,
) -> Outcome {
    if path.file_name() == Some(OsStr::new(name)) {
        return Outcome::Unchanged;
    }
    let to = path.with_file_name(name);
    if existing.contains(&to) || !claimed.insert(to.clone()) {
        log::debug!("{} is taken; skipping {}", to.display(), path.display());
        return Outcome::TargetExists { to };
    }
    Outcome::Rename { to }
}

/// Perform every rename in `plan`.
///
/// Each rename reports its own result, and a failure does not stop the
/// others.
pub fn apply(plan: &Plan) -> Vec<Result<PathBuf, RenameError>> {
    plan.renames()
        .map(|(from, to)| rename_file(from, to).map(|()| to.to_path_buf()))
        .collect()
}

/// Rename `from` to `to`, copying when a plain rename is refused.
///
/// An existing `to` is never overwritten, except when it differs from
/// `from` only in case and so may be the same file on a case-insensitive
/// file system.
pub fn rename_file(from: &Path, to: &Path) -> Result<(), RenameError> {
    if to.exists() && !differs_only_in_case(from, to) {
        return Err(RenameError::TargetExists(to.to_path_buf()));
    }
    let io_error = |source| RenameError::Io {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(err)
            if matches!(
                err.kind(),
                io::ErrorKind::InvalidInput | io::ErrorKind::PermissionDenied
            ) =>
        {
            log::debug!("rename of {} failed ({err}); copying", from.display());
            copy_then_remove(from, to, |path| fs::remove_file(path)).map_err(io_error)
        }
        Err(err) => Err(io_error(err)),
    }
}

/// Copy `from` to `to`, then remove `from` with `remove`. When the removal
/// fails the copy is deleted again, leaving only the original.
fn copy_then_remove(
    from: &Path,
    to: &Path,
    remove: impl FnOnce(&Path) -> io::Result<()>,
) -> io::Result<()> {
    fs::copy(from, to)?;
    if let Err(err) = remove(from) {
        if let Err(cleanup) = fs::remove_file(to) {
            log::warn!("could not remove the copy {}: {cleanup}", to.display());
        }
        return Err(err);
    }
    Ok(())
}

fn differs_only_in_case(from: &Path, to: &Path) -> bool {
    let lower = |path: &Path| path.to_string_lossy().to_lowercase();
    from != to && lower(from) == lower(to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), name).unwrap();
    }

    #[test]
    fn test_resolve_unchanged_and_conflicts() {
        let dir = Path::new("/music");
        let existing: HashSet<PathBuf> = [dir.join("Song.mp3")].into_iter().collect();
        let mut claimed = HashSet::new();

        assert_eq!(
            resolve(&dir.join("Song.mp3"), "Song.mp3", &existing, &mut claimed),
            Outcome::Unchanged
        );
        assert_eq!(
            resolve(&dir.join("song.MP3"), "Song.mp3", &existing, &mut claimed),
            Outcome::TargetExists {
                to: dir.join("Song.mp3")
            }
        );
        assert_eq!(
            resolve(&dir.join("a.TXT"), "A.txt", &existing, &mut claimed),
            Outcome::Rename {
                to: dir.join("A.txt")
            }
        );
        assert_eq!(
            resolve(&dir.join("A.Txt"), "A.txt", &existing, &mut claimed),
            Outcome::TargetExists {
                to: dir.join("A.txt")
            }
        );
    }

    #[test]
    fn test_plan_skips_directories_and_excluded_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path(), "hello world.txt");
        touch(temp_dir.path(), "movie.part");
        fs::create_dir(temp_dir.path().join("sub dir")).unwrap();
        touch(&temp_dir.path().join("sub dir"), "nested file.txt");

        let options = Options {
            recursive: false,
            exclude: vec![glob::Pattern::new("*.part").unwrap()],
        };
        let plan = plan(temp_dir.path(), &Lexicon::default(), &options).unwrap();
        let renames: Vec<_> = plan.renames().collect();
        assert_eq!(
            renames,
            vec![(
                temp_dir.path().join("hello world.txt").as_path(),
                temp_dir.path().join("Hello World.txt").as_path()
            )]
        );
    }

    #[test]
    fn test_plan_recursive() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        touch(&temp_dir.path().join("sub"), "nested file.txt");

        let options = Options {
            recursive: true,
            ..Options::default()
        };
        let plan = plan(temp_dir.path(), &Lexicon::default(), &options).unwrap();
        assert_eq!(plan.summary().renames, 1);
        assert_eq!(
            plan.entries[0].outcome,
            Outcome::Rename {
                to: temp_dir.path().join("sub").join("Nested File.txt")
            }
        );
    }

    #[test]
    fn test_rename_file_refuses_to_overwrite() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path(), "first.txt");
        touch(temp_dir.path(), "second.txt");
        let err = rename_file(
            &temp_dir.path().join("first.txt"),
            &temp_dir.path().join("second.txt"),
        )
        .unwrap_err();
        assert!(matches!(err, RenameError::TargetExists(_)));
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("second.txt")).unwrap(),
            "second.txt"
        );
    }

    #[test]
    fn test_copy_is_removed_when_original_stays() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path(), "locked.txt");
        let from = temp_dir.path().join("locked.txt");
        let to = temp_dir.path().join("Locked.txt.tmp");
        let err = copy_then_remove(&from, &to, |_| {
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        })
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(from.is_file());
        assert!(!to.exists());
    }

    #[test]
    fn test_copy_then_remove_moves_the_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path(), "a.txt");
        let from = temp_dir.path().join("a.txt");
        let to = temp_dir.path().join("b.txt");
        copy_then_remove(&from, &to, |path| fs::remove_file(path)).unwrap();
        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "a.txt");
    }

    #[test]
    fn test_apply() {
        let temp_dir = tempfile::tempdir().unwrap();
        touch(temp_dir.path(), "dr. smith md phd.txt");
        let plan = plan(temp_dir.path(), &Lexicon::default(), &Options::default()).unwrap();
        let results = apply(&plan);
        assert_eq!(results.len(), 1);
        let renamed = results.into_iter().next().unwrap().unwrap();
        assert_eq!(renamed, temp_dir.path().join("Dr Smith MD PhD.txt"));
        assert!(renamed.is_file());
        assert!(!temp_dir.path().join("dr. smith md phd.txt").exists());
    }
}
