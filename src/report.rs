//! Rendering a rename plan for people.

use std::fmt::Write;
use std::path::Path;

use similar::{ChangeTag, TextDiff};
use unicode_width::UnicodeWidthStr;

use crate::renamer::{Outcome, Plan, Summary};

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Render the proposed renames, conflicts and failures in `plan`.
///
/// Paths are shown relative to `base`. Proposed renames are aligned on
/// their arrows by display width. With `color`, the characters that change
/// are highlighted.
pub fn render(plan: &Plan, base: &Path, color: bool) -> String {
    let display = |path: &Path| {
        path.strip_prefix(base)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    };

    let renames: Vec<(String, String)> = plan
        .renames()
        .map(|(from, to)| (display(from), display(to)))
        .collect();
    let width = renames.iter().map(|(old, _)| old.width()).max().unwrap_or(0);

    let mut output = String::new();
    for (old, new) in &renames {
        let padding = " ".repeat(width - old.width());
        let (old, new) = if color {
            highlight(old, new)
        } else {
            (old.clone(), new.clone())
        };
        let _ = writeln!(output, "{old}{padding} -> {new}");
    }

    for entry in &plan.entries {
        match &entry.outcome {
            Outcome::TargetExists { to } => {
                let _ = writeln!(
                    output,
                    "skipped {}: {} already exists",
                    display(&entry.path),
                    display(to)
                );
            }
            Outcome::Failed(err) => {
                let _ = writeln!(output, "failed {}: {err}", display(&entry.path));
            }
            Outcome::Rename { .. } | Outcome::Unchanged => {}
        }
    }
    output
}

/// Mark the characters removed from `old` and added in `new`.
fn highlight(old: &str, new: &str) -> (String, String) {
    let diff = TextDiff::from_chars(old, new);
    let mut left = String::with_capacity(old.len());
    let mut right = String::with_capacity(new.len());
    for change in diff.iter_all_changes() {
        let text = change.value();
        match change.tag() {
            ChangeTag::Equal => {
                left.push_str(text);
                right.push_str(text);
            }
            ChangeTag::Delete => {
                let _ = write!(left, "{RED}{text}{RESET}");
            }
            ChangeTag::Insert => {
                let _ = write!(right, "{GREEN}{text}{RESET}");
            }
        }
    }
    (left, right)
}

/// One line with the counts of a plan or of applied renames.
pub fn summary_line(summary: &Summary) -> String {
    let plural = |n: usize, word: &str| {
        if n == 1 {
            format!("{n} {word}")
        } else {
            format!("{n} {word}s")
        }
    };
    format!(
        "{} to rename, {} unchanged, {} skipped, {}",
        plural(summary.renames, "file"),
        summary.unchanged,
        summary.conflicts,
        plural(summary.failures, "failure")
    )
}
