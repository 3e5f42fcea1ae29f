//! The normalization pipeline.
//!
//! A name passes through these stages in order:
//!
//! 1. [`extension`] splits off the extension.
//! 2. [`chars`] collapses whitespace and swaps forbidden characters for
//!    look-alike glyphs, then trailing debris is removed.
//! 3. [`chars::protect`] hides preserved terms behind markers.
//! 4. [`tokenize`] splits the base name on boundary characters.
//! 5. [`classify`] decides what every word is.
//! 6. [`case`] renders each token.
//! 7. [`reassemble`] spaces sentence periods and cleans the tail again.
//!
//! Names whose extension preserves case (source code, configuration) skip
//! stages 3 to 7.

pub(crate) mod case;
pub(crate) mod chars;
mod classify;
mod extension;
pub(crate) mod reassemble;
mod tokenize;


use crate::lexicon::Lexicon;

/// Normalize a file name that is already known to be free of control
/// characters.
///
/// When the result would split into a different base name and extension
/// than the ones it was built from, as with `notes.draft:` becoming
/// `Notes.draft`, the result is normalized once more so that the output is
/// a fixed point.
pub(crate) fn run(filename: &str, lexicon: &Lexicon) -> String {
    let (name, extension) = normalize_once(filename, lexicon);
    let output = join(&name, extension.as_deref());
    if extension::split(&output, lexicon) == (name.as_str(), extension.as_deref()) {
        return output;
    }

    log::debug!("{output:?} reads differently from how it was built; normalizing again");
    let (name, extension) = normalize_once(&output, lexicon);
    join(&name, extension.as_deref())
}

fn join(name: &str, extension: Option<&str>) -> String {
    match extension {
        Some(extension) => format!("{name}.{extension}"),
        None => name.to_string(),
    }
}

fn normalize_once(filename: &str, lexicon: &Lexicon) -> (String, Option<String>) {
    let (base, extension) = extension::split(filename, lexicon);
    let mut extension = extension.map(str::to_lowercase);

    let mut name = reassemble::strip_trailing(&chars::substitute(base, lexicon), lexicon);
    if extension.is_none()
        && let Some((base, recovered)) = extension::recover(&name, lexicon)
    {
        log::debug!("recovered extension {recovered:?} from {name:?}");
        name = base;
        extension = Some(recovered);
    }

    let preserve_case = extension
        .as_deref()
        .is_some_and(|extension| lexicon.preserves_case(extension));
    if preserve_case {
        log::debug!("keeping the case of {name:?}");
    } else {
        name = title_case(&name, lexicon);
    }

    if !filename.chars().any(char::is_whitespace) {
        name.retain(|c| c != ' ');
    }

    log::debug!("normalized {filename:?} to {name:?} with extension {extension:?}");
    (name, extension)
}

fn title_case(name: &str, lexicon: &Lexicon) -> String {
    let protected = chars::protect(name, lexicon);
    let tokens = match tokenize::tokenize(&protected.text, lexicon) {
        Ok(tokens) => tokens,
        Err(exceeded) => {
            log::debug!(
                "{} tokens exceed the limit of {}; leaving the case of {name:?} alone",
                exceeded.count,
                tokenize::TOKEN_LIMIT
            );
            return name.to_string();
        }
    };

    let classified = classify::classify(&tokens, lexicon);
    let rendered = case::render(&classified, lexicon).concat();
    let spaced = reassemble::space_periods(&rendered, lexicon);
    reassemble::strip_trailing(&chars::restore(&spaced, &protected.literals), lexicon)
}
