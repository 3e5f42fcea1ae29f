//! Character substitution and preserved-term protection.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::lexicon::tables::COLLAPSE_CHARS;
use crate::lexicon::{Lexicon, MARKER_BASE, MARKER_LAST, PreservedTerm};

static FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)\s*/\s*(\d)").expect("fraction pattern"));

/// Text with preserved terms hidden behind single-character markers.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Protected {
    pub text: String,
    /// Literal text for each marker, indexed by marker number.
    pub literals: Vec<String>,
}

/// Collapse whitespace, substitute forbidden characters and collapse runs of
/// repeated punctuation.
pub(crate) fn substitute(text: &str, lexicon: &Lexicon) -> String {
    let text = collapse_whitespace(text);
    let slash = lexicon.replacements().get("/").unwrap_or("/");
    let text = FRACTION.replace_all(&text, |caps: &regex::Captures<'_>| {
        format!("{}{slash}{}", &caps[1], &caps[2])
    });
    let text = lexicon.replacements().apply(&text);
    collapse_runs(&text).trim().to_string()
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let c = match c {
            '\n' | '\r' | '\t' | '\u{0B}' | '\u{0C}' => ' ',
            c => c,
        };
        if c == ' ' && out.ends_with(' ') {
            continue;
        }
        out.push(c);
    }
    out
}

fn is_emoji(c: char) -> bool {
    matches!(c as u32, 0x1F300..=0x1FAFF | 0x2600..=0x26FF)
}

fn collapse_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let rule = COLLAPSE_CHARS.iter().find(|(from, _)| *from == c);
        if rule.is_none() && !is_emoji(c) {
            out.push(c);
            continue;
        }
        let mut run = 1;
        while chars.peek() == Some(&c) {
            chars.next();
            run += 1;
        }
        match rule {
            Some((_, Some(alternate))) if run >= 2 => out.push(*alternate),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn is_marker(c: char) -> bool {
    (MARKER_BASE..=MARKER_LAST).contains(&(c as u32))
}

fn marker(index: usize) -> Option<char> {
    let code = MARKER_BASE.checked_add(u32::try_from(index).ok()?)?;
    if code > MARKER_LAST {
        return None;
    }
    char::from_u32(code)
}

/// Replace every occurrence of every preserved term with a marker.
///
/// Characters that already fall in the marker range are escaped first, each
/// run behind a marker of its own, so [`restore`] gives them back unchanged.
pub(crate) fn protect(text: &str, lexicon: &Lexicon) -> Protected {
    let (mut text, mut literals) = escape_markers(text);
    let escaped = literals.len();

    'terms: for term in lexicon.preserved_terms() {
        while let Some(range) = find_term(&text, term, lexicon) {
            let Some(marker) = marker(literals.len()) else {
                break 'terms;
            };
            log::trace!("protecting {:?} as marker {}", &text[range.clone()], literals.len());
            literals.push(term.literal().to_string());
            text.replace_range(range, marker.encode_utf8(&mut [0; 4]));
        }
    }

    Protected {
        text: separate_markers(&text, escaped),
        literals,
    }
}

fn escape_markers(text: &str) -> (String, Vec<String>) {
    let mut out = String::with_capacity(text.len());
    let mut literals = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if !is_marker(c) {
            out.push(c);
            continue;
        }
        let mut run = String::from(c);
        while let Some(next) = chars.next_if(|&next| is_marker(next)) {
            run.push(next);
        }
        match marker(literals.len()) {
            Some(marker) => {
                out.push(marker);
                literals.push(run);
            }
            None => out.push_str(&run),
        }
    }
    (out, literals)
}

fn find_term(text: &str, term: &PreservedTerm, lexicon: &Lexicon) -> Option<Range<usize>> {
    if let Some(m) = term.exact().find(text) {
        return Some(m.range());
    }
    if let Some(m) = term.flexible().and_then(|re| re.find(text)) {
        return Some(m.range());
    }
    let range = find_folded(text, term.folded(), lexicon)?;
    Some(widen_to_affixes(text, range, term.literal(), lexicon))
}

/// Extend a folded match over the punctuation the literal starts or ends
/// with, so `e.g.` replaces all of `e.g.` and not just `e.g`.
fn widen_to_affixes(
    text: &str,
    range: Range<usize>,
    literal: &str,
    lexicon: &Lexicon,
) -> Range<usize> {
    let is_word = |c: char| c.is_alphanumeric() && !lexicon.is_glyph(c);
    let core = literal.trim_matches(|c: char| !is_word(c));
    let Some(offset) = literal.find(core) else {
        return range;
    };
    let lead = &literal[..offset];
    let trail = &literal[offset + core.len()..];

    let mut start = range.start;
    let mut end = range.end;
    if !lead.is_empty() && text[..start].ends_with(lead) {
        start -= lead.len();
    }
    if !trail.is_empty() && text[end..].starts_with(trail) {
        end += trail.len();
    }
    start..end
}

/// Find a run of adjacent words whose lower-cased concatenation equals
/// `target`, so `WordPress` also matches `word press`.
fn find_folded(text: &str, target: &str, lexicon: &Lexicon) -> Option<Range<usize>> {
    if target.is_empty() {
        return None;
    }
    let is_word = |c: char| c.is_alphanumeric() && !lexicon.is_glyph(c);

    let mut words: Vec<(usize, usize)> = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        match (is_word(c), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                words.push((s, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push((s, text.len()));
    }

    for first in 0..words.len() {
        let mut folded = String::new();
        for last in first..words.len() {
            if last > first && text[words[last - 1].1..words[last].0].chars().any(is_marker) {
                break;
            }
            let (s, e) = words[last];
            folded.push_str(&text[s..e].to_lowercase());
            if folded == target {
                return Some(words[first].0..e);
            }
            if !target.starts_with(&folded) {
                break;
            }
        }
    }
    None
}

/// Put a space between adjacent term markers. Markers below `escaped`
/// stand for text that was already there and are left as they are.
fn separate_markers(text: &str, escaped: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_marker = false;
    for c in text.chars() {
        let current_marker = is_marker(c) && (c as u32 - MARKER_BASE) as usize >= escaped;
        if previous_marker && current_marker {
            out.push(' ');
        }
        out.push(c);
        previous_marker = current_marker;
    }
    out
}

/// Splice the literal text of every marker back in.
pub(crate) fn restore(text: &str, literals: &[String]) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let literal = is_marker(c)
            .then(|| literals.get((c as u32 - MARKER_BASE) as usize))
            .flatten();
        match literal {
            Some(literal) => out.push_str(literal),
            None => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_collapses() {
        let lexicon = Lexicon::default();
        assert_eq!(substitute("file\nwith\ttabs", &lexicon), "file with tabs");
        assert_eq!(substitute("  too    many  ", &lexicon), "too many");
    }

    #[test]
    fn test_fraction_slash() {
        let lexicon = Lexicon::default();
        assert_eq!(substitute("1 / 2 cup", &lexicon), "1\u{2215}2 cup");
        assert_eq!(substitute("and/or", &lexicon), "and\u{2215}or");
    }

    #[test]
    fn test_collapse_runs() {
        let lexicon = Lexicon::default();
        assert_eq!(substitute("a--b", &lexicon), "a\u{2014}b");
        assert_eq!(substitute("a-b", &lexicon), "a-b");
        assert_eq!(substitute("a___b", &lexicon), "a_b");
        assert_eq!(substitute("party\u{1F389}\u{1F389}\u{1F389}", &lexicon), "party\u{1F389}");
        assert_eq!(substitute("#####tag", &lexicon), "#tag");
    }

    #[test]
    fn test_forbidden_characters() {
        let lexicon = Lexicon::default();
        assert_eq!(
            substitute("file\\with*special:chars?", &lexicon),
            "file\u{29F5}with\u{2731}special\u{02D0}chars\u{2047}"
        );
    }

    #[test]
    fn test_protect_exact_and_restore() {
        let lexicon = Lexicon::builder()
            .preserved_term("Star Trek: The Next Generation")
            .build()
            .unwrap();
        let text = substitute("star trek: the next generation s01e01", &lexicon);
        let protected = protect(&text, &lexicon);
        assert_eq!(protected.literals, vec!["Star Trek\u{02D0} The Next Generation"]);
        assert!(protected.text.ends_with(" s01e01"));
        assert_eq!(
            restore(&protected.text, &protected.literals),
            "Star Trek\u{02D0} The Next Generation s01e01"
        );
    }

    #[test]
    fn test_protect_flexible_and_folded() {
        let lexicon = Lexicon::builder()
            .preserved_term("My Product Name")
            .preserved_term("WordPress Guide")
            .build()
            .unwrap();
        let protected = protect("review my-product  name", &lexicon);
        assert_eq!(protected.literals, vec!["My Product Name"]);
        let protected = protect("word press guide v2", &lexicon);
        assert_eq!(protected.literals, vec!["WordPress Guide"]);
        assert_eq!(
            restore(&protected.text, &protected.literals),
            "WordPress Guide v2"
        );
    }

    #[test]
    fn test_adjacent_markers_are_separated() {
        let lexicon = Lexicon::default();
        let protected = protect("e.g.i.e.", &lexicon);
        assert_eq!(protected.literals.len(), 2);
        assert_eq!(protected.text.chars().count(), 3);
        assert_eq!(restore(&protected.text, &protected.literals), "e.g. i.e.");
    }

    #[test]
    fn test_builtin_terms() {
        let lexicon = Lexicon::default();
        let protected = protect(&substitute("ac/dc live", &lexicon), &lexicon);
        assert_eq!(restore(&protected.text, &protected.literals), "AC\u{2215}DC live");
    }

    #[test]
    fn test_existing_marker_characters_survive() {
        let lexicon = Lexicon::default();
        let text = substitute("\u{F0000}\u{F0001} ac/dc e.g.", &lexicon);
        let protected = protect(&text, &lexicon);
        assert_eq!(protected.literals[0], "\u{F0000}\u{F0001}");
        assert_eq!(
            restore(&protected.text, &protected.literals),
            "\u{F0000}\u{F0001} AC\u{2215}DC e.g."
        );
    }
}
