//! Token classification.
//!
//! Word tokens are offered to a fixed sequence of rules, and the first rule
//! that claims a token decides how it renders:
//!
//! 1. contraction suffix after a word and an apostrophe (`don’t`)
//! 2. fragments joined across a period (`Lt.Col`, `12.jan.2025`, `m.d`)
//! 3. clock times (`9am`)
//! 4. fixed brand spellings and misspellings (`iPad`, `wifi`)
//! 5. units of measure, separator-less dates and number-words
//! 6. abbreviations
//! 7. ambiguous all-caps words (`OR`, `PA`)
//! 8. plain words, left to the case policy
//!
//! A period that only punctuates an abbreviation or date fragment is
//! dropped rather than emitted.

use std::sync::LazyLock;

use regex::Regex;

use super::case::capitalize_first;
use super::tokenize::{Token, TokenKind};
use crate::lexicon::Lexicon;
use crate::lexicon::tables::APOSTROPHE;

static TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)([ap]m)$").expect("time pattern"));

static NUMBER_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)([a-z]+)$").expect("number-word pattern"));

static LETTERS_THEN_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+\d").expect("letters-digit pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Class {
    Separator,
    Marker,
    Contraction,
    Abbreviation,
    CompoundAbbreviation,
    DateFragment,
    Unit,
    Time,
    SpecialCase,
    NumberWord,
    KeepCaps,
    /// Rendered later by the case policy.
    Word,
}

/// A token with its resolved class and rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Classified {
    pub text: String,
    pub class: Class,
}

impl Classified {
    fn new(text: impl Into<String>, class: Class) -> Self {
        Self {
            text: text.into(),
            class,
        }
    }

    /// The separator character, if this is a separator.
    pub fn separator(&self) -> Option<char> {
        if self.class == Class::Separator {
            self.text.chars().next()
        } else {
            None
        }
    }

    pub fn is_separator(&self, c: char) -> bool {
        self.separator() == Some(c)
    }

    /// Whether this token carries text of its own (not a separator or
    /// marker).
    pub fn is_content(&self) -> bool {
        !matches!(self.class, Class::Separator | Class::Marker)
    }
}

/// What the previous emitted token makes of a following period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Carry {
    None,
    Abbreviation,
    DateFragment,
}

#[derive(Debug)]
enum Action {
    Push(Classified),
    /// Replace the last `drop` output tokens with one merged token.
    Replace { drop: usize, token: Classified },
    Suppress,
}

#[derive(Debug)]
struct Step {
    action: Action,
    consumed: usize,
    /// `None` keeps the current carry.
    carry: Option<Carry>,
}

impl Step {
    fn push(token: Classified, carry: Carry) -> Self {
        Self {
            action: Action::Push(token),
            consumed: 1,
            carry: Some(carry),
        }
    }

    fn replace(drop: usize, token: Classified, carry: Carry) -> Self {
        Self {
            action: Action::Replace { drop, token },
            consumed: 1,
            carry: Some(carry),
        }
    }

    fn suppress() -> Self {
        Self {
            action: Action::Suppress,
            consumed: 1,
            carry: None,
        }
    }

    fn consuming(mut self, tokens: usize) -> Self {
        self.consumed = tokens;
        self
    }
}

struct Classifier<'t, 'a> {
    tokens: &'t [Token<'a>],
    lexicon: &'t Lexicon,
    out: Vec<Classified>,
    carry: Carry,
}

/// Classify `tokens` left to right.
pub(crate) fn classify(tokens: &[Token<'_>], lexicon: &Lexicon) -> Vec<Classified> {
    let mut classifier = Classifier {
        tokens,
        lexicon,
        out: Vec::with_capacity(tokens.len()),
        carry: Carry::None,
    };

    let mut cursor = 0;
    while cursor < tokens.len() {
        let step = classifier.step(cursor);
        log::trace!("{:?} -> {:?}", tokens[cursor].text, step.action);
        cursor += step.consumed.max(1);
        classifier.apply(step);
    }
    classifier.out
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

impl Classifier<'_, '_> {
    fn apply(&mut self, step: Step) {
        match step.action {
            Action::Push(token) => self.out.push(token),
            Action::Replace { drop, token } => {
                self.out.truncate(self.out.len().saturating_sub(drop));
                self.out.push(token);
            }
            Action::Suppress => {}
        }
        if let Some(carry) = step.carry {
            self.carry = carry;
        }
    }

    fn step(&self, i: usize) -> Step {
        let token = self.tokens[i];
        match token.kind {
            TokenKind::Marker => Step::push(Classified::new(token.text, Class::Marker), Carry::None),
            TokenKind::Separator => self.separator(i),
            TokenKind::Word => self
                .contraction(i)
                .or_else(|| self.joined_across_period(i))
                .or_else(|| self.time(token.text))
                .or_else(|| self.special_case(i))
                .or_else(|| self.unit(i))
                .or_else(|| self.abbreviation(token.text))
                .or_else(|| self.keep_caps(token.text))
                .unwrap_or_else(|| {
                    Step::push(Classified::new(token.text, Class::Word), Carry::None)
                }),
        }
    }

    fn separator(&self, i: usize) -> Step {
        let token = self.tokens[i];
        if token.is_separator('.') && self.carry != Carry::None && self.period_is_structural(i) {
            return Step::suppress();
        }
        Step::push(Classified::new(token.text, Class::Separator), Carry::None)
    }

    /// A period after an abbreviation or date fragment is dropped when no
    /// word or preserved term follows it directly, or when the following
    /// word joins the fragment.
    fn period_is_structural(&self, i: usize) -> bool {
        match self.tokens.get(i + 1) {
            Some(next) if next.is_word() => self.joins_previous(i + 1),
            Some(next) => next.kind != TokenKind::Marker,
            None => true,
        }
    }

    fn joins_previous(&self, next: usize) -> bool {
        let Some(last) = self.out.last() else {
            return false;
        };
        let text = self.tokens[next].text;
        match last.class {
            Class::Abbreviation | Class::CompoundAbbreviation => {
                self.compound(&last.text, next).is_some()
                    || (is_digits(text) && self.lexicon.month(&last.text).is_some())
            }
            Class::DateFragment => is_digits(text),
            _ => false,
        }
    }

    /// The compound formed by `first` and the abbreviation at token `i`.
    ///
    /// Only mixed-case results merge: `Lt.Col` becomes `LtCol`, while
    /// `FBI.CIA` keeps its period because `FBICIA` would read back as a
    /// word. A token that starts a fixed spelling such as `Wi-Fi` never
    /// merges.
    fn compound(&self, first: &str, i: usize) -> Option<String> {
        if self.special_case(i).is_some() {
            return None;
        }
        let second = self.lexicon.abbreviation(self.tokens[i].text)?;
        let merged = format!("{first}{second}");
        let mixed =
            merged.chars().any(char::is_uppercase) && merged.chars().any(char::is_lowercase);
        mixed.then_some(merged)
    }

    fn contraction(&self, i: usize) -> Option<Step> {
        let text = self.tokens[i].text;
        if !self.lexicon.is_contraction(text) {
            return None;
        }
        let [.., before, apostrophe] = self.out.as_slice() else {
            return None;
        };
        if !apostrophe.is_separator(APOSTROPHE) || before.text.trim().is_empty() {
            return None;
        }
        Some(Step::push(
            Classified::new(text.to_lowercase(), Class::Contraction),
            Carry::None,
        ))
    }

    /// Merges with what precedes a period: compound abbreviations, dates
    /// written with periods, and abbreviations spelled with periods.
    fn joined_across_period(&self, i: usize) -> Option<Step> {
        if i == 0 || !self.tokens[i - 1].is_separator('.') {
            return None;
        }
        let text = self.tokens[i].text;
        let last = self.out.last()?;

        if matches!(
            last.class,
            Class::Abbreviation | Class::CompoundAbbreviation
        ) && let Some(merged) = self.compound(&last.text, i)
        {
            return Some(Step::replace(
                1,
                Classified::new(merged, Class::CompoundAbbreviation),
                Carry::Abbreviation,
            ));
        }

        if let Some(month) = self.lexicon.month(text)
            && let [.., digits, period] = self.out.as_slice()
            && period.is_separator('.')
            && is_digits(&digits.text)
        {
            let merged = format!("{}{month}", digits.text);
            return Some(Step::replace(
                2,
                Classified::new(merged, Class::DateFragment),
                Carry::DateFragment,
            ));
        }

        let after_date = last.class == Class::DateFragment
            || (last.class == Class::Abbreviation && self.lexicon.month(&last.text).is_some());
        if is_digits(text) && after_date {
            let merged = format!("{}{text}", last.text);
            return Some(Step::replace(
                1,
                Classified::new(merged, Class::DateFragment),
                Carry::DateFragment,
            ));
        }

        let fragments = self
            .out
            .iter()
            .rev()
            .take_while(|t| !t.is_separator(' ') && !t.is_separator(','))
            .count();
        let tail = &self.out[self.out.len() - fragments..];
        if !tail.iter().any(Classified::is_content) {
            return None;
        }
        let mut combined: String = tail.iter().map(|t| t.text.as_str()).collect();
        combined.push_str(text);
        let canonical = self.lexicon.abbreviation(&combined)?;
        Some(Step::replace(
            fragments,
            Classified::new(canonical, Class::Abbreviation),
            Carry::Abbreviation,
        ))
    }

    fn time(&self, text: &str) -> Option<Step> {
        let caps = TIME.captures(text)?;
        let rendered = format!("{}{}", &caps[1], caps[2].to_uppercase());
        Some(Step::push(Classified::new(rendered, Class::Time), Carry::None))
    }

    fn special_case(&self, i: usize) -> Option<Step> {
        let text = self.tokens[i].text;
        // a hyphenated spelling such as Wi-Fi spans three tokens
        if let Some(&[separator, next]) = self.tokens.get(i + 1..i + 3)
            && separator.kind == TokenKind::Separator
            && next.is_word()
            && let Some(canonical) = self
                .lexicon
                .special_case(&format!("{text}{}{}", separator.text, next.text))
        {
            return Some(
                Step::push(Classified::new(canonical, Class::SpecialCase), Carry::None)
                    .consuming(3),
            );
        }
        let canonical = self.lexicon.special_case(text)?;
        Some(Step::push(
            Classified::new(canonical, Class::SpecialCase),
            Carry::None,
        ))
    }

    fn unit(&self, i: usize) -> Option<Step> {
        let text = self.tokens[i].text;
        let numeric = text.starts_with(|c: char| c.is_ascii_digit());
        let standalone = self.lexicon.is_standalone_unit(text);
        if !numeric && !standalone && !LETTERS_THEN_DIGIT.is_match(text) {
            return None;
        }

        if let Some(step) = self.spaced_unit(i) {
            return Some(step);
        }
        if let Some(date) = self.lexicon.month_date(text) {
            return Some(Step::push(
                Classified::new(date, Class::DateFragment),
                Carry::DateFragment,
            ));
        }
        if let Some(unit) = self.lexicon.unit(text) {
            return Some(Step::push(Classified::new(unit, Class::Unit), Carry::None));
        }
        if standalone {
            return Some(Step::push(
                Classified::new(text.to_lowercase(), Class::Unit),
                Carry::Abbreviation,
            ));
        }

        let lower = text.to_lowercase();
        let caps = NUMBER_WORD.captures(&lower)?;
        let rendered = format!("{}{}", &caps[1], capitalize_first(&caps[2]));
        Some(Step::push(
            Classified::new(rendered, Class::NumberWord),
            Carry::None,
        ))
    }

    /// `5 kb`, `10 Min`: a number, a space and a unit word.
    fn spaced_unit(&self, i: usize) -> Option<Step> {
        let digits = self.tokens[i].text;
        if !is_digits(digits) {
            return None;
        }
        let &[space, word] = self.tokens.get(i + 1..i + 3)? else {
            return None;
        };
        if !space.is_separator(' ')
            || !word.is_word()
            || word.text.chars().count() < 2
            || !word.text.starts_with(char::is_alphabetic)
            || self.lexicon.is_lowercase_word(word.text)
        {
            return None;
        }

        let rendered = self.lexicon.unit(&format!("{digits}{}", word.text))?;
        let suffix = rendered.get(digits.len()..)?;
        let carry = if self.lexicon.is_standalone_unit(suffix) {
            Carry::Abbreviation
        } else {
            Carry::None
        };
        Some(
            Step::push(
                Classified::new(format!("{digits} {suffix}"), Class::Unit),
                carry,
            )
            .consuming(3),
        )
    }

    fn abbreviation(&self, text: &str) -> Option<Step> {
        if let Some(canonical) = self.lexicon.abbreviation(text) {
            return Some(Step::push(
                Classified::new(canonical, Class::Abbreviation),
                Carry::Abbreviation,
            ));
        }
        let compound = self.split_compound(text)?;
        Some(Step::push(
            Classified::new(compound, Class::CompoundAbbreviation),
            Carry::Abbreviation,
        ))
    }

    /// Recognize a compound that was already merged, such as `LtColGen`.
    ///
    /// Only mixed-case words written exactly as a run of canonical
    /// abbreviations qualify, so shouted words like `MIND` stay words.
    fn split_compound(&self, text: &str) -> Option<String> {
        let mixed = text.chars().any(char::is_uppercase) && text.chars().any(char::is_lowercase);
        (mixed && self.lexicon.is_compound_abbreviation(text)).then(|| text.to_string())
    }

    fn keep_caps(&self, text: &str) -> Option<Step> {
        self.lexicon.keep_caps(text)?;
        let all_caps =
            text.chars().any(char::is_alphabetic) && !text.chars().any(char::is_lowercase);
        all_caps.then(|| {
            Step::push(
                Classified::new(text.to_uppercase(), Class::KeepCaps),
                Carry::None,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tokenize::tokenize;
    use super::*;

    fn classes(text: &str) -> Vec<(String, Class)> {
        let lexicon = Lexicon::default();
        let tokens = tokenize(text, &lexicon).unwrap();
        classify(&tokens, &lexicon)
            .into_iter()
            .map(|t| (t.text, t.class))
            .collect()
    }

    fn pair(text: &str, class: Class) -> (String, Class) {
        (text.to_string(), class)
    }

    #[test]
    fn test_contraction_needs_word_before_apostrophe() {
        assert_eq!(
            classes("don\u{2019}t"),
            vec![
                pair("don", Class::Word),
                pair("\u{2019}", Class::Separator),
                pair("t", Class::Contraction),
            ]
        );
        assert_eq!(
            classes("catch \u{2019}em"),
            vec![
                pair("catch", Class::Word),
                pair(" ", Class::Separator),
                pair("\u{2019}", Class::Separator),
                pair("em", Class::Word),
            ]
        );
    }

    #[test]
    fn test_compound_abbreviation() {
        assert_eq!(
            classes("lt.col."),
            vec![pair("LtCol", Class::CompoundAbbreviation)]
        );
        assert_eq!(
            classes("LtCol"),
            vec![pair("LtCol", Class::CompoundAbbreviation)]
        );
        assert_eq!(
            classes("LtColGen"),
            vec![pair("LtColGen", Class::CompoundAbbreviation)]
        );
        assert_eq!(classes("MIND"), vec![pair("MIND", Class::Word)]);
    }

    #[test]
    fn test_all_caps_abbreviations_keep_their_period() {
        let expected = vec![
            pair("FBI", Class::Abbreviation),
            pair(".", Class::Separator),
            pair("CIA", Class::Abbreviation),
        ];
        assert_eq!(classes("fbi.cia"), expected);
        assert_eq!(classes("FBI.CIA"), expected);
        assert_eq!(
            classes("usmc.lt"),
            vec![pair("USMCLt", Class::CompoundAbbreviation)]
        );
    }

    #[test]
    fn test_fixed_spelling_does_not_join_abbreviation() {
        assert_eq!(
            classes("Dr.Wi-Fi"),
            vec![
                pair("Dr", Class::Abbreviation),
                pair(".", Class::Separator),
                pair("Wi-Fi", Class::SpecialCase),
            ]
        );
        assert_eq!(
            classes(".Wi-Fi"),
            vec![pair(".", Class::Separator), pair("Wi-Fi", Class::SpecialCase)]
        );
    }

    #[test]
    fn test_period_before_marker_is_kept() {
        assert_eq!(
            classes("g.\u{F0000}"),
            vec![
                pair("G", Class::Abbreviation),
                pair(".", Class::Separator),
                pair("\u{F0000}", Class::Marker),
            ]
        );
    }

    #[test]
    fn test_abbreviation_spelled_with_periods() {
        assert_eq!(classes("m.d"), vec![pair("MD", Class::Abbreviation)]);
        assert_eq!(classes("u.s.a"), vec![pair("USA", Class::Abbreviation)]);
    }

    #[test]
    fn test_period_after_abbreviation() {
        assert_eq!(
            classes("dr. smith"),
            vec![
                pair("Dr", Class::Abbreviation),
                pair(" ", Class::Separator),
                pair("smith", Class::Word),
            ]
        );
        // the period stays when the next word does not join
        assert_eq!(
            classes("dr.who"),
            vec![
                pair("Dr", Class::Abbreviation),
                pair(".", Class::Separator),
                pair("who", Class::Word),
            ]
        );
    }

    #[test]
    fn test_dates_across_periods() {
        assert_eq!(
            classes("12.jan.2025"),
            vec![pair("12Jan2025", Class::DateFragment)]
        );
        assert_eq!(
            classes("jan.2025"),
            vec![pair("Jan2025", Class::DateFragment)]
        );
        assert_eq!(
            classes("2025jan12"),
            vec![pair("2025Jan12", Class::DateFragment)]
        );
    }

    #[test]
    fn test_units() {
        assert_eq!(classes("9am"), vec![pair("9AM", Class::Time)]);
        assert_eq!(classes("2gB"), vec![pair("2GB", Class::Unit)]);
        assert_eq!(classes("HR"), vec![pair("hr", Class::Unit)]);
        assert_eq!(classes("10web"), vec![pair("10Web", Class::NumberWord)]);
        assert_eq!(classes("10 Min"), vec![pair("10 min", Class::Unit)]);
        assert_eq!(
            classes("10 of"),
            vec![
                pair("10", Class::Word),
                pair(" ", Class::Separator),
                pair("of", Class::Word),
            ]
        );
    }

    #[test]
    fn test_special_case_spans_hyphen() {
        assert_eq!(classes("wifi"), vec![pair("Wi-Fi", Class::SpecialCase)]);
        assert_eq!(classes("Wi-Fi"), vec![pair("Wi-Fi", Class::SpecialCase)]);
        assert_eq!(classes("ipad"), vec![pair("iPad", Class::SpecialCase)]);
    }

    #[test]
    fn test_keep_caps_only_when_shouted() {
        assert_eq!(classes("OR"), vec![pair("OR", Class::KeepCaps)]);
        assert_eq!(classes("or"), vec![pair("or", Class::Word)]);
        assert_eq!(classes("Pa"), vec![pair("Pa", Class::Word)]);
    }
}
