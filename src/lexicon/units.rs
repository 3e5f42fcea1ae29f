//! Units of measure and separator-less dates.
//!
//! Patterns are tried in table order. Longer, more specific units sit above
//! the single-letter ones they would otherwise shadow.

use std::sync::LazyLock;

use regex::Regex;

use super::tables::MONTHS;

/// How the unit part of a matched token is re-cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitCase {
    /// `5KM` -> `5km`
    Lower,
    /// `9am` -> `9AM`
    Upper,
    /// Optional SI prefix (k lower, M/G/T upper) followed by a fixed tail.
    SiPrefix(&'static str),
    /// Optional prefix forced lower case followed by a fixed tail (`mL`).
    LowerPrefix(&'static str),
    /// Optional SI prefix followed by the upper-cased base unit (`kW`).
    SiUpper,
    /// SI prefix with the original case of the `b`/`B` kept, so bytes and
    /// bits stay distinct.
    ByteBit,
}

/// A single entry of the unit table.
#[derive(Debug, Clone)]
pub struct UnitPattern {
    regex: Regex,
    case: UnitCase,
}

const UNIT_TABLE: &[(&str, UnitCase)] = &[
    ("[kmgt]b(?:ps)?", UnitCase::ByteBit),
    ("[kmgt]?hz", UnitCase::SiPrefix("Hz")),
    ("[kmgt]?wh", UnitCase::SiPrefix("Wh")),
    ("[kmgt]?va", UnitCase::SiPrefix("VA")),
    ("[kmgt]?pa", UnitCase::SiPrefix("Pa")),
    ("[kmgt]?[ωΩ]", UnitCase::SiPrefix("Ω")),
    ("[ap]m", UnitCase::Upper),
    ("(?:st|nd|rd|th)", UnitCase::Lower),
    ("(?:mg|kg|bit|fps|rpm|mph|mpg|lkm|deg|sqm|sq|mm|cm|km|ms)", UnitCase::Lower),
    ("(?:hr|min|sec|wk|mo|yr)", UnitCase::Lower),
    ("[kmg]?l", UnitCase::LowerPrefix("L")),
    ("[kmgt][wvajn]", UnitCase::SiUpper),
    ("[wvajn]", UnitCase::SiUpper),
    ("[kcf]", UnitCase::Upper),
    ("(?:g|m|p|i|h|s|d)", UnitCase::Lower),
];

static UNIT_PATTERNS: LazyLock<Vec<UnitPattern>> = LazyLock::new(|| {
    UNIT_TABLE
        .iter()
        .map(|(unit, case)| UnitPattern {
            regex: Regex::new(&format!(r"(?i)^(\d+)({unit})$")).expect("unit table pattern"),
            case: *case,
        })
        .collect()
});

static MONTH_DATE: LazyLock<Regex> = LazyLock::new(|| {
    let mut names: Vec<&str> = MONTHS.iter().map(|(name, _)| *name).collect();
    names.sort_by_key(|name| std::cmp::Reverse(name.len()));
    Regex::new(&format!(r"(?i)^(\d*)({})(\d*)$", names.join("|"))).expect("month pattern")
});

/// The built-in unit table, in precedence order.
pub fn builtin() -> Vec<UnitPattern> {
    UNIT_PATTERNS.clone()
}

impl UnitPattern {
    /// Render `token` if this pattern matches it.
    pub fn render(&self, token: &str) -> Option<String> {
        let caps = self.regex.captures(token)?;
        let digits = caps.get(1)?.as_str();
        let unit = caps.get(2)?.as_str();
        Some(format!("{digits}{}", self.case.apply(unit)))
    }
}

impl UnitCase {
    fn apply(self, unit: &str) -> String {
        match self {
            UnitCase::Lower => unit.to_lowercase(),
            UnitCase::Upper => unit.to_uppercase(),
            UnitCase::SiPrefix(tail) => match split_prefix(unit, tail) {
                Some(prefix) => format!("{}{tail}", si_prefix(prefix)),
                None => tail.to_string(),
            },
            UnitCase::LowerPrefix(tail) => match split_prefix(unit, tail) {
                Some(prefix) => format!("{}{tail}", prefix.to_ascii_lowercase()),
                None => tail.to_string(),
            },
            UnitCase::SiUpper => {
                let mut chars = unit.chars();
                match (chars.next(), chars.next()) {
                    (Some(prefix), Some(base)) => {
                        format!("{}{}", si_prefix(prefix), base.to_ascii_uppercase())
                    }
                    _ => unit.to_uppercase(),
                }
            }
            UnitCase::ByteBit => {
                let mut chars = unit.chars();
                let Some(prefix) = chars.next() else {
                    return String::new();
                };
                let mut out = String::with_capacity(unit.len());
                out.push(si_prefix(prefix));
                // b (bit) and B (byte) keep the case they were written in
                if let Some(b) = chars.next() {
                    out.push(b);
                }
                out.push_str(&chars.as_str().to_lowercase());
                out
            }
        }
    }
}

/// The prefix letter when `unit` is longer than its `tail`.
fn split_prefix(unit: &str, tail: &str) -> Option<char> {
    if unit.chars().count() > tail.chars().count() {
        unit.chars().next()
    } else {
        None
    }
}

fn si_prefix(prefix: char) -> char {
    if prefix.eq_ignore_ascii_case(&'k') {
        'k'
    } else {
        prefix.to_ascii_uppercase()
    }
}

/// Render a separator-less date such as `2025jan12` or `jan12`.
///
/// At least one side of the month must carry digits.
pub fn render_month_date(token: &str, canonical: impl Fn(&str) -> Option<String>) -> Option<String> {
    let caps = MONTH_DATE.captures(token)?;
    let before = caps.get(1).map_or("", |m| m.as_str());
    let month = caps.get(2)?.as_str();
    let after = caps.get(3).map_or("", |m| m.as_str());
    if before.is_empty() && after.is_empty() {
        return None;
    }
    let month = canonical(&month.to_lowercase())?;
    Some(format!("{before}{month}{after}"))
}
