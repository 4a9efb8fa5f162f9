//! Canonical forms for catalog metadata.
//!
//! All transforms are total: every input, including the empty string, maps to a
//! value, and applying a transform to its own output returns that output unchanged.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Matches `"<Last>, <First...>"` artist names as written in catalogs.
#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static LAST_FIRST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([^,]+?)\s*,\s*(.+?)\s*$").unwrap());

/// Title-cases a title: `"the NIGHT watch"` becomes `"The Night Watch"`.
#[must_use]
pub fn normalize_title(raw: &str) -> String {
    start_case(raw)
}

/// Puts the first name first and title-cases the result.
///
/// `"BRUCE, Lenny"` and `"Lenny BRUCE"` both become `"Lenny Bruce"`.
#[must_use]
pub fn normalize_artist(raw: &str) -> String {
    match LAST_FIRST_REGEX.captures(raw) {
        Some(caps) => {
            let last = caps.get(1).map_or("", |m| m.as_str());
            let first = caps.get(2).map_or("", |m| m.as_str());
            start_case(&format!("{first} {last}"))
        },
        None => start_case(raw),
    }
}

/// Dates stay verbatim. Catalog dates are free-form ("c. 1598", "1598-99", "1590s",
/// "begun c. 1598") and no canonical form is imposed on them.
#[must_use]
pub fn normalize_date(raw: &str) -> String {
    raw.to_owned()
}

/// Techniques stay verbatim ("Oil on canvas, 80 x 65 cm").
#[must_use]
pub fn normalize_technique(raw: &str) -> String {
    raw.to_owned()
}

/// Strips diacritics: `"Dürer"` becomes `"Durer"`.
///
/// Decomposes to NFD and drops the combining marks. Letters without a decomposition
/// (`ß`, `Ø`) are kept.
#[must_use]
pub fn fold_accents(raw: &str) -> String {
    raw.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}')
}

/// Folds accents, lower-cases, splits into alphanumeric words, and capitalizes each word.
///
/// Apostrophes are dropped rather than treated as separators so that possessives stay
/// one word. Any other non-alphanumeric run becomes a single space.
fn start_case(raw: &str) -> String {
    let without_apostrophes: String = fold_accents(raw).chars().filter(|c| !is_apostrophe(*c)).collect();
    without_apostrophes
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
