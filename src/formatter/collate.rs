//! Locale-aware string ordering for sorted reports
//!
//! Approximates the default collation of a Unicode-aware `localeCompare`.
//! Strings are decomposed (NFD) first. The primary level compares base
//! letters case-insensitively with accents dropped, ordering whitespace
//! before punctuation and symbols before digits before letters. Accents
//! break primary ties, then lowercase sorts before uppercase.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compare two rendered values for report sorting
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    primary_weights(a)
        .cmp(primary_weights(b))
        .then_with(|| accent_weights(a).cmp(accent_weights(b)))
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

fn primary_weights(s: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    s.nfd().filter(|c| !is_combining_mark(*c)).flat_map(|c| {
        let class = char_class(c);
        c.to_lowercase().map(move |lower| (class, lower))
    })
}

/// Base characters collapse to `'\0'` so only the marks distinguish strings
fn accent_weights(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .map(|c| if is_combining_mark(c) { c } else { '\0' })
}

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else if c.is_control() {
        4
    } else {
        1
    }
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (x, y) in a.nfd().zip(b.nfd()) {
        if x == y {
            continue;
        }
        return match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        };
    }
    Ordering::Equal
}
