//! Text helpers used when rendering currency.

use std::fmt::Display;

/// Appends an `s` to `word` unless `count` is exactly one.
#[must_use]
pub fn pluralize(word: &str, count: i64) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Joins a value and a word with a single space.
#[must_use]
pub fn join_with_space(value: impl Display, word: &str) -> String {
    format!("{value} {word}")
}
