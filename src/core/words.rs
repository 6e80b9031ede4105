//! Word splitting for case conversion
//!
//! Breaks arbitrary text into case-agnostic words. A word boundary is any run
//! of delimiters (whitespace, `-`, `_`, `.`, `/`) or a lowercase/digit
//! character directly followed by an uppercase one. Uppercase runs such as
//! `XML` are never split internally.

/// Characters that always separate words
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '_' | '.' | '/')
}

/// Whether `prev` followed by `next` is a camelCase boundary
fn is_camel_boundary(prev: char, next: char) -> bool {
    (prev.is_lowercase() || prev.is_ascii_digit()) && next.is_uppercase()
}

/// Split input into words.
///
/// Returned slices borrow from `input`. Concatenating them yields the input
/// with every delimiter removed.
pub fn split_words(input: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    let mut prev: Option<char> = None;

    for (i, c) in input.char_indices() {
        if is_delimiter(c) {
            if let Some(s) = start.take() {
                words.push(&input[s..i]);
            }
            prev = None;
            continue;
        }

        match (start, prev) {
            (Some(s), Some(p)) if is_camel_boundary(p, c) => {
                words.push(&input[s..i]);
                start = Some(i);
            }
            (None, _) => start = Some(i),
            _ => {}
        }
        prev = Some(c);
    }

    if let Some(s) = start {
        words.push(&input[s..]);
    }

    words
}

/// An acronym is more than one character, entirely uppercase, with at least
/// one letter (`XML`, `HTTP2`; not `X` or `42`).
pub fn is_acronym(word: &str) -> bool {
    word.chars().nth(1).is_some()
        && word.chars().any(char::is_alphabetic)
        && word == word.to_uppercase()
}
