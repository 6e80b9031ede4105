//! Plain-language pattern explanation
//!
//! Scans the pattern for well-known metacharacters and reports a canned
//! description for each one present. This is a quick-reference aid, not a
//! parser: tokens are looked up in a fixed order and reported once.

use crate::output::{ExplainPart, ExplainResult};

/// Recognized tokens in scan order
const TOKENS: &[(&str, &str)] = &[
    ("^", "Start of string (or line with the multiline flag)"),
    ("$", "End of string (or line with the multiline flag)"),
    (r"\d", "Any digit (0-9)"),
    (r"\w", "Any word character (letter, digit or underscore)"),
    (r"\s", "Any whitespace character"),
    (".", "Any character except newline (including newline with the dotAll flag)"),
    ("*", "Zero or more of the preceding element"),
    ("+", "One or more of the preceding element"),
    ("?", "Zero or one of the preceding element, or makes a quantifier lazy"),
    ("[", "Character class: any one of the enclosed characters"),
    ("(", "Capturing group"),
    ("(?:", "Non-capturing group"),
    ("(?=", "Positive lookahead: followed by the group, without consuming it"),
    ("(?!", "Negative lookahead: not followed by the group"),
    ("|", "Alternation: matches either side"),
    ("{", "Quantifier: a specific number or range of repetitions"),
];

/// Explain the tokens present in `pattern`
pub fn explain_pattern(pattern: &str) -> ExplainResult {
    let parts = TOKENS
        .iter()
        .filter(|(token, _)| pattern.contains(token))
        .map(|(token, desc)| ExplainPart {
            token: token.to_string(),
            desc: desc.to_string(),
        })
        .collect();

    ExplainResult {
        pattern: pattern.to_string(),
        parts,
    }
}
