//! Case conversion engine
//!
//! Converts text into one of thirteen naming conventions. Character-level
//! targets (upper, lower, alternating, inverse) map characters directly;
//! word-level targets run the word splitter first and then apply a per-word
//! casing policy and a join separator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::words::{is_acronym, split_words};
use crate::error::ToolError;

/// Output naming conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum CaseTarget {
    Uppercase,
    #[default]
    Lowercase,
    Titlecase,
    Sentencecase,
    Camelcase,
    Pascalcase,
    Kebabcase,
    Snakecase,
    Constantcase,
    Dotcase,
    Pathcase,
    Alternatingcase,
    Inversecase,
}

impl CaseTarget {
    /// Every supported target, in declaration order
    pub const ALL: [CaseTarget; 13] = [
        CaseTarget::Uppercase,
        CaseTarget::Lowercase,
        CaseTarget::Titlecase,
        CaseTarget::Sentencecase,
        CaseTarget::Camelcase,
        CaseTarget::Pascalcase,
        CaseTarget::Kebabcase,
        CaseTarget::Snakecase,
        CaseTarget::Constantcase,
        CaseTarget::Dotcase,
        CaseTarget::Pathcase,
        CaseTarget::Alternatingcase,
        CaseTarget::Inversecase,
    ];

    /// Canonical lowercase name (`snakecase`, `camelcase`, ...)
    pub fn name(self) -> &'static str {
        match self {
            CaseTarget::Uppercase => "uppercase",
            CaseTarget::Lowercase => "lowercase",
            CaseTarget::Titlecase => "titlecase",
            CaseTarget::Sentencecase => "sentencecase",
            CaseTarget::Camelcase => "camelcase",
            CaseTarget::Pascalcase => "pascalcase",
            CaseTarget::Kebabcase => "kebabcase",
            CaseTarget::Snakecase => "snakecase",
            CaseTarget::Constantcase => "constantcase",
            CaseTarget::Dotcase => "dotcase",
            CaseTarget::Pathcase => "pathcase",
            CaseTarget::Alternatingcase => "alternatingcase",
            CaseTarget::Inversecase => "inversecase",
        }
    }

    /// Join separator for delimiter-joined targets
    fn separator(self) -> Option<&'static str> {
        match self {
            CaseTarget::Kebabcase => Some("-"),
            CaseTarget::Snakecase | CaseTarget::Constantcase => Some("_"),
            CaseTarget::Dotcase => Some("."),
            CaseTarget::Pathcase => Some("/"),
            _ => None,
        }
    }
}

impl fmt::Display for CaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CaseTarget {
    type Err = ToolError;

    /// Accepts the canonical name, any separator/case spelling of it
    /// (`snake_case`, `Snake-Case`), or the short form (`snake`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        CaseTarget::ALL
            .into_iter()
            .find(|target| {
                let name = target.name();
                normalized == name || Some(normalized.as_str()) == name.strip_suffix("case")
            })
            .ok_or_else(|| ToolError::UnsupportedCase(s.to_string()))
    }
}

impl TryFrom<String> for CaseTarget {
    type Error = ToolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The converted text plus facts gathered during conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseConversion {
    pub output: String,
    /// Number of words the splitter found in the input
    pub word_count: usize,
    /// True when at least one acronym was left untouched
    pub acronyms_preserved: bool,
}

/// Convert `input` to `target`.
///
/// Blank input is rejected with [`ToolError::EmptyInput`].
pub fn convert(
    input: &str,
    target: CaseTarget,
    preserve_acronyms: bool,
) -> Result<String, ToolError> {
    convert_case(input, target, preserve_acronyms, "").map(|c| c.output)
}

/// Convert with full control, returning conversion facts.
///
/// A non-empty `custom_delimiter` replaces the join separator of the
/// delimiter-joined targets (kebab, snake, constant, dot, path).
pub fn convert_case(
    input: &str,
    target: CaseTarget,
    preserve_acronyms: bool,
    custom_delimiter: &str,
) -> Result<CaseConversion, ToolError> {
    if input.trim().is_empty() {
        return Err(ToolError::EmptyInput("Input text"));
    }

    let words = split_words(input);
    let word_count = words.len();
    let mut acronyms_preserved = false;

    let output = match target {
        CaseTarget::Uppercase => input.to_uppercase(),
        CaseTarget::Lowercase => input.to_lowercase(),
        CaseTarget::Titlecase => {
            let (text, fired) = title_case(input, preserve_acronyms);
            acronyms_preserved = fired;
            text
        }
        CaseTarget::Sentencecase => sentence_case(input.trim()),
        CaseTarget::Camelcase | CaseTarget::Pascalcase => {
            let mut out = String::with_capacity(input.len());
            for (i, word) in words.iter().enumerate() {
                if preserve_acronyms && is_acronym(word) {
                    acronyms_preserved = true;
                    out.push_str(word);
                } else if i == 0 && target == CaseTarget::Camelcase {
                    out.push_str(&word.to_lowercase());
                } else {
                    out.push_str(&capitalize(word));
                }
            }
            out
        }
        CaseTarget::Kebabcase
        | CaseTarget::Snakecase
        | CaseTarget::Constantcase
        | CaseTarget::Dotcase
        | CaseTarget::Pathcase => {
            let separator = if custom_delimiter.is_empty() {
                target.separator().unwrap_or_default()
            } else {
                custom_delimiter
            };
            let cased: Vec<String> = if target == CaseTarget::Constantcase {
                words.iter().map(|w| w.to_uppercase()).collect()
            } else {
                words.iter().map(|w| w.to_lowercase()).collect()
            };
            cased.join(separator)
        }
        CaseTarget::Alternatingcase => alternating_case(input),
        CaseTarget::Inversecase => inverse_case(input),
    };

    log::debug!(
        "converted {} chars to {} ({} words, acronyms preserved: {})",
        input.chars().count(),
        target,
        word_count,
        acronyms_preserved
    );

    Ok(CaseConversion {
        output,
        word_count,
        acronyms_preserved,
    })
}

/// Uppercase the first character, lowercase the rest
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Capitalize every whitespace-delimited token, keeping the original spacing
fn title_case(input: &str, preserve_acronyms: bool) -> (String, bool) {
    let mut out = String::with_capacity(input.len());
    let mut fired = false;
    let mut rest = input;

    while !rest.is_empty() {
        let gap = rest.find(|c: char| !c.is_whitespace()).unwrap_or(rest.len());
        out.push_str(&rest[..gap]);
        rest = &rest[gap..];

        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let token = &rest[..len];
        if preserve_acronyms && is_acronym(token) {
            fired = true;
            out.push_str(token);
        } else {
            out.push_str(&capitalize(token));
        }
        rest = &rest[len..];
    }

    (out, fired)
}

fn sentence_case(trimmed: &str) -> String {
    capitalize(trimmed)
}

fn alternating_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, c) in input.chars().enumerate() {
        if i % 2 == 0 {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
    }
    out
}

fn inverse_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_uppercase() {
            out.extend(c.to_lowercase());
        } else if c.is_lowercase() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}
