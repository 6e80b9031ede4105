//! Regex engine selection and compilation
//!
//! Automatically chooses between `regex` (fast, linear time) and
//! `fancy-regex` (full features, backtracking) based on pattern analysis,
//! and applies the flag set a test request carries.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ToolError;

static BACKREFERENCE_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"\\[1-9]").expect("BUG: backreference detection pattern is invalid")
});

/// fancy-regex's own default, kept explicit so configs can override it
pub const DEFAULT_BACKTRACK_LIMIT: usize = 1_000_000;

/// Engine types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineType {
    /// Standard regex crate (linear time guaranteed)
    #[serde(rename = "regex")]
    Regex,
    /// Fancy-regex (supports lookahead, lookbehind, backreferences)
    #[serde(rename = "fancy-regex")]
    FancyRegex,
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineType::Regex => write!(f, "regex"),
            EngineType::FancyRegex => write!(f, "fancy-regex"),
        }
    }
}

/// Errors that can occur during engine operations
#[allow(clippy::result_large_err)]
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    RegexError(#[from] regex::Error),

    #[error("{0}")]
    FancyRegexError(#[from] fancy_regex::Error),

    /// The backtracking engine gave up while matching
    #[error("{0}")]
    Runtime(String),
}

/// Independent regex flags, rendered in the fixed order `gimsuy`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegexFlags {
    pub global: bool,
    pub ignore_case: bool,
    pub multiline: bool,
    pub dot_all: bool,
    pub unicode: bool,
    pub sticky: bool,
}

impl RegexFlags {
    /// Only the global flag set
    pub fn global() -> Self {
        Self {
            global: true,
            ..Self::default()
        }
    }

    /// Canonical flag string, e.g. `gim`
    pub fn as_flag_string(&self) -> String {
        [
            (self.global, 'g'),
            (self.ignore_case, 'i'),
            (self.multiline, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
            (self.sticky, 'y'),
        ]
        .into_iter()
        .filter_map(|(on, c)| on.then_some(c))
        .collect()
    }
}

impl fmt::Display for RegexFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_flag_string())
    }
}

impl FromStr for RegexFlags {
    type Err = ToolError;

    /// Parse a flag string in any order; repeated flags are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = RegexFlags::default();
        for c in s.chars() {
            match c {
                'g' => flags.global = true,
                'i' => flags.ignore_case = true,
                'm' => flags.multiline = true,
                's' => flags.dot_all = true,
                'u' => flags.unicode = true,
                'y' => flags.sticky = true,
                other => return Err(ToolError::InvalidFlag(other)),
            }
        }
        Ok(flags)
    }
}

/// Features detected in a pattern that require fancy-regex
#[derive(Debug, Default)]
pub struct FancyFeatures {
    pub lookahead: bool,
    pub lookbehind: bool,
    pub backreference: bool,
    pub atomic_group: bool,
}

impl FancyFeatures {
    /// Returns true if any fancy feature is detected
    pub fn needs_fancy(&self) -> bool {
        self.lookahead || self.lookbehind || self.backreference || self.atomic_group
    }

    /// Get a description of why fancy-regex is needed
    pub fn reason(&self) -> Option<String> {
        let reasons: Vec<&str> = [
            (self.lookahead, "lookahead assertion"),
            (self.lookbehind, "lookbehind assertion"),
            (self.backreference, "backreference"),
            (self.atomic_group, "atomic group"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect();

        if reasons.is_empty() {
            None
        } else {
            Some(format!("Pattern uses {}", reasons.join(", ")))
        }
    }
}

/// Detect which engine features are used in a pattern
pub fn detect_fancy_features(pattern: &str) -> FancyFeatures {
    // regex_syntax cannot parse these fancy-regex extensions, so detection
    // relies on string scanning.
    FancyFeatures {
        lookahead: pattern.contains("(?=") || pattern.contains("(?!"),
        lookbehind: pattern.contains("(?<=") || pattern.contains("(?<!"),
        atomic_group: pattern.contains("(?>"),
        backreference: BACKREFERENCE_RE.is_match(pattern),
    }
}

/// Select the appropriate engine for a pattern
pub fn select_engine(pattern: &str) -> (EngineType, FancyFeatures) {
    let features = detect_fancy_features(pattern);
    let engine = if features.needs_fancy() {
        EngineType::FancyRegex
    } else {
        EngineType::Regex
    };
    (engine, features)
}

/// A compiled regex that can use either engine
pub enum CompiledRegex {
    Regex(regex::Regex),
    FancyRegex(fancy_regex::Regex),
}

#[allow(clippy::result_large_err)]
impl CompiledRegex {
    /// Compile a pattern with automatic engine selection.
    ///
    /// `i`, `m` and `s` are applied through the engine builders so error
    /// messages and positions refer to `pattern` exactly as written.
    pub fn new(
        pattern: &str,
        flags: RegexFlags,
        backtrack_limit: usize,
    ) -> Result<Self, EngineError> {
        let (engine, _features) = select_engine(pattern);

        match engine {
            EngineType::Regex => match regex::RegexBuilder::new(pattern)
                .case_insensitive(flags.ignore_case)
                .multi_line(flags.multiline)
                .dot_matches_new_line(flags.dot_all)
                .build()
            {
                Ok(re) => Ok(CompiledRegex::Regex(re)),
                // Fall back to fancy-regex, but report the regex crate's
                // error when neither engine accepts the pattern
                Err(regex_err) => Self::fancy(pattern, flags, backtrack_limit)
                    .map_err(|_| EngineError::RegexError(regex_err)),
            },
            EngineType::FancyRegex => Self::fancy(pattern, flags, backtrack_limit),
        }
    }

    fn fancy(
        pattern: &str,
        flags: RegexFlags,
        backtrack_limit: usize,
    ) -> Result<Self, EngineError> {
        let re = fancy_regex::RegexBuilder::new(pattern)
            .case_insensitive(flags.ignore_case)
            .multi_line(flags.multiline)
            .dot_matches_new_line(flags.dot_all)
            .backtrack_limit(backtrack_limit)
            .build()?;
        Ok(CompiledRegex::FancyRegex(re))
    }

    /// Span of every group (group 0 first) of the leftmost match at or
    /// after byte offset `pos`
    pub fn spans_at(&self, text: &str, pos: usize) -> Result<Option<Spans>, EngineError> {
        match self {
            CompiledRegex::Regex(re) => Ok(re.captures_at(text, pos).map(|caps| {
                Spans(
                    caps.iter()
                        .map(|m| m.map(|m| (m.start(), m.end())))
                        .collect(),
                )
            })),
            CompiledRegex::FancyRegex(re) => {
                let caps = re
                    .captures_from_pos(text, pos)
                    .map_err(|e| EngineError::Runtime(e.to_string()))?;
                Ok(caps.map(|caps| {
                    Spans(
                        (0..caps.len())
                            .map(|i| caps.get(i).map(|m| (m.start(), m.end())))
                            .collect(),
                    )
                }))
            }
        }
    }

    /// Group names indexed by group number (`None` for unnamed groups)
    pub fn capture_names(&self) -> Vec<Option<String>> {
        match self {
            CompiledRegex::Regex(re) => re
                .capture_names()
                .map(|n| n.map(str::to_string))
                .collect(),
            CompiledRegex::FancyRegex(re) => re
                .capture_names()
                .map(|n| n.map(str::to_string))
                .collect(),
        }
    }

    /// Get the engine type
    pub fn engine_type(&self) -> EngineType {
        match self {
            CompiledRegex::Regex(_) => EngineType::Regex,
            CompiledRegex::FancyRegex(_) => EngineType::FancyRegex,
        }
    }
}

/// Byte spans of one match: index 0 is the whole match, the rest are groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spans(Vec<Option<(usize, usize)>>);

impl Spans {
    pub fn start(&self) -> usize {
        self.whole().0
    }

    pub fn end(&self) -> usize {
        self.whole().1
    }

    fn whole(&self) -> (usize, usize) {
        self.0.first().copied().flatten().unwrap_or_default()
    }

    /// Span of group `i`, if it exists and participated
    pub fn group(&self, i: usize) -> Option<(usize, usize)> {
        self.0.get(i).copied().flatten()
    }

    /// Number of groups including group 0
    pub fn group_count(&self) -> usize {
        self.0.len()
    }

    pub fn is_zero_width(&self) -> bool {
        self.start() == self.end()
    }
}

/// A user pattern compiled together with its flags
pub struct CompiledPattern {
    source: String,
    flags: RegexFlags,
    regex: CompiledRegex,
    names: Vec<Option<String>>,
}

#[allow(clippy::result_large_err)]
impl CompiledPattern {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> RegexFlags {
        self.flags
    }

    pub fn engine(&self) -> EngineType {
        self.regex.engine_type()
    }

    /// Group names indexed by group number
    pub fn group_names(&self) -> &[Option<String>] {
        &self.names
    }

    /// Next match at or after `pos`. With `sticky`, only a match starting
    /// exactly at `pos` counts.
    pub fn find_at(
        &self,
        text: &str,
        pos: usize,
        sticky: bool,
    ) -> Result<Option<Spans>, EngineError> {
        if pos > text.len() {
            return Ok(None);
        }
        let found = self.regex.spans_at(text, pos)?;
        Ok(found.filter(|spans| !sticky || spans.start() == pos))
    }
}

/// Compile `pattern` with `flags` using the default backtrack limit
#[allow(clippy::result_large_err)]
pub fn compile(pattern: &str, flags: RegexFlags) -> Result<CompiledPattern, EngineError> {
    compile_with_limit(pattern, flags, DEFAULT_BACKTRACK_LIMIT)
}

/// Compile `pattern` with `flags`, bounding fancy-regex backtracking
#[allow(clippy::result_large_err)]
pub fn compile_with_limit(
    pattern: &str,
    flags: RegexFlags,
    backtrack_limit: usize,
) -> Result<CompiledPattern, EngineError> {
    let regex = CompiledRegex::new(pattern, flags, backtrack_limit)?;
    log::debug!(
        "compiled /{}/{} with {}",
        pattern,
        flags,
        regex.engine_type()
    );

    Ok(CompiledPattern {
        source: pattern.to_string(),
        flags,
        names: regex.capture_names(),
        regex,
    })
}
