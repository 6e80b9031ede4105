//! Output types for the case and regex tools
//!
//! All output structures are designed to be JSON-first so UI layers can
//! consume them directly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::case::CaseTarget;
use crate::core::engine::EngineType;
use crate::core::execute::TestMode;

/// A single match found while executing a pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Full matched text
    pub text: String,
    /// Start byte position (0-indexed)
    pub start: usize,
    /// End byte position (exclusive)
    pub end: usize,
    /// Capture groups in order; `None` when a group did not participate
    pub groups: Vec<Option<String>>,
    /// Named groups that participated in the match
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub named_groups: BTreeMap<String, String>,
}

impl MatchRecord {
    /// Length of the match in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Mode-specific result value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModeOutput {
    /// Test mode: whether the pattern matched
    Matched(bool),
    /// Replace mode: the substituted string
    Replaced(String),
    /// Split mode: the fragments between separator matches
    Fragments(Vec<String>),
}

/// Result of running one pattern against one input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternTestResult {
    /// The pattern that was tested
    pub pattern: String,
    /// Canonical flag string (`gimsuy` order)
    pub flags: String,
    /// Execution mode
    pub mode: TestMode,
    /// Which engine ran the pattern (absent when it failed to compile)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineType>,
    /// The input the pattern ran against
    pub input: String,
    /// False when the pattern failed to compile or execution failed
    pub is_valid: bool,
    /// Engine message for an invalid result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_error: Option<String>,
    /// Number of matches found
    pub match_count: usize,
    /// Matches in ascending start order
    pub matches: Vec<MatchRecord>,
    /// Test, replace and split results; match mode has none
    pub mode_output: Option<ModeOutput>,
    /// Elapsed time in milliseconds
    pub elapsed_ms: f64,
}

impl PatternTestResult {
    /// Whether the test found at least one match
    pub fn matched(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Facts reported alongside a case conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseMetadata {
    /// Input length in characters
    pub original_length: usize,
    /// Output length in characters
    pub converted_length: usize,
    /// The target that was applied
    pub target_case: CaseTarget,
    /// Words found by the splitter
    pub word_count: usize,
    /// Whether acronym preservation left any word untouched
    pub acronyms_preserved: bool,
}

/// Summary of a regex test invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegexMetadata {
    pub pattern: String,
    pub flags: String,
    pub mode: TestMode,
    /// Number of inputs tested
    pub test_count: usize,
    /// Inputs whose result is valid
    pub valid_count: usize,
    /// Matches across all inputs
    pub total_matches: usize,
    /// Wall-clock time for the whole invocation
    pub elapsed_ms: f64,
}

/// Outcome of the case conversion entry point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable error code (see `error::error_codes`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CaseMetadata>,
}

/// Outcome of the regex test entry point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegexOutcome {
    pub success: bool,
    /// Formatted report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// One result per tested input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<PatternTestResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RegexMetadata>,
}

/// Error information for validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error kind/type
    pub kind: String,
    /// Position in pattern where error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    /// Human-readable error message
    pub message: String,
}

/// Result of pattern validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResult {
    /// Whether the pattern is valid
    pub valid: bool,
    /// Error details (if invalid)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ValidationError>,
    /// Which engine is required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_required: Option<EngineType>,
    /// Reason for engine requirement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Suggested fix (if invalid)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// One recognized token in a pattern explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainPart {
    /// The token text
    pub token: String,
    /// Human-readable description
    pub desc: String,
}

/// Result of explaining a pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainResult {
    /// The pattern that was explained
    pub pattern: String,
    /// Recognized tokens in scan order
    pub parts: Vec<ExplainPart>,
}

/// Generic error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always true for errors
    pub error: bool,
    /// Error code
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: true,
            code: code.into(),
            message: message.into(),
        }
    }
}
