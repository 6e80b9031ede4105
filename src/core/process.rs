//! Tool entry points
//!
//! `process_text_case` and `process_regex_test` are the two calls UI layers
//! make. Neither returns an error or panics: every failure is folded into
//! an outcome with `success: false` and a human-readable message.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::case::{convert_case, CaseTarget};
use super::engine::{RegexFlags, DEFAULT_BACKTRACK_LIMIT};
use super::execute::{run_request, PatternTestRequest, TestMode};
use super::store::{HistoryEntry, HistoryStore};
use crate::error::ToolError;
use crate::output::{
    format_results, CaseMetadata, CaseOutcome, FormatOptions, RegexMetadata, RegexOutcome,
    ReportFormat,
};

/// Tool identifier recorded in history for case conversions
pub const CASE_TOOL_ID: &str = "text-case-converter";

/// Tool identifier recorded in history for regex tests
pub const REGEX_TOOL_ID: &str = "regex-tester";

/// Settings for a case conversion
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaseConversionConfig {
    pub target_case: CaseTarget,
    /// Leave all-caps words (`XML`) untouched where the target allows it
    pub preserve_acronyms: bool,
    /// Overrides the separator of delimiter-joined targets when non-empty
    pub custom_delimiter: String,
}

/// Settings for a regex test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegexTestConfig {
    pub flags: RegexFlags,
    pub mode: TestMode,
    /// Replacement template for replace mode
    pub replacement: String,
    /// Test each non-blank input line separately
    pub test_multiple_inputs: bool,
    pub output_format: ReportFormat,
    pub show_groups: bool,
    pub show_explanation: bool,
    pub highlight_matches: bool,
    /// Upper bound on fancy-regex backtracking steps
    pub backtrack_limit: usize,
}

impl Default for RegexTestConfig {
    fn default() -> Self {
        Self {
            flags: RegexFlags::global(),
            mode: TestMode::Match,
            replacement: String::new(),
            test_multiple_inputs: false,
            output_format: ReportFormat::Detailed,
            show_groups: true,
            show_explanation: false,
            highlight_matches: true,
            backtrack_limit: DEFAULT_BACKTRACK_LIMIT,
        }
    }
}

impl RegexTestConfig {
    /// Report options carried by this config
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            format: self.output_format,
            show_groups: self.show_groups,
            show_explanation: self.show_explanation,
            highlight_matches: self.highlight_matches,
        }
    }
}

impl CaseOutcome {
    fn ok(output: String, metadata: CaseMetadata) -> Self {
        Self {
            success: true,
            output: Some(output),
            error: None,
            code: None,
            metadata: Some(metadata),
        }
    }

    fn failure(err: ToolError) -> Self {
        Self {
            success: false,
            output: None,
            error: Some(err.to_string()),
            code: Some(err.code().to_string()),
            metadata: None,
        }
    }
}

impl RegexOutcome {
    fn failure(err: ToolError) -> Self {
        Self {
            success: false,
            output: None,
            error: Some(err.to_string()),
            code: Some(err.code().to_string()),
            results: None,
            metadata: None,
        }
    }
}

/// Convert `input` according to `config`
pub fn process_text_case(input: &str, config: &CaseConversionConfig) -> CaseOutcome {
    let conversion = match convert_case(
        input,
        config.target_case,
        config.preserve_acronyms,
        &config.custom_delimiter,
    ) {
        Ok(conversion) => conversion,
        Err(e) => return CaseOutcome::failure(e),
    };

    let metadata = CaseMetadata {
        original_length: input.chars().count(),
        converted_length: conversion.output.chars().count(),
        target_case: config.target_case,
        word_count: conversion.word_count,
        acronyms_preserved: conversion.acronyms_preserved,
    };

    CaseOutcome::ok(conversion.output, metadata)
}

/// Run `pattern` against `input` according to `config` and format a report.
///
/// A pattern that fails to compile produces `success: false`, but the
/// per-input results and the report are still returned for display.
pub fn process_regex_test(input: &str, config: &RegexTestConfig, pattern: &str) -> RegexOutcome {
    let start = Instant::now();

    if pattern.trim().is_empty() {
        return RegexOutcome::failure(ToolError::EmptyInput("Pattern"));
    }
    if input.trim().is_empty() {
        return RegexOutcome::failure(ToolError::EmptyInput("Test input"));
    }

    let mut request = PatternTestRequest::new(pattern, config.flags, config.mode)
        .with_replacement(config.replacement.as_str());
    request.backtrack_limit = config.backtrack_limit;
    let request = if config.test_multiple_inputs {
        request.with_lines(input)
    } else {
        request.with_input(input)
    };

    let results = run_request(&request);
    let output = format_results(&results, &config.format_options());

    let metadata = RegexMetadata {
        pattern: pattern.to_string(),
        flags: config.flags.as_flag_string(),
        mode: config.mode,
        test_count: results.len(),
        valid_count: results.iter().filter(|r| r.is_valid).count(),
        total_matches: results.iter().map(|r| r.match_count).sum(),
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
    };
    log::debug!(
        "regex test /{}/{} ({}): {} inputs, {} matches",
        pattern,
        metadata.flags,
        config.mode,
        metadata.test_count,
        metadata.total_matches
    );

    // A compile failure marks every result invalid without an engine
    let compile_error = results
        .iter()
        .find(|r| r.engine.is_none())
        .and_then(|r| r.validation_error.clone())
        .map(ToolError::PatternCompile);

    RegexOutcome {
        success: compile_error.is_none(),
        output: Some(output),
        error: compile_error.as_ref().map(ToString::to_string),
        code: compile_error.as_ref().map(|e| e.code().to_string()),
        results: Some(results),
        metadata: Some(metadata),
    }
}

/// `process_text_case`, recording successful conversions in `history`
pub fn process_text_case_recorded(
    input: &str,
    config: &CaseConversionConfig,
    history: &mut dyn HistoryStore,
) -> CaseOutcome {
    let outcome = process_text_case(input, config);
    if let Some(output) = outcome.output.as_deref().filter(|_| outcome.success) {
        history.record(HistoryEntry::new(CASE_TOOL_ID, input, output));
    }
    outcome
}

/// `process_regex_test`, recording successful tests in `history`
pub fn process_regex_test_recorded(
    input: &str,
    config: &RegexTestConfig,
    pattern: &str,
    history: &mut dyn HistoryStore,
) -> RegexOutcome {
    let outcome = process_regex_test(input, config, pattern);
    if let Some(output) = outcome.output.as_deref().filter(|_| outcome.success) {
        history.record(HistoryEntry::new(REGEX_TOOL_ID, input, output));
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::MemoryStore;
    use crate::error::error_codes;
    use crate::output::ModeOutput;

    #[test]
    fn test_process_text_case_snake() {
        let config = CaseConversionConfig {
            target_case: CaseTarget::Snakecase,
            preserve_acronyms: false,
            custom_delimiter: String::new(),
        };
        let outcome = process_text_case("created at timestamp", &config);
        assert!(outcome.success);
        assert_eq!(outcome.output.as_deref(), Some("created_at_timestamp"));

        let metadata = outcome.metadata.unwrap();
        assert_eq!(metadata.original_length, 20);
        assert_eq!(metadata.converted_length, 20);
        assert_eq!(metadata.target_case, CaseTarget::Snakecase);
        assert_eq!(metadata.word_count, 3);
        assert!(!metadata.acronyms_preserved);
    }

    #[test]
    fn test_process_text_case_blank_input() {
        let outcome = process_text_case("   ", &CaseConversionConfig::default());
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("Input text is empty"));
        assert_eq!(outcome.code.as_deref(), Some("EMPTY_INPUT"));
        assert!(outcome.output.is_none());
    }

    #[test]
    fn test_process_regex_test_match() {
        let outcome = process_regex_test("a1 b22 c333", &RegexTestConfig::default(), r"\d+");
        assert!(outcome.success);
        let results = outcome.results.unwrap();
        assert_eq!(results[0].match_count, 3);
        assert_eq!(outcome.metadata.unwrap().total_matches, 3);
        assert!(outcome.output.unwrap().contains("Found 3 matches"));
    }

    #[test]
    fn test_process_regex_test_invalid_pattern() {
        let outcome = process_regex_test("abc", &RegexTestConfig::default(), "(");
        assert!(!outcome.success);
        assert!(outcome
            .error
            .as_deref()
            .unwrap()
            .starts_with("Invalid regular expression"));
        assert_eq!(outcome.code.as_deref(), Some("INVALID_PATTERN"));
        let results = outcome.results.unwrap();
        assert!(!results[0].is_valid);
        assert!(results[0].matches.is_empty());
    }

    #[test]
    fn test_process_regex_test_empty_pattern_and_input() {
        let config = RegexTestConfig::default();
        let outcome = process_regex_test("abc", &config, "");
        assert_eq!(outcome.error.as_deref(), Some("Pattern is empty"));
        let outcome = process_regex_test("abc", &config, " \t ");
        assert!(!outcome.success);
        assert_eq!(outcome.code.as_deref(), Some(error_codes::EMPTY_INPUT));
        assert!(outcome.output.is_none());
        let outcome = process_regex_test("  ", &config, "a");
        assert_eq!(outcome.error.as_deref(), Some("Test input is empty"));
    }

    #[test]
    fn test_process_regex_test_multiple_inputs() {
        let config = RegexTestConfig {
            mode: TestMode::Replace,
            replacement: "<$&>".to_string(),
            test_multiple_inputs: true,
            ..RegexTestConfig::default()
        };
        let outcome = process_regex_test("a1\n\nb2", &config, r"\d");
        let results = outcome.results.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[1].mode_output,
            Some(ModeOutput::Replaced("b<2>".to_string()))
        );
    }

    #[test]
    fn test_recorded_variants_only_record_success() {
        let mut history = MemoryStore::new();
        let config = CaseConversionConfig {
            target_case: CaseTarget::Kebabcase,
            ..CaseConversionConfig::default()
        };
        process_text_case_recorded("fooBar", &config, &mut history);
        process_text_case_recorded("", &config, &mut history);
        process_regex_test_recorded("x", &RegexTestConfig::default(), "(", &mut history);

        assert_eq!(history.history_len(), 1);
        let entry = history.history().next().unwrap();
        assert_eq!(entry.tool, CASE_TOOL_ID);
        assert_eq!(entry.output, "foo-bar");
    }
}
