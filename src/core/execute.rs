//! Pattern execution in test, match, replace and split modes
//!
//! A request moves through validation (compile once) and then execution
//! per input line. A compile failure marks every line invalid; a runtime
//! failure only affects the line it happened on.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::engine::{
    compile_with_limit, CompiledPattern, EngineError, RegexFlags, Spans, DEFAULT_BACKTRACK_LIMIT,
};
use super::replace::replace_matches;
use crate::error::ToolError;
use crate::output::{MatchRecord, ModeOutput, PatternTestResult};

/// How a pattern is applied to its input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TestMode {
    /// Does the pattern match at all
    Test,
    /// List the matches
    #[default]
    Match,
    /// Substitute matches with a template
    Replace,
    /// Split the input on matches
    Split,
}

impl TestMode {
    pub fn name(self) -> &'static str {
        match self {
            TestMode::Test => "test",
            TestMode::Match => "match",
            TestMode::Replace => "replace",
            TestMode::Split => "split",
        }
    }
}

impl fmt::Display for TestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TestMode {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "test" => Ok(TestMode::Test),
            "match" => Ok(TestMode::Match),
            "replace" => Ok(TestMode::Replace),
            "split" => Ok(TestMode::Split),
            _ => Err(ToolError::UnsupportedMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for TestMode {
    type Error = ToolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Everything needed to run one pattern against one or more inputs
#[derive(Debug, Clone)]
pub struct PatternTestRequest {
    pub pattern: String,
    pub flags: RegexFlags,
    pub mode: TestMode,
    /// Replacement template for replace mode
    pub replacement: Option<String>,
    /// Inputs tested independently, in order
    pub inputs: Vec<String>,
    /// Upper bound on fancy-regex backtracking steps
    pub backtrack_limit: usize,
}

impl PatternTestRequest {
    pub fn new(pattern: impl Into<String>, flags: RegexFlags, mode: TestMode) -> Self {
        Self {
            pattern: pattern.into(),
            flags,
            mode,
            replacement: None,
            inputs: Vec::new(),
            backtrack_limit: DEFAULT_BACKTRACK_LIMIT,
        }
    }

    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replacement = Some(replacement.into());
        self
    }

    /// Test a single input as a whole
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.inputs = vec![input.into()];
        self
    }

    /// Test every non-blank line of `input` independently
    pub fn with_lines(mut self, input: &str) -> Self {
        self.inputs = test_lines(input).into_iter().map(str::to_string).collect();
        self
    }
}

/// Non-blank lines of a multi-line input
pub fn test_lines(input: &str) -> Vec<&str> {
    input.lines().filter(|line| !line.trim().is_empty()).collect()
}

/// Run a request: compile once, then execute against each input.
///
/// Always returns one result per input. An invalid pattern yields invalid
/// results carrying the engine message and no matches.
pub fn run_request(request: &PatternTestRequest) -> Vec<PatternTestResult> {
    let start = Instant::now();

    match compile_with_limit(&request.pattern, request.flags, request.backtrack_limit) {
        Ok(compiled) => request
            .inputs
            .iter()
            .enumerate()
            .map(|(line, input)| {
                log::trace!("executing /{}/ on input {}", request.pattern, line + 1);
                execute(&compiled, request.mode, request.replacement.as_deref(), input)
            })
            .collect(),
        Err(e) => {
            let message = e.to_string();
            log::debug!("pattern /{}/ rejected: {}", request.pattern, message);
            let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
            request
                .inputs
                .iter()
                .map(|input| PatternTestResult {
                    pattern: request.pattern.clone(),
                    flags: request.flags.as_flag_string(),
                    mode: request.mode,
                    engine: None,
                    input: input.clone(),
                    is_valid: false,
                    validation_error: Some(message.clone()),
                    match_count: 0,
                    matches: Vec::new(),
                    mode_output: None,
                    elapsed_ms,
                })
                .collect()
        }
    }
}

/// Execute a compiled pattern against one input.
///
/// Runtime engine failures are reported in the result instead of
/// propagating, so sibling inputs keep running.
pub fn execute(
    compiled: &CompiledPattern,
    mode: TestMode,
    replacement: Option<&str>,
    input: &str,
) -> PatternTestResult {
    let start = Instant::now();
    let outcome = run_mode(compiled, mode, replacement.unwrap_or_default(), input);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let (matches, mode_output, error) = match outcome {
        Ok((matches, output)) => (matches, output, None),
        Err(e) => {
            let err = ToolError::from(e);
            log::warn!("/{}/ failed on input: {}", compiled.source(), err);
            (Vec::new(), None, Some(err.to_string()))
        }
    };

    PatternTestResult {
        pattern: compiled.source().to_string(),
        flags: compiled.flags().as_flag_string(),
        mode,
        engine: Some(compiled.engine()),
        input: input.to_string(),
        is_valid: error.is_none(),
        validation_error: error,
        match_count: matches.len(),
        matches,
        mode_output,
        elapsed_ms,
    }
}

type ModeResult = (Vec<MatchRecord>, Option<ModeOutput>);

#[allow(clippy::result_large_err)]
fn run_mode(
    compiled: &CompiledPattern,
    mode: TestMode,
    replacement: &str,
    input: &str,
) -> Result<ModeResult, EngineError> {
    let flags = compiled.flags();

    match mode {
        TestMode::Test => {
            let found = scan(compiled, input, flags.global, flags.sticky)?;
            let matched = !found.is_empty();
            Ok((
                to_records(compiled, input, &found),
                Some(ModeOutput::Matched(matched)),
            ))
        }
        TestMode::Match => {
            let found = scan(compiled, input, flags.global, flags.sticky)?;
            Ok((to_records(compiled, input, &found), None))
        }
        TestMode::Replace => {
            let found = scan(compiled, input, flags.global, flags.sticky)?;
            let replaced = replace_matches(input, &found, replacement, compiled.group_names());
            Ok((
                to_records(compiled, input, &found),
                Some(ModeOutput::Replaced(replaced)),
            ))
        }
        TestMode::Split => {
            let fragments = split(compiled, input)?;
            // Reported matches are every match, as in global match mode
            let found = scan(compiled, input, true, false)?;
            Ok((
                to_records(compiled, input, &found),
                Some(ModeOutput::Fragments(fragments)),
            ))
        }
    }
}

/// Collect matches left to right.
///
/// With `all` unset, at most one match is returned. A zero-width match
/// advances the cursor by one character so the scan always terminates.
#[allow(clippy::result_large_err)]
pub fn scan(
    compiled: &CompiledPattern,
    text: &str,
    all: bool,
    sticky: bool,
) -> Result<Vec<Spans>, EngineError> {
    let mut found = Vec::new();
    let mut cursor = 0;

    while cursor <= text.len() {
        let Some(spans) = compiled.find_at(text, cursor, sticky)? else {
            break;
        };

        cursor = if spans.is_zero_width() {
            next_char_boundary(text, spans.end())
        } else {
            spans.end()
        };
        found.push(spans);

        if !all {
            break;
        }
    }

    Ok(found)
}

/// Split `text` on every match, splicing captured groups between fragments.
#[allow(clippy::result_large_err)]
pub fn split(compiled: &CompiledPattern, text: &str) -> Result<Vec<String>, EngineError> {
    if text.is_empty() {
        return Ok(match compiled.find_at(text, 0, true)? {
            Some(_) => Vec::new(),
            None => vec![String::new()],
        });
    }

    let mut fragments = Vec::new();
    let mut fragment_start = 0;
    let mut cursor = 0;

    while cursor < text.len() {
        let Some(spans) = compiled.find_at(text, cursor, false)? else {
            break;
        };
        if spans.start() >= text.len() {
            break;
        }
        // An empty separator at the fragment start would produce an empty
        // fragment; retry one character further
        if spans.end() == fragment_start {
            cursor = next_char_boundary(text, spans.start());
            continue;
        }

        fragments.push(text[fragment_start..spans.start()].to_string());
        for group in 1..spans.group_count() {
            let captured = spans.group(group).map(|(s, e)| &text[s..e]);
            fragments.push(captured.unwrap_or_default().to_string());
        }

        fragment_start = spans.end();
        cursor = fragment_start;
    }

    fragments.push(text[fragment_start..].to_string());
    Ok(fragments)
}

/// Offset just past the character starting at `pos`; past the end when
/// `pos` is already at the end
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| pos + c.len_utf8())
}

fn to_records(compiled: &CompiledPattern, text: &str, found: &[Spans]) -> Vec<MatchRecord> {
    found
        .iter()
        .map(|spans| {
            let slice = |(s, e): (usize, usize)| text[s..e].to_string();
            MatchRecord {
                text: slice((spans.start(), spans.end())),
                start: spans.start(),
                end: spans.end(),
                groups: (1..spans.group_count())
                    .map(|i| spans.group(i).map(slice))
                    .collect(),
                named_groups: compiled
                    .group_names()
                    .iter()
                    .enumerate()
                    .filter_map(|(i, name)| {
                        let name = name.as_ref()?;
                        spans.group(i).map(|span| (name.clone(), slice(span)))
                    })
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::EngineType;

    fn run(pattern: &str, flags: &str, mode: TestMode, input: &str) -> PatternTestResult {
        let request =
            PatternTestRequest::new(pattern, flags.parse().unwrap(), mode).with_input(input);
        run_request(&request).remove(0)
    }

    fn texts(result: &PatternTestResult) -> Vec<&str> {
        result.matches.iter().map(|m| m.text.as_str()).collect()
    }

    #[test]
    fn test_global_match_collects_all() {
        let result = run(r"\d+", "g", TestMode::Match, "a1 b22 c333");
        assert!(result.is_valid);
        assert_eq!(texts(&result), vec!["1", "22", "333"]);
        assert_eq!(result.matches[1].start, 4);
        assert_eq!(result.matches[1].end, 6);
        assert_eq!(result.mode_output, None);
    }

    #[test]
    fn test_non_global_match_collects_first() {
        let result = run(r"\d+", "", TestMode::Match, "a1 b22 c333");
        assert_eq!(texts(&result), vec!["1"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let result = run("(", "g", TestMode::Match, "anything");
        assert!(!result.is_valid);
        assert!(!result.validation_error.as_deref().unwrap_or_default().is_empty());
        assert!(result.matches.is_empty());
        assert!(result.engine.is_none());
    }

    #[test]
    fn test_test_mode() {
        let hit = run(r"\d", "g", TestMode::Test, "a1b2");
        assert_eq!(hit.mode_output, Some(ModeOutput::Matched(true)));
        assert_eq!(hit.match_count, 2);

        let miss = run(r"\d", "", TestMode::Test, "abc");
        assert_eq!(miss.mode_output, Some(ModeOutput::Matched(false)));
        assert!(!miss.matched());
    }

    #[test]
    fn test_replace_backreference() {
        let request =
            PatternTestRequest::new(r"(\w+)@(\w+)", RegexFlags::default(), TestMode::Replace)
                .with_replacement("$2 at $1")
                .with_input("user@example");
        let result = run_request(&request).remove(0);
        assert_eq!(
            result.mode_output,
            Some(ModeOutput::Replaced("example at user".to_string()))
        );
    }

    #[test]
    fn test_replace_global_vs_first() {
        let request = PatternTestRequest::new(r"\d", RegexFlags::global(), TestMode::Replace)
            .with_replacement("#")
            .with_input("a1b2c3");
        let result = run_request(&request).remove(0);
        assert_eq!(result.mode_output, Some(ModeOutput::Replaced("a#b#c#".into())));
        assert_eq!(result.match_count, 3);

        let request = PatternTestRequest::new(r"\d", RegexFlags::default(), TestMode::Replace)
            .with_replacement("#")
            .with_input("a1b2c3");
        let result = run_request(&request).remove(0);
        assert_eq!(result.mode_output, Some(ModeOutput::Replaced("a#b2c3".into())));
        assert_eq!(result.match_count, 1);
    }

    #[test]
    fn test_split_mode() {
        let result = run(",", "", TestMode::Split, "a,b,,c");
        assert_eq!(
            result.mode_output,
            Some(ModeOutput::Fragments(vec![
                "a".into(),
                "b".into(),
                "".into(),
                "c".into()
            ]))
        );
        assert_eq!(result.match_count, 3);
    }

    #[test]
    fn test_split_with_groups_and_empty_separator() {
        let result = run(r"(\d)", "", TestMode::Split, "a1b");
        assert_eq!(
            result.mode_output,
            Some(ModeOutput::Fragments(vec!["a".into(), "1".into(), "b".into()]))
        );

        let result = run("x*", "", TestMode::Split, "abc");
        assert_eq!(
            result.mode_output,
            Some(ModeOutput::Fragments(vec!["a".into(), "b".into(), "c".into()]))
        );
    }

    #[test]
    fn test_split_empty_input() {
        let compiled = crate::core::engine::compile(",", RegexFlags::default()).unwrap();
        assert_eq!(split(&compiled, "").unwrap(), vec![String::new()]);
        let compiled = crate::core::engine::compile("x*", RegexFlags::default()).unwrap();
        assert!(split(&compiled, "").unwrap().is_empty());
    }

    #[test]
    fn test_split_reports_same_matches_as_global_match() {
        let cases = [("x*", "abc", 4), ("$", "ab", 1), (",", "a,b,,c", 3)];
        for (pattern, input, expected) in cases {
            let split = run(pattern, "", TestMode::Split, input);
            let matched = run(pattern, "g", TestMode::Match, input);
            assert_eq!(split.match_count, expected, "/{}/ on {:?}", pattern, input);
            assert_eq!(split.match_count, matched.match_count);
            assert_eq!(split.matches, matched.matches);
        }

        let result = run("$", "", TestMode::Split, "ab");
        assert_eq!(result.mode_output, Some(ModeOutput::Fragments(vec!["ab".into()])));
        assert_eq!(result.matches[0].start, 2);
    }

    #[test]
    fn test_backtrack_limit_fails_only_the_runaway_line() {
        let input = format!("{}\nabc", "ab".repeat(28));
        let mut request =
            PatternTestRequest::new(r"(a|b|ab)*(?>c)", "i".parse().unwrap(), TestMode::Match)
                .with_lines(&input);
        request.backtrack_limit = 100_000;
        let results = run_request(&request);

        assert_eq!(results[0].engine, Some(EngineType::FancyRegex));
        let validity: Vec<bool> = results.iter().map(|r| r.is_valid).collect();
        assert_eq!(validity, vec![false, true]);
        assert!(results[0]
            .validation_error
            .as_deref()
            .unwrap_or_default()
            .starts_with("Execution failed"));
        assert!(results[0].matches.is_empty());
        assert_eq!(texts(&results[1]), vec!["abc"]);
    }

    #[test]
    fn test_zero_length_matches_terminate() {
        let result = run("x*", "g", TestMode::Match, "aaa");
        assert!(result.match_count <= "aaa".len() + 1);
        assert_eq!(result.match_count, 4);
        assert!(result.matches.iter().all(MatchRecord::is_empty));
    }

    #[test]
    fn test_zero_length_advance_respects_utf8() {
        let result = run("", "g", TestMode::Match, "é🙂");
        let starts: Vec<usize> = result.matches.iter().map(|m| m.start).collect();
        assert_eq!(starts, vec![0, 2, 6]);
    }

    #[test]
    fn test_sticky_global_stops_at_gap() {
        let result = run(r"\d", "gy", TestMode::Match, "12a3");
        assert_eq!(texts(&result), vec!["1", "2"]);
    }

    #[test]
    fn test_groups_and_named_groups() {
        let result = run(r"(?P<key>\w+)=(\d+)?", "g", TestMode::Match, "a=1 b=");
        assert_eq!(result.matches[0].groups, vec![Some("a".into()), Some("1".into())]);
        assert_eq!(result.matches[1].groups, vec![Some("b".into()), None]);
        assert_eq!(
            result.matches[1].named_groups.get("key").map(String::as_str),
            Some("b")
        );
    }

    #[test]
    fn test_multiple_lines_are_independent() {
        let request = PatternTestRequest::new(r"^\d+$", RegexFlags::default(), TestMode::Test)
            .with_lines("123\n\nabc\n  \n42");
        let results = run_request(&request);
        assert_eq!(results.len(), 3);
        let matched: Vec<bool> = results.iter().map(PatternTestResult::matched).collect();
        assert_eq!(matched, vec![true, false, true]);
        assert_eq!(results[1].input, "abc");
    }

    #[test]
    fn test_compile_error_applies_to_every_line() {
        let request =
            PatternTestRequest::new("[", RegexFlags::default(), TestMode::Match).with_lines("a\nb");
        let results = run_request(&request);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| !r.is_valid && r.validation_error.is_some()));
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("Replace".parse::<TestMode>().unwrap(), TestMode::Replace);
        assert_eq!(
            "explode".parse::<TestMode>(),
            Err(ToolError::UnsupportedMode("explode".to_string()))
        );
    }
}
