//! Human-friendly text output formatting
//!
//! Regex test reports (detailed markdown and simple summaries) plus the
//! text renderings used when --format text is specified.

use std::fmt::Write;

use super::types::*;
use super::FormatOptions;
use crate::core::execute::TestMode;
use crate::core::explain::explain_pattern;

/// Render the multi-section markdown report, one section per input
pub fn format_detailed_report(results: &[PatternTestResult], options: &FormatOptions) -> String {
    let numbered = results.len() > 1;
    results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let mut section = String::new();
            if numbered {
                let _ = writeln!(section, "## Test {}\n", i + 1);
            }
            write_detailed(&mut section, result, options);
            section
        })
        .collect::<Vec<_>>()
        .join("\n---\n\n")
}

fn write_detailed(out: &mut String, result: &PatternTestResult, options: &FormatOptions) {
    let _ = writeln!(out, "**Pattern:** `/{}/{}`", result.pattern, result.flags);
    let _ = writeln!(out, "**Mode:** {}", result.mode);
    if let Some(engine) = result.engine {
        let _ = writeln!(out, "**Engine:** {}", engine);
    }
    let _ = writeln!(out, "**Input:** `{}`", result.input);

    if options.show_explanation {
        let explanation = explain_pattern(&result.pattern);
        if !explanation.parts.is_empty() {
            out.push_str("\n### Explanation\n\n");
            for part in &explanation.parts {
                let _ = writeln!(out, "- `{}`: {}", part.token, part.desc);
            }
        }
    }

    out.push_str("\n### Result\n\n");
    if !result.is_valid {
        let _ = writeln!(
            out,
            "**Error:** {}",
            result.validation_error.as_deref().unwrap_or("unknown error")
        );
        return;
    }
    write_mode_summary(out, result);

    if result.matches.is_empty() {
        return;
    }

    out.push_str("\n### Matches\n\n");
    out.push_str("| # | Match | Position | Length |\n");
    out.push_str("|---|-------|----------|--------|\n");
    for (i, m) in result.matches.iter().enumerate() {
        let _ = writeln!(
            out,
            "| {} | `{}` | {}-{} | {} |",
            i + 1,
            table_cell(&m.text),
            m.start,
            m.end,
            m.len()
        );
    }

    if options.highlight_matches && result.matches.iter().any(|m| !m.is_empty()) {
        out.push_str("\n### Highlighted\n\n");
        out.push_str(&highlight_matches(&result.input, &result.matches));
        out.push('\n');
    }

    if options.show_groups && result.matches.iter().any(|m| !m.groups.is_empty()) {
        out.push_str("\n### Capture Groups\n\n");
        for (i, m) in result.matches.iter().enumerate() {
            let _ = writeln!(out, "**Match {}:**", i + 1);
            for (g, group) in m.groups.iter().enumerate() {
                match group {
                    Some(text) => {
                        let _ = writeln!(out, "- Group {}: `{}`", g + 1, text);
                    }
                    None => {
                        let _ = writeln!(out, "- Group {}: (unmatched)", g + 1);
                    }
                }
            }
            for (name, text) in &m.named_groups {
                let _ = writeln!(out, "- `{}`: `{}`", name, text);
            }
        }
    }
}

fn write_mode_summary(out: &mut String, result: &PatternTestResult) {
    match (&result.mode, &result.mode_output) {
        (TestMode::Test, _) => {
            if result.matched() {
                out.push_str("✓ Pattern matches\n");
            } else {
                out.push_str("✗ No match\n");
            }
        }
        (TestMode::Replace, Some(ModeOutput::Replaced(replaced))) => {
            let _ = writeln!(
                out,
                "Replaced {} match{}\n",
                result.match_count,
                plural_es(result.match_count)
            );
            let _ = writeln!(out, "```\n{}\n```", replaced);
        }
        (TestMode::Split, Some(ModeOutput::Fragments(fragments))) => {
            let _ = writeln!(
                out,
                "Split into {} fragment{}\n",
                fragments.len(),
                if fragments.len() == 1 { "" } else { "s" }
            );
            for (i, fragment) in fragments.iter().enumerate() {
                let _ = writeln!(out, "{}. `{}`", i + 1, fragment);
            }
        }
        _ => match result.match_count {
            0 => out.push_str("No matches found\n"),
            n => {
                let _ = writeln!(out, "Found {} match{}", n, plural_es(n));
            }
        },
    }
}

/// Wrap every non-empty match in `**` markers.
///
/// Single forward pass over `input`; matches must be in ascending start
/// order. Zero-width and overlapping matches are skipped.
pub fn highlight_matches(input: &str, matches: &[MatchRecord]) -> String {
    let mut out = String::with_capacity(input.len() + matches.len() * 4);
    let mut cursor = 0;

    for m in matches.iter().filter(|m| !m.is_empty()) {
        if m.start < cursor || m.end > input.len() {
            continue;
        }
        out.push_str(&input[cursor..m.start]);
        out.push_str("**");
        out.push_str(&input[m.start..m.end]);
        out.push_str("**");
        cursor = m.end;
    }

    out.push_str(&input[cursor..]);
    out
}

/// Render a compact summary, one or two lines per input
pub fn format_simple_report(results: &[PatternTestResult]) -> String {
    let mut out = String::new();

    for result in results {
        if !result.is_valid {
            let _ = writeln!(
                out,
                "✗ Error: {}",
                result.validation_error.as_deref().unwrap_or("unknown error")
            );
            continue;
        }

        match &result.mode_output {
            Some(ModeOutput::Matched(matched)) => {
                let mark = if *matched { "✓" } else { "✗" };
                let _ = writeln!(out, "{} {}", mark, result.input);
            }
            Some(ModeOutput::Replaced(replaced)) => {
                let _ = writeln!(out, "{} → {}", result.input, replaced);
            }
            Some(ModeOutput::Fragments(fragments)) => {
                let _ = writeln!(out, "{} → {:?}", result.input, fragments);
            }
            None if result.matches.is_empty() => {
                let _ = writeln!(out, "No matches in \"{}\"", result.input);
            }
            None => {
                for m in &result.matches {
                    let _ = writeln!(out, "• \"{}\" [{}..{}]", m.text, m.start, m.end);
                }
            }
        }
    }

    out
}

/// Format CaseOutcome as human-readable text
pub fn format_case_outcome(outcome: &CaseOutcome) -> String {
    let mut output = String::new();

    match (&outcome.output, &outcome.metadata) {
        (Some(converted), Some(metadata)) if outcome.success => {
            output.push_str(&format!("{}\n\n", converted));
            output.push_str(&format!("Target: {}\n", metadata.target_case));
            output.push_str(&format!("Words:  {}\n", metadata.word_count));
            output.push_str(&format!(
                "Length: {} → {}\n",
                metadata.original_length, metadata.converted_length
            ));
            if metadata.acronyms_preserved {
                output.push_str("Acronyms preserved\n");
            }
        }
        _ => {
            output.push_str(&format!(
                "✗ {}\n",
                outcome.error.as_deref().unwrap_or("conversion failed")
            ));
        }
    }

    output
}

/// Format ValidateResult as human-readable text
pub fn format_validate_result(result: &ValidateResult) -> String {
    let mut output = String::new();

    if result.valid {
        output.push_str("✓ Pattern is valid\n");

        if let Some(ref engine) = result.engine_required {
            output.push_str(&format!("\nEngine required: {}\n", engine));
        }

        if let Some(ref reason) = result.reason {
            output.push_str(&format!("Reason: {}\n", reason));
        }
    } else {
        output.push_str("✗ Pattern is invalid\n");

        if let Some(ref error) = result.error {
            output.push('\n');
            output.push_str(&format!("Error: {}\n", error.message));
            if let Some(pos) = error.position {
                output.push_str(&format!("Position: {}\n", pos));
            }
        }

        if let Some(ref suggestion) = result.suggestion {
            output.push_str(&format!("\nSuggestion: {}\n", suggestion));
        }
    }

    output
}

/// Format ExplainResult as human-readable text
pub fn format_explain_result(result: &ExplainResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Pattern: {}\n\n", result.pattern));
    if result.parts.is_empty() {
        output.push_str("No special tokens found; the pattern matches literally\n");
        return output;
    }

    output.push_str("Breakdown:\n");
    for part in &result.parts {
        output.push_str(&format!("• {}\n", part.token));
        output.push_str(&format!("  {}\n", part.desc));
    }

    output
}

fn plural_es(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "es"
    }
}

/// Keep a value on one markdown table row
fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', "\\n")
}
