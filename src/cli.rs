//! CLI interface using clap
//!
//! Defines all command-line arguments and subcommands.

use std::fs;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use casex::core::store::{load_config, MemoryStore};
use casex::core::{
    explain_pattern, process_regex_test, process_text_case, validate_pattern,
    CaseConversionConfig, RegexTestConfig,
};
use casex::error::{error_codes, ToolError};
use casex::output::json::format_json;
use casex::output::text::{format_case_outcome, format_explain_result, format_validate_result};
use casex::output::ReportFormat;

#[derive(Parser)]
#[command(name = "casex")]
#[command(author, version, about = "Case conversion and regex testing for text tooling", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    pub format: OutputFormat,

    /// JSON settings file with "case" and "regex" sections
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output (default, for tooling)
    Json,
    /// Human-readable text
    Text,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert text to another naming convention
    Case {
        /// Target case (snakecase, camelcase, kebab-case, ...)
        target: String,

        /// Text to convert (reads stdin when omitted)
        input: Option<String>,

        /// Leave all-caps words untouched
        #[arg(long, short = 'a')]
        preserve_acronyms: bool,

        /// Separator for kebab/snake/constant/dot/path targets
        #[arg(long, short = 'd')]
        delimiter: Option<String>,
    },

    /// Test a regex pattern against input
    Test(TestArgs),

    /// Validate regex syntax
    Validate {
        /// The regex pattern to validate
        pattern: String,
    },

    /// Explain a regex pattern
    Explain {
        /// The regex pattern to explain
        pattern: String,
    },
}

#[derive(Args)]
pub struct TestArgs {
    /// The regex pattern to test
    pub pattern: String,

    /// Input text to test against (reads stdin when omitted)
    pub input: Option<String>,

    /// Execution mode: test, match, replace or split
    #[arg(long, short = 'm')]
    pub mode: Option<String>,

    /// Flag string drawn from gimsuy
    #[arg(long)]
    pub flags: Option<String>,

    /// Replacement template for replace mode ($1, $<name>, $&, ...)
    #[arg(long, short = 'r')]
    pub replacement: Option<String>,

    /// Test every non-blank input line separately
    #[arg(long)]
    pub multiple: bool,

    /// Report layout: detailed, simple or json
    #[arg(long)]
    pub report: Option<ReportFormat>,

    /// Include the capture-group breakdown
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub show_groups: Option<bool>,

    /// Include a plain-language explanation of the pattern
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub explain: Option<bool>,

    /// Bold each match inside the input
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub highlight: Option<bool>,
}

/// A tool outcome that reported `success: false`
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct OutcomeError {
    pub code: String,
    pub message: String,
}

impl OutcomeError {
    fn new(code: Option<&str>, message: Option<&str>) -> Self {
        Self {
            code: code.unwrap_or(error_codes::COMMAND_ERROR).to_string(),
            message: message.unwrap_or("command failed").to_string(),
        }
    }
}

/// Parse CLI arguments
pub fn parse() -> Cli {
    Cli::parse()
}

/// Error code reported for a failed command
pub fn error_code(err: &anyhow::Error) -> String {
    if let Some(outcome) = err.downcast_ref::<OutcomeError>() {
        return outcome.code.clone();
    }
    err.downcast_ref::<ToolError>()
        .map_or(error_codes::COMMAND_ERROR, ToolError::code)
        .to_string()
}

/// Load the settings file, or empty settings when none was given
pub fn load_settings(path: Option<&Path>) -> Result<MemoryStore> {
    let Some(path) = path else {
        return Ok(MemoryStore::new());
    };

    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let store = MemoryStore::from_json(&json)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    log::debug!("loaded settings from {}", path.display());
    Ok(store)
}

/// Handle the case command
pub fn handle_case(
    target: &str,
    input: Option<&str>,
    preserve_acronyms: bool,
    delimiter: Option<&str>,
    settings: &MemoryStore,
    format: OutputFormat,
) -> Result<String> {
    let mut config: CaseConversionConfig =
        load_config(settings, "case").context("invalid \"case\" settings")?;
    config.target_case = target.parse()?;
    if preserve_acronyms {
        config.preserve_acronyms = true;
    }
    if let Some(delimiter) = delimiter {
        config.custom_delimiter = delimiter.to_string();
    }

    let input = read_input(input)?;
    let outcome = process_text_case(&input, &config);
    if !outcome.success {
        return Err(OutcomeError::new(outcome.code.as_deref(), outcome.error.as_deref()).into());
    }

    match format {
        OutputFormat::Json => Ok(format_json(&outcome)),
        OutputFormat::Text => Ok(format_case_outcome(&outcome)),
    }
}

/// Handle the test command
pub fn handle_test(
    args: &TestArgs,
    settings: &MemoryStore,
    format: OutputFormat,
) -> Result<String> {
    let mut config: RegexTestConfig =
        load_config(settings, "regex").context("invalid \"regex\" settings")?;
    if let Some(mode) = &args.mode {
        config.mode = mode.parse()?;
    }
    if let Some(flags) = &args.flags {
        config.flags = flags.parse()?;
    }
    if let Some(replacement) = &args.replacement {
        config.replacement = replacement.clone();
    }
    if args.multiple {
        config.test_multiple_inputs = true;
    }
    if let Some(report) = args.report {
        config.output_format = report;
    }
    if let Some(show_groups) = args.show_groups {
        config.show_groups = show_groups;
    }
    if let Some(explain) = args.explain {
        config.show_explanation = explain;
    }
    if let Some(highlight) = args.highlight {
        config.highlight_matches = highlight;
    }

    let input = read_input(args.input.as_deref())?;
    let outcome = process_regex_test(&input, &config, &args.pattern);
    if !outcome.success {
        return Err(OutcomeError::new(outcome.code.as_deref(), outcome.error.as_deref()).into());
    }

    match format {
        OutputFormat::Json => Ok(format_json(&outcome)),
        OutputFormat::Text => Ok(outcome.output.unwrap_or_default()),
    }
}

/// Handle the validate command
pub fn handle_validate(pattern: &str, format: OutputFormat) -> Result<String> {
    let result = validate_pattern(pattern);

    match format {
        OutputFormat::Json => Ok(format_json(&result)),
        OutputFormat::Text => Ok(format_validate_result(&result)),
    }
}

/// Handle the explain command
pub fn handle_explain(pattern: &str, format: OutputFormat) -> Result<String> {
    let result = explain_pattern(pattern);

    match format {
        OutputFormat::Json => Ok(format_json(&result)),
        OutputFormat::Text => Ok(format_explain_result(&result)),
    }
}

/// Use the positional input, or read it from stdin
fn read_input(input: Option<&str>) -> Result<String> {
    if let Some(text) = input {
        return Ok(text.to_string());
    }

    // Warn when nothing is piped in
    if std::io::stdin().is_terminal() {
        eprintln!("casex: reading from stdin (pipe data or press Ctrl-D when done)");
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read stdin")?;

    // Drop the trailing newline that piping adds
    let trimmed = buffer
        .strip_suffix('\n')
        .map(|s| s.strip_suffix('\r').unwrap_or(s))
        .unwrap_or(&buffer);
    Ok(trimmed.to_string())
}
