//! Output formatting module for casex
//!
//! Result types plus the JSON and text renderers. Regex test reports come in
//! three flavours selected by [`ReportFormat`].

pub mod json;
pub mod text;
pub mod types;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use types::*;

/// Report layout for regex test results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Multi-section markdown report per input
    #[default]
    Detailed,
    /// One or two lines per input
    Simple,
    /// The result list serialized verbatim
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReportFormat::Detailed => "detailed",
            ReportFormat::Simple => "simple",
            ReportFormat::Json => "json",
        })
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "detailed" => Ok(ReportFormat::Detailed),
            "simple" => Ok(ReportFormat::Simple),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("unknown report format: {}", s)),
        }
    }
}

/// Options controlling a regex test report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub format: ReportFormat,
    pub show_groups: bool,
    pub show_explanation: bool,
    pub highlight_matches: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            format: ReportFormat::Detailed,
            show_groups: true,
            show_explanation: false,
            highlight_matches: true,
        }
    }
}

/// Render regex test results in the requested layout
pub fn format_results(results: &[PatternTestResult], options: &FormatOptions) -> String {
    match options.format {
        ReportFormat::Json => json::format_json(&results),
        ReportFormat::Simple => text::format_simple_report(results),
        ReportFormat::Detailed => text::format_detailed_report(results, options),
    }
}
