//! Error taxonomy shared by the case and regex tools
//!
//! Every variant is recoverable at the entry-point boundary: the process
//! functions fold them into a `{ success: false, error }` outcome.

use thiserror::Error;

use crate::core::engine::EngineError;

/// Errors surfaced by the text tools
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// Input text or pattern was blank
    #[error("{0} is empty")]
    EmptyInput(&'static str),

    /// The regex engine rejected the pattern
    #[error("Invalid regular expression: {0}")]
    PatternCompile(String),

    /// Matching failed after the pattern compiled
    #[error("Execution failed: {0}")]
    Execution(String),

    /// An unknown mode string reached the executor
    #[error("Unsupported mode '{0}'. Valid modes: test, match, replace, split")]
    UnsupportedMode(String),

    /// An unknown case target was requested
    #[error("Unsupported case target '{0}'")]
    UnsupportedCase(String),

    /// A flag character outside `gimsuy`
    #[error("Invalid flag '{0}'. Valid flags: g, i, m, s, u, y")]
    InvalidFlag(char),

    /// Stored or supplied configuration could not be read
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ToolError {
    /// Stable machine-readable code for structured error output
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::EmptyInput(_) => error_codes::EMPTY_INPUT,
            ToolError::PatternCompile(_) => error_codes::INVALID_PATTERN,
            ToolError::Execution(_) => error_codes::EXECUTION_ERROR,
            ToolError::UnsupportedMode(_) => error_codes::UNSUPPORTED_MODE,
            ToolError::UnsupportedCase(_) => error_codes::UNSUPPORTED_CASE,
            ToolError::InvalidFlag(_) => error_codes::INVALID_FLAG,
            ToolError::Config(_) => error_codes::INVALID_CONFIG,
        }
    }
}

impl From<EngineError> for ToolError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Runtime(msg) => ToolError::Execution(msg),
            other => ToolError::PatternCompile(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::Config(err.to_string())
    }
}

/// Error codes used in structured error responses
pub mod error_codes {
    pub const EMPTY_INPUT: &str = "EMPTY_INPUT";
    pub const INVALID_PATTERN: &str = "INVALID_PATTERN";
    pub const EXECUTION_ERROR: &str = "EXECUTION_ERROR";
    pub const UNSUPPORTED_MODE: &str = "UNSUPPORTED_MODE";
    pub const UNSUPPORTED_CASE: &str = "UNSUPPORTED_CASE";
    pub const INVALID_FLAG: &str = "INVALID_FLAG";
    pub const INVALID_CONFIG: &str = "INVALID_CONFIG";
    pub const COMMAND_ERROR: &str = "COMMAND_ERROR";
}
