//! casex - case conversion and regex testing engines
//!
//! Two stateless tools behind plain function calls:
//!
//! - [`process_text_case`] converts text between naming conventions.
//! - [`process_regex_test`] runs a pattern against one or more inputs in
//!   test, match, replace or split mode and renders a report.
//!
//! ```
//! use casex::{process_text_case, CaseConversionConfig, CaseTarget};
//!
//! let config = CaseConversionConfig {
//!     target_case: CaseTarget::Snakecase,
//!     ..CaseConversionConfig::default()
//! };
//! let outcome = process_text_case("created at timestamp", &config);
//! assert_eq!(outcome.output.as_deref(), Some("created_at_timestamp"));
//! ```

pub mod core;
pub mod error;
pub mod output;

pub use crate::core::{
    process_regex_test, process_regex_test_recorded, process_text_case,
    process_text_case_recorded, CaseConversionConfig, CaseTarget, RegexFlags, RegexTestConfig,
    TestMode,
};
pub use crate::error::ToolError;
pub use crate::output::{CaseOutcome, RegexOutcome, ReportFormat};
