//! Case conversion and regex testing engines
//!
//! This module contains all the business logic for casex commands.

pub mod case;
pub mod engine;
pub mod execute;
pub mod explain;
pub mod process;
pub mod replace;
pub mod store;
pub mod validate;
pub mod words;

// Re-export commonly used types
pub use case::{convert, convert_case, CaseTarget};
pub use engine::{compile, EngineType, RegexFlags};
pub use execute::{run_request, PatternTestRequest, TestMode};
pub use explain::explain_pattern;
pub use process::{
    process_regex_test, process_regex_test_recorded, process_text_case,
    process_text_case_recorded, CaseConversionConfig, RegexTestConfig,
};
pub use store::{ConfigStore, HistoryEntry, HistoryStore, MemoryStore};
pub use validate::validate_pattern;
pub use words::{is_acronym, split_words};
