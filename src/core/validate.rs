//! Pattern validation
//!
//! Compiles the pattern through the same engine selection the executor
//! uses, so a pattern is valid here exactly when a test run accepts it,
//! and the reported message matches the per-line validation error.

use regex_syntax::{ast, hir};

use super::engine::{compile, detect_fancy_features, EngineError, EngineType, RegexFlags};
use crate::output::{ValidateResult, ValidationError};

/// Validate a regex pattern
pub fn validate_pattern(pattern: &str) -> ValidateResult {
    let err = match compile(pattern, RegexFlags::default()) {
        Ok(compiled) => {
            let engine = compiled.engine();
            let reason = match engine {
                EngineType::Regex => None,
                EngineType::FancyRegex => detect_fancy_features(pattern)
                    .reason()
                    .or_else(|| Some("Only supported by fancy-regex".to_string())),
            };
            return ValidateResult {
                valid: true,
                error: None,
                engine_required: Some(engine),
                reason,
                suggestion: None,
            };
        }
        Err(err) => err,
    };

    let (kind, position) = classify(pattern, &err);
    ValidateResult {
        valid: false,
        error: Some(ValidationError {
            kind: kind.to_string(),
            position,
            message: err.to_string(),
        }),
        engine_required: None,
        reason: None,
        suggestion: suggestion(kind).map(str::to_string),
    }
}

/// Error kind and byte offset for a rejected pattern
fn classify(pattern: &str, err: &EngineError) -> (&'static str, Option<usize>) {
    match err {
        EngineError::FancyRegexError(fancy_regex::Error::ParseError(position, kind)) => {
            (fancy_parse_kind(kind), Some(*position))
        }
        EngineError::FancyRegexError(_) => ("compile_error", None),
        EngineError::RegexError(_) => match regex_syntax::parse(pattern) {
            Err(regex_syntax::Error::Parse(e)) => {
                (ast_kind(e.kind()), Some(e.span().start.offset))
            }
            Err(regex_syntax::Error::Translate(e)) => {
                (hir_kind(e.kind()), Some(e.span().start.offset))
            }
            Err(_) => ("syntax_error", None),
            // Parses but fails later, e.g. the compiled size limit
            Ok(_) => ("compile_error", None),
        },
        EngineError::Runtime(_) => ("compile_error", None),
    }
}

fn ast_kind(kind: &ast::ErrorKind) -> &'static str {
    use ast::ErrorKind::*;

    match kind {
        GroupUnclosed => "unclosed_group",
        GroupUnopened => "unopened_group",
        EscapeUnexpectedEof => "incomplete_escape",
        EscapeUnrecognized | ClassEscapeInvalid => "unknown_escape",
        EscapeHexEmpty | EscapeHexInvalid | EscapeHexInvalidDigit => "invalid_hex_escape",
        ClassUnclosed => "unclosed_class",
        ClassRangeInvalid | ClassRangeLiteral => "invalid_class_range",
        RepetitionMissing => "missing_repetition_target",
        RepetitionCountUnclosed => "unclosed_repetition",
        RepetitionCountInvalid | RepetitionCountDecimalEmpty | DecimalEmpty | DecimalInvalid => {
            "invalid_repetition"
        }
        GroupNameDuplicate { .. } => "duplicate_group_name",
        GroupNameEmpty | GroupNameInvalid | GroupNameUnexpectedEof => "invalid_group_name",
        FlagUnrecognized | FlagDanglingNegation | FlagUnexpectedEof | FlagDuplicate { .. }
        | FlagRepeatedNegation { .. } => "unknown_flag",
        NestLimitExceeded(_) | CaptureLimitExceeded => "too_complex",
        _ => "syntax_error",
    }
}

fn hir_kind(kind: &hir::ErrorKind) -> &'static str {
    use hir::ErrorKind::*;

    match kind {
        UnicodePropertyNotFound | UnicodePropertyValueNotFound | UnicodePerlClassNotFound => {
            "unknown_unicode_class"
        }
        _ => "syntax_error",
    }
}

fn fancy_parse_kind(kind: &fancy_regex::ParseError) -> &'static str {
    use fancy_regex::ParseError::*;

    match kind {
        UnclosedOpenParen => "unclosed_group",
        TrailingBackslash => "incomplete_escape",
        InvalidEscape(_) => "unknown_escape",
        InvalidHex | InvalidCodepointValue => "invalid_hex_escape",
        InvalidClass => "unclosed_class",
        InvalidRepeat => "invalid_repetition",
        TargetNotRepeatable => "missing_repetition_target",
        UnknownFlag(_) => "unknown_flag",
        InvalidBackref | InvalidGroupNameBackref(_) => "invalid_backreference",
        InvalidGroupName => "invalid_group_name",
        RecursionExceeded => "too_complex",
        _ => "syntax_error",
    }
}

/// Suggest a fix based on error kind
fn suggestion(kind: &str) -> Option<&'static str> {
    match kind {
        "unclosed_group" => Some("Add closing ')' to complete the group"),
        "unopened_group" => Some("Remove extra ')' or add opening '('"),
        "incomplete_escape" => {
            Some("Complete the escape sequence or escape the backslash with '\\\\'")
        }
        "unknown_escape" => Some("Escape the backslash with '\\\\' to match it literally"),
        "unclosed_class" => Some("Add closing ']' to complete the character class"),
        "invalid_class_range" => Some("Put the lower bound of the range first, e.g. 'a-z'"),
        "missing_repetition_target" => Some("Add a character or group before the quantifier"),
        "unclosed_repetition" => Some("Add closing '}' to complete the repetition"),
        "invalid_repetition" => Some("Use {n}, {n,} or {n,m} with n <= m"),
        "duplicate_group_name" => Some("Give each named group a distinct name"),
        "invalid_backreference" => Some("Refer only to groups defined in the pattern"),
        _ => None,
    }
}
