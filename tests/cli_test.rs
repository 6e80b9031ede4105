//! CLI end-to-end tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn casex() -> Command {
    Command::new(assert_cmd::cargo_bin!("casex"))
}

#[test]
fn test_help() {
    casex().arg("--help").assert().success();
}

#[test]
fn test_version() {
    casex()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("casex"));
}

#[test]
fn test_no_command_prints_usage() {
    casex()
        .assert()
        .success()
        .stderr(predicate::str::contains("Usage: casex <COMMAND>"));
}

#[test]
fn test_case_snake() {
    casex()
        .args(["case", "snakecase", "created at timestamp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\": true"))
        .stdout(predicate::str::contains(
            "\"output\": \"created_at_timestamp\"",
        ))
        .stdout(predicate::str::contains("\"word_count\": 3"));
}

#[test]
fn test_case_preserve_acronyms_text() {
    casex()
        .args([
            "case",
            "camelCase",
            "XML HTTP Request Handler",
            "--preserve-acronyms",
            "--format",
            "text",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("XMLHTTPRequestHandler\n"))
        .stdout(predicate::str::contains("Acronyms preserved"));
}

#[test]
fn test_case_custom_delimiter() {
    casex()
        .args(["case", "kebab", "fooBarBaz", "-d", "+", "-f", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("foo+bar+baz\n"));
}

#[test]
fn test_case_reads_stdin() {
    casex()
        .args(["case", "constant"])
        .write_stdin("user id\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"output\": \"USER_ID\""));
}

#[test]
fn test_case_unknown_target() {
    casex()
        .args(["case", "wavycase", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"code\":\"UNSUPPORTED_CASE\""));
}

#[test]
fn test_case_blank_input() {
    casex()
        .args(["case", "snakecase", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"code\":\"EMPTY_INPUT\""))
        .stderr(predicate::str::contains("Input text is empty"));
}

#[test]
fn test_regex_match_json() {
    casex()
        .args(["test", r"\d+", "a1 b22 c333"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"match_count\": 3"))
        .stdout(predicate::str::contains("\"text\": \"333\""))
        .stdout(predicate::str::contains("\"total_matches\": 3"));
}

#[test]
fn test_regex_non_global() {
    casex()
        .args(["test", r"\d+", "a1 b22 c333", "--flags", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"match_count\": 1"));
}

#[test]
fn test_regex_detailed_report() {
    casex()
        .args(["test", r"(\w+)@(\w+)", "user@example", "-f", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Pattern:** `/(\\w+)@(\\w+)/g`"))
        .stdout(predicate::str::contains("Found 1 match"))
        .stdout(predicate::str::contains("**user@example**"))
        .stdout(predicate::str::contains("- Group 2: `example`"));
}

#[test]
fn test_regex_replace_backreference() {
    casex()
        .args([
            "test",
            r"(\w+)@(\w+)",
            "user@example",
            "--mode",
            "replace",
            "--replacement",
            "$2 at $1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode_output\": \"example at user\""));
}

#[test]
fn test_regex_split_simple_report() {
    casex()
        .args([
            "test", ",", "a,b,,c", "--mode", "split", "--report", "simple", "-f", "text",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"a,b,,c → ["a", "b", "", "c"]"#));
}

#[test]
fn test_regex_multiple_lines() {
    casex()
        .args([
            "test", r"^\d+$", "--mode", "test", "--multiple", "--report", "simple", "-f", "text",
        ])
        .write_stdin("123\n\nabc\n42\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ 123\n✗ abc\n✓ 42\n"));
}

#[test]
fn test_regex_zero_length_terminates() {
    casex()
        .args(["test", "x*", "aaa"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"match_count\": 4"));
}

#[test]
fn test_regex_invalid_pattern() {
    casex()
        .args(["test", "(", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"code\":\"INVALID_PATTERN\""))
        .stderr(predicate::str::contains("Invalid regular expression"));
}

#[test]
fn test_regex_unknown_mode() {
    casex()
        .args(["test", "a", "abc", "--mode", "explode"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"code\":\"UNSUPPORTED_MODE\""));
}

#[test]
fn test_regex_unknown_flag() {
    casex()
        .args(["test", "a", "abc", "--flags", "gz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"code\":\"INVALID_FLAG\""));
}

#[test]
fn test_config_file_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("casex.json");
    fs::write(
        &config_path,
        r#"{ "regex": { "mode": "test", "outputFormat": "simple" }, "case": { "targetCase": "dotcase" } }"#,
    )
    .unwrap();

    casex()
        .args(["test", "b", "abc", "-f", "text", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ abc"));

    // Explicit flags win over the file
    casex()
        .args([
            "test", "b", "abc", "-f", "text", "--report", "detailed", "--config",
        ])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Pattern matches"));
}

#[test]
fn test_config_file_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("broken.json");
    fs::write(&config_path, "[1, 2, 3]").unwrap();

    casex()
        .args(["test", "a", "abc", "--config"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"code\":\"INVALID_CONFIG\""));
}

#[test]
fn test_config_file_missing() {
    casex()
        .args(["case", "snake", "a b", "--config", "/nonexistent/casex.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn test_validate_valid() {
    casex()
        .args(["validate", r"\d+"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": true"));
}

#[test]
fn test_validate_invalid() {
    casex()
        .args(["validate", r"(\d+"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": false"))
        .stdout(predicate::str::contains("unclosed_group"));
}

#[test]
fn test_explain_text() {
    casex()
        .args(["explain", r"^\d+$", "-f", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Breakdown:"))
        .stdout(predicate::str::contains("Any digit"));
}
