//! JSON output formatting
//!
//! JSON is the default CLI output format and the `json` report layout.

use serde::Serialize;

/// Format a result as JSON
pub fn format_json<T: Serialize + ?Sized>(result: &T) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|e| {
        format!(
            r#"{{"error": true, "code": "SERIALIZATION_ERROR", "message": "{}"}}"#,
            e
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::ErrorResponse;

    #[test]
    fn test_format_json_is_pretty() {
        let json = format_json(&ErrorResponse::new("EMPTY_INPUT", "Pattern is empty"));
        assert!(json.contains("\n"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["code"], "EMPTY_INPUT");
        assert_eq!(value["error"], true);
    }
}
