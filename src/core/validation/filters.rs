//! Reusable field filters
//!
//! These filters transform submitted field values before validation

use anyhow::{Result, anyhow};
use serde_json::Value;

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.trim().to_string()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: parse an integer out of a string
///
/// Browser forms submit select values as strings ("4"). Strings that are
/// not integers fail the filter; numbers and other values pass through for
/// the validators to judge.
pub fn parse_integer() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |field: &str, value: Value| {
        if let Some(s) = value.as_str() {
            s.trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| anyhow!("'{}' must be a whole number (got '{}')", field, s))
        } else {
            Ok(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === trim() ===

    #[test]
    fn test_trim_removes_whitespace() {
        let f = trim();
        let result = f("author", json!("  Pat  ")).expect("should not fail");
        assert_eq!(result, json!("Pat"));
    }

    #[test]
    fn test_trim_empty_string() {
        let f = trim();
        let result = f("text", json!("   ")).expect("should not fail");
        assert_eq!(result, json!(""));
    }

    #[test]
    fn test_trim_non_string_passthrough() {
        let f = trim();
        let result = f("rating", json!(4)).expect("should not fail");
        assert_eq!(result, json!(4));
    }

    // === parse_integer() ===

    #[test]
    fn test_parse_integer_from_string() {
        let f = parse_integer();
        assert_eq!(f("rating", json!(" 4 ")).unwrap(), json!(4));
    }

    #[test]
    fn test_parse_integer_rejects_fraction_string() {
        let f = parse_integer();
        let err = f("rating", json!("4.5")).unwrap_err();
        assert!(err.to_string().contains("whole number"));
    }

    #[test]
    fn test_parse_integer_number_passthrough() {
        let f = parse_integer();
        assert_eq!(f("rating", json!(3.5)).unwrap(), json!(3.5));
        assert_eq!(f("rating", json!(null)).unwrap(), json!(null));
    }
}
