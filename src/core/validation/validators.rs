//! Reusable field validators

use serde_json::Value;

/// Validator: field is a string that is not blank
pub fn required_text() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Null => Err(format!("'{}' is required", field)),
        Value::String(s) if s.trim().is_empty() => Err(format!("'{}' must not be empty", field)),
        Value::String(_) => Ok(()),
        _ => Err(format!("'{}' must be text", field)),
    }
}

/// Validator: field is an integer within `min..=max`
pub fn integer_in_range(
    min: i64,
    max: i64,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if value.is_null() {
            return Err(format!("'{}' is required", field));
        }
        let Some(n) = value.as_i64() else {
            return Err(format!("'{}' must be a whole number (got {})", field, value));
        };
        if n < min || n > max {
            Err(format!(
                "'{}' must be between {} and {} (got {})",
                field, min, max, n
            ))
        } else {
            Ok(())
        }
    }
}
