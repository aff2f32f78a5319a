pub mod auth;
pub mod posts;
pub mod profile;
pub mod users;

use serde_json::Value;

use crate::error::ApiError;

/// Pull a required, non-blank string field out of a JSON body.
pub(crate) fn require_str<'a>(payload: &'a Value, field: &str) -> Result<&'a str, ApiError> {
    match payload.get(field).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ApiError::validation_error(format!("{} is required", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn require_str_accepts_present_field() {
        let body = json!({"text": "hello"});
        assert_eq!(require_str(&body, "text").unwrap(), "hello");
    }

    #[test]
    fn require_str_rejects_missing_blank_and_non_string() {
        assert!(require_str(&json!({}), "text").is_err());
        assert!(require_str(&json!({"text": "  "}), "text").is_err());
        assert!(require_str(&json!({"text": 7}), "text").is_err());
    }
}
