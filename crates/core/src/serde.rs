//! Serde helpers for lenient request decoding.
//!
//! Clients send blank strings for fields they did not fill in. Those are
//! treated as absent so the mapper applies its defaults.

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string, treating empty or blank strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        value: Option<String>,
    }

    #[test]
    fn test_present_value_is_kept() {
        let parsed: Payload = serde_json::from_str(r#"{"value": "2024-01-01T00:00:00Z"}"#).unwrap();
        assert_eq!(parsed.value.as_deref(), Some("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_blank_value_is_none() {
        let parsed: Payload = serde_json::from_str(r#"{"value": "   "}"#).unwrap();
        assert_eq!(parsed.value, None);
    }

    #[test]
    fn test_null_or_missing_value_is_none() {
        let parsed: Payload = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert_eq!(parsed.value, None);

        let parsed: Payload = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.value, None);
    }
}
