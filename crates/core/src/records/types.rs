use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde::deserialize_optional_string;

/// The identifier shape a storage backend issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Monotonic integer keys (relational and in-memory stores).
    Numeric,
    /// Store-generated opaque string tokens (document store).
    Opaque,
}

/// A backend-specific record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    Numeric(i64),
    Opaque(String),
}

impl RecordId {
    /// Parses a caller-supplied identifier for a backend of the given kind.
    ///
    /// Returns `None` for empty input, or when the input cannot be a key of
    /// that kind. Callers treat `None` as "no such record".
    pub fn parse(raw: &str, kind: KeyKind) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        match kind {
            KeyKind::Numeric => raw.parse::<i64>().ok().map(RecordId::Numeric),
            KeyKind::Opaque => Some(RecordId::Opaque(raw.to_string())),
        }
    }

    pub fn kind(&self) -> KeyKind {
        match self {
            RecordId::Numeric(_) => KeyKind::Numeric,
            RecordId::Opaque(_) => KeyKind::Opaque,
        }
    }

    pub fn as_numeric(&self) -> Option<i64> {
        match self {
            RecordId::Numeric(id) => Some(*id),
            RecordId::Opaque(_) => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&str> {
        match self {
            RecordId::Numeric(_) => None,
            RecordId::Opaque(id) => Some(id),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Numeric(id) => write!(f, "{id}"),
            RecordId::Opaque(id) => f.write_str(id),
        }
    }
}

/// A user as exchanged with API callers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
        }
    }
}

/// A walk as exchanged with API callers.
///
/// Timestamps travel as ISO-8601 text so that unparsable values can be
/// recovered by the mapper instead of rejected at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Walk {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub start_time: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<String>,
    #[serde(default)]
    pub distance_meters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyline: Option<Vec<f64>>,
    /// Duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl Walk {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    pub fn with_start_time(mut self, start_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    pub fn with_end_time(mut self, end_time: impl Into<String>) -> Self {
        self.end_time = Some(end_time.into());
        self
    }

    pub fn with_distance(mut self, meters: f64) -> Self {
        self.distance_meters = Some(meters);
        self
    }

    pub fn with_polyline(mut self, polyline: Vec<f64>) -> Self {
        self.polyline = Some(polyline);
        self
    }

    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration = Some(seconds);
        self
    }
}

/// A user as persisted by a storage backend.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    /// Unset until the backend assigns one on create.
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
}

/// A walk as persisted by a storage backend.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkRecord {
    /// Unset until the backend assigns one on create.
    pub id: Option<RecordId>,
    /// Owning user id. Not checked against stored users.
    pub user_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub distance_meters: f64,
    /// Coordinate list in its bracketed text form, see [`super::polyline`].
    pub polyline: Option<String>,
    pub duration_seconds: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_id() {
        assert_eq!(
            RecordId::parse("42", KeyKind::Numeric),
            Some(RecordId::Numeric(42))
        );
    }

    #[test]
    fn test_parse_numeric_id_rejects_garbage() {
        assert_eq!(RecordId::parse("abc", KeyKind::Numeric), None);
        assert_eq!(RecordId::parse("4.2", KeyKind::Numeric), None);
        assert_eq!(RecordId::parse("", KeyKind::Numeric), None);
    }

    #[test]
    fn test_parse_opaque_id_accepts_any_token() {
        assert_eq!(
            RecordId::parse("aZ3kP9", KeyKind::Opaque),
            Some(RecordId::Opaque("aZ3kP9".to_string()))
        );
        assert_eq!(
            RecordId::parse("17", KeyKind::Opaque),
            Some(RecordId::Opaque("17".to_string()))
        );
        assert_eq!(RecordId::parse("", KeyKind::Opaque), None);
    }

    #[test]
    fn test_record_id_display() {
        assert_eq!(RecordId::Numeric(7).to_string(), "7");
        assert_eq!(RecordId::Opaque("xyz".to_string()).to_string(), "xyz");
    }

    #[test]
    fn test_record_id_accessors() {
        let numeric = RecordId::Numeric(3);
        assert_eq!(numeric.kind(), KeyKind::Numeric);
        assert_eq!(numeric.as_numeric(), Some(3));
        assert_eq!(numeric.as_opaque(), None);

        let opaque = RecordId::Opaque("k".to_string());
        assert_eq!(opaque.kind(), KeyKind::Opaque);
        assert_eq!(opaque.as_numeric(), None);
        assert_eq!(opaque.as_opaque(), Some("k"));
    }

    #[test]
    fn test_walk_deserializes_camel_case() {
        let json = r#"{
            "userId": "u1",
            "startTime": "2024-01-01T00:00:00Z",
            "endTime": "",
            "distanceMeters": 5.0,
            "polyline": [1.1, 2.2],
            "duration": 600
        }"#;
        let walk: Walk = serde_json::from_str(json).unwrap();

        assert_eq!(walk.id, None);
        assert_eq!(walk.user_id, "u1");
        assert_eq!(walk.start_time.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(walk.end_time, None);
        assert_eq!(walk.distance_meters, Some(5.0));
        assert_eq!(walk.polyline, Some(vec![1.1, 2.2]));
        assert_eq!(walk.duration, Some(600));
    }

    #[test]
    fn test_user_serializes_without_missing_id() {
        let user = User::new("Ana", "ana@example.com");
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("id").is_none());
        assert_eq!(json["name"], "Ana");
        assert_eq!(json["email"], "ana@example.com");
    }
}
