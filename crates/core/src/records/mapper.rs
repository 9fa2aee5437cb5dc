//! Pure conversions between API-facing records and storage records.
//!
//! The current instant is passed in by the caller, so timestamp fallbacks
//! stay deterministic under test.

use chrono::{DateTime, SecondsFormat, Utc};

use super::polyline;
use super::types::{KeyKind, RecordId, User, UserRecord, Walk, WalkRecord};

/// Converts an API user into its storage form for a backend of `kind`.
pub fn user_to_record(user: &User, kind: KeyKind) -> UserRecord {
    UserRecord {
        id: parse_id(user.id.as_deref(), kind),
        name: user.name.clone(),
        email: user.email.clone(),
    }
}

/// Projects a stored user back to its API form.
pub fn record_to_user(record: &UserRecord) -> User {
    User {
        id: record.id.as_ref().map(RecordId::to_string),
        name: record.name.clone(),
        email: record.email.clone(),
    }
}

/// Converts an API walk into its storage form for a backend of `kind`.
///
/// A missing or unparsable start time becomes `now`. An unparsable end time
/// is dropped. A missing distance is zero. An empty polyline is not stored.
pub fn walk_to_record(walk: &Walk, kind: KeyKind, now: DateTime<Utc>) -> WalkRecord {
    WalkRecord {
        id: parse_id(walk.id.as_deref(), kind),
        user_id: walk.user_id.clone(),
        start_time: parse_instant(walk.start_time.as_deref()).unwrap_or(now),
        end_time: parse_instant(walk.end_time.as_deref()),
        distance_meters: walk.distance_meters.unwrap_or(0.0),
        polyline: walk
            .polyline
            .as_deref()
            .filter(|values| !values.is_empty())
            .map(polyline::encode),
        duration_seconds: walk.duration,
    }
}

/// Projects a stored walk back to its API form.
pub fn record_to_walk(record: &WalkRecord) -> Walk {
    Walk {
        id: record.id.as_ref().map(RecordId::to_string),
        user_id: record.user_id.clone(),
        start_time: Some(format_instant(&record.start_time)),
        end_time: record.end_time.as_ref().map(format_instant),
        distance_meters: Some(record.distance_meters),
        polyline: polyline::decode(record.polyline.as_deref()),
        duration: record.duration_seconds,
    }
}

/// Renders an instant as RFC 3339 UTC with a `Z` suffix.
///
/// Fractional seconds are only written when present.
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_instant(text: Option<&str>) -> Option<DateTime<Utc>> {
    let text = text?.trim();
    if text.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_id(raw: Option<&str>, kind: KeyKind) -> Option<RecordId> {
    raw.and_then(|raw| RecordId::parse(raw, kind))
}
