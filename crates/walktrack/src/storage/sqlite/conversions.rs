//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and storage records.
//! These are testable in isolation without database access.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;
use walktrack_core::records::{RecordId, UserRecord, WalkRecord};

// ============================================================================
// User conversions
// ============================================================================

/// Convert a SQLite row to a UserRecord.
///
/// Expected columns: id, name, email
pub fn row_to_user(row: &Row) -> rusqlite::Result<UserRecord> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let email: String = row.get(2)?;

    Ok(UserRecord {
        id: Some(RecordId::Numeric(id)),
        name,
        email,
    })
}

// ============================================================================
// Walk conversions
// ============================================================================

/// Convert a SQLite row to a WalkRecord.
///
/// Expected columns: id, user_id, start_time, end_time, distance_meters, polyline_json, duration
pub fn row_to_walk(row: &Row) -> rusqlite::Result<WalkRecord> {
    let id: i64 = row.get(0)?;
    let user_id: String = row.get(1)?;
    let start_time: String = row.get(2)?;
    let end_time: Option<String> = row.get(3)?;
    let distance_meters: f64 = row.get(4)?;
    let polyline: Option<String> = row.get(5)?;
    let duration_seconds: Option<u32> = row.get(6)?;

    Ok(WalkRecord {
        id: Some(RecordId::Numeric(id)),
        user_id,
        start_time: parse_datetime(2, &start_time)?,
        end_time: end_time
            .as_deref()
            .map(|s| parse_datetime(3, s))
            .transpose()?,
        distance_meters,
        polyline,
        duration_seconds,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Parse an RFC 3339 column into a UTC instant.
fn parse_datetime(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

/// Format an instant for SQLite storage.
///
/// Fixed-width UTC text, so `ORDER BY start_time` sorts chronologically.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}
