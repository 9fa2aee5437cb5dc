//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and storage records.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use walktrack_core::records::{polyline, RecordId, UserRecord, WalkRecord};
use walktrack_core::storage::RepositoryError;

use super::keys;

// ============================================================================
// Entity type constants
// ============================================================================

pub const ENTITY_TYPE_USER: &str = "USER";
pub const ENTITY_TYPE_WALK: &str = "WALK";

// ============================================================================
// User conversions
// ============================================================================

/// Convert a UserRecord to a DynamoDB item stored under `id`.
pub fn user_to_item(id: &str, user: &UserRecord) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    // Keys
    item.insert("PK".to_string(), AttributeValue::S(keys::user_pk(id)));
    item.insert("SK".to_string(), AttributeValue::S(keys::user_sk(id)));

    // Entity type
    item.insert(
        "entityType".to_string(),
        AttributeValue::S(ENTITY_TYPE_USER.to_string()),
    );

    // Data
    item.insert("id".to_string(), AttributeValue::S(id.to_string()));
    item.insert("name".to_string(), AttributeValue::S(user.name.clone()));
    item.insert("email".to_string(), AttributeValue::S(user.email.clone()));

    item
}

/// Convert a DynamoDB item to a UserRecord.
pub fn item_to_user(item: &HashMap<String, AttributeValue>) -> Result<UserRecord, RepositoryError> {
    Ok(UserRecord {
        id: Some(RecordId::Opaque(get_string(item, "id")?)),
        name: get_string(item, "name")?,
        email: get_string(item, "email")?,
    })
}

// ============================================================================
// Walk conversions
// ============================================================================

/// Convert a WalkRecord to a DynamoDB item stored under `id`.
///
/// The coordinate text is stored as a native number list.
pub fn walk_to_item(id: &str, walk: &WalkRecord) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    // Keys
    item.insert("PK".to_string(), AttributeValue::S(keys::walk_pk(id)));
    item.insert("SK".to_string(), AttributeValue::S(keys::walk_sk(id)));
    item.insert(
        "GSI1PK".to_string(),
        AttributeValue::S(keys::walk_gsi1_pk(&walk.user_id)),
    );
    item.insert(
        "GSI1SK".to_string(),
        AttributeValue::S(keys::walk_gsi1_sk(&walk.start_time, id)),
    );

    // Entity type
    item.insert(
        "entityType".to_string(),
        AttributeValue::S(ENTITY_TYPE_WALK.to_string()),
    );

    // Data
    item.insert("id".to_string(), AttributeValue::S(id.to_string()));
    item.insert("userId".to_string(), AttributeValue::S(walk.user_id.clone()));
    item.insert(
        "startTime".to_string(),
        AttributeValue::S(walk.start_time.to_rfc3339()),
    );
    if let Some(end_time) = &walk.end_time {
        item.insert("endTime".to_string(), AttributeValue::S(end_time.to_rfc3339()));
    }
    item.insert(
        "distanceMeters".to_string(),
        AttributeValue::N(walk.distance_meters.to_string()),
    );
    if let Some(values) = polyline::decode(walk.polyline.as_deref()) {
        item.insert(
            "polyline".to_string(),
            AttributeValue::L(
                values
                    .iter()
                    .map(|v| AttributeValue::N(v.to_string()))
                    .collect(),
            ),
        );
    }
    if let Some(duration) = walk.duration_seconds {
        item.insert(
            "duration".to_string(),
            AttributeValue::N(duration.to_string()),
        );
    }

    item
}

/// Convert a DynamoDB item to a WalkRecord.
pub fn item_to_walk(item: &HashMap<String, AttributeValue>) -> Result<WalkRecord, RepositoryError> {
    Ok(WalkRecord {
        id: Some(RecordId::Opaque(get_string(item, "id")?)),
        user_id: get_string(item, "userId")?,
        start_time: get_datetime(item, "startTime")?,
        end_time: get_optional_datetime(item, "endTime")?,
        distance_meters: get_optional_number(item, "distanceMeters")?.unwrap_or(0.0),
        polyline: get_number_list(item, "polyline").map(|values| polyline::encode(&values)),
        duration_seconds: get_optional_number::<u32>(item, "duration")?,
    })
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string attribute.
fn get_string(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional string attribute.
fn get_optional_string(item: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

/// Get a required RFC 3339 timestamp attribute.
fn get_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    parse_datetime(key, &s)
}

/// Get an optional RFC 3339 timestamp attribute.
fn get_optional_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<Option<DateTime<Utc>>, RepositoryError> {
    get_optional_string(item, key)
        .map(|s| parse_datetime(key, &s))
        .transpose()
}

fn parse_datetime(key: &str, s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}

/// Get an optional number attribute.
fn get_optional_number<T: std::str::FromStr>(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<Option<T>, RepositoryError> {
    match item.get(key).and_then(|v| v.as_n().ok()) {
        Some(n) => n
            .parse::<T>()
            .map(Some)
            .map_err(|_| RepositoryError::InvalidData(format!("Invalid number {}: {}", key, n))),
        None => Ok(None),
    }
}

/// Get a number-list attribute, skipping elements that are not numbers.
fn get_number_list(item: &HashMap<String, AttributeValue>, key: &str) -> Option<Vec<f64>> {
    let list = item.get(key).and_then(|v| v.as_l().ok())?;
    Some(
        list.iter()
            .filter_map(|v| v.as_n().ok())
            .filter_map(|n| n.parse::<f64>().ok())
            .collect(),
    )
}
