//! DynamoDB key generation functions.
//!
//! Pure functions for generating partition and sort keys following the single-table design.
//! All functions are sync and have no side effects.
//!
//! | Entity | PK             | SK             | GSI1PK          | GSI1SK                     |
//! |--------|----------------|----------------|-----------------|----------------------------|
//! | User   | `USER#<id>`    | `USER#<id>`    |                 |                            |
//! | Walk   | `WALK#<id>`    | `WALK#<id>`    | `USER#<userId>` | `WALK#<startTime>#<id>`    |

use chrono::{DateTime, SecondsFormat, Utc};

// ============================================================================
// Key prefixes
// ============================================================================

pub const USER_PREFIX: &str = "USER#";
pub const WALK_PREFIX: &str = "WALK#";

/// Name of the index that serves per-user walk listings.
pub const GSI1: &str = "GSI1";

// ============================================================================
// User keys
// ============================================================================

/// Generate primary key for a User.
///
/// Pattern: `USER#<user_id>`
pub fn user_pk(user_id: &str) -> String {
    format!("{USER_PREFIX}{user_id}")
}

/// Generate sort key for a User.
///
/// Pattern: `USER#<user_id>` (same as PK for single-item queries)
pub fn user_sk(user_id: &str) -> String {
    format!("{USER_PREFIX}{user_id}")
}

// ============================================================================
// Walk keys
// ============================================================================

/// Generate primary key for a Walk.
///
/// Pattern: `WALK#<walk_id>`
pub fn walk_pk(walk_id: &str) -> String {
    format!("{WALK_PREFIX}{walk_id}")
}

/// Generate sort key for a Walk.
///
/// Pattern: `WALK#<walk_id>`
pub fn walk_sk(walk_id: &str) -> String {
    format!("{WALK_PREFIX}{walk_id}")
}

/// Generate GSI1 partition key for a Walk (owner lookup).
///
/// Pattern: `USER#<user_id>`
///
/// The owner id is used verbatim; it is not required to name a stored user.
pub fn walk_gsi1_pk(user_id: &str) -> String {
    format!("{USER_PREFIX}{user_id}")
}

/// Generate GSI1 sort key for a Walk (start-time ordered lookup).
///
/// Pattern: `WALK#<start_time>#<walk_id>`
///
/// The start time is fixed-width RFC 3339 UTC so keys sort chronologically.
pub fn walk_gsi1_sk(start_time: &DateTime<Utc>, walk_id: &str) -> String {
    format!(
        "{WALK_PREFIX}{}#{walk_id}",
        start_time.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}
