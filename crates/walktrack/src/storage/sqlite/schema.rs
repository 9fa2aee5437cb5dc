//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE
);

-- Walks table (user_id is not a foreign key: walks may reference unknown users)
CREATE TABLE IF NOT EXISTS walks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    start_time TEXT NOT NULL,
    end_time TEXT,
    distance_meters REAL NOT NULL DEFAULT 0,
    polyline_json TEXT,
    duration INTEGER
);

CREATE INDEX IF NOT EXISTS idx_walks_user_id ON walks(user_id);
"#;

// User queries
pub const INSERT_USER: &str = r#"
INSERT INTO users (name, email)
VALUES (?1, ?2)
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, name, email
FROM users
WHERE id = ?1
"#;

pub const SELECT_ALL_USERS: &str = r#"
SELECT id, name, email
FROM users
ORDER BY id ASC
"#;

pub const UPDATE_USER: &str = r#"
UPDATE users
SET name = ?2, email = ?3
WHERE id = ?1
"#;

pub const DELETE_USER: &str = r#"
DELETE FROM users
WHERE id = ?1
"#;

// Walk queries
pub const INSERT_WALK: &str = r#"
INSERT INTO walks (user_id, start_time, end_time, distance_meters, polyline_json, duration)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

pub const SELECT_WALK_BY_ID: &str = r#"
SELECT id, user_id, start_time, end_time, distance_meters, polyline_json, duration
FROM walks
WHERE id = ?1
"#;

pub const SELECT_WALKS_BY_USER: &str = r#"
SELECT id, user_id, start_time, end_time, distance_meters, polyline_json, duration
FROM walks
WHERE user_id = ?1
ORDER BY start_time ASC
"#;

pub const UPDATE_WALK: &str = r#"
UPDATE walks
SET user_id = ?2, start_time = ?3, end_time = ?4, distance_meters = ?5, polyline_json = ?6, duration = ?7
WHERE id = ?1
"#;

pub const DELETE_WALK: &str = r#"
DELETE FROM walks
WHERE id = ?1
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_valid_sql() {
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS users"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS walks"));
        assert!(CREATE_TABLES.contains("idx_walks_user_id"));
    }

    #[test]
    fn test_queries_contain_expected_keywords() {
        assert!(INSERT_USER.contains("INSERT"));
        assert!(SELECT_USER_BY_ID.contains("WHERE id = ?1"));
        assert!(SELECT_ALL_USERS.contains("SELECT"));
        assert!(UPDATE_USER.contains("UPDATE"));
        assert!(DELETE_USER.contains("DELETE"));

        assert!(INSERT_WALK.contains("INSERT"));
        assert!(SELECT_WALK_BY_ID.contains("SELECT"));
        assert!(SELECT_WALKS_BY_USER.contains("user_id = ?1"));
        assert!(UPDATE_WALK.contains("UPDATE"));
        assert!(DELETE_WALK.contains("DELETE"));
    }
}
