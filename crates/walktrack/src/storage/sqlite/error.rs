//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError` from
//! `walktrack_core::storage`. A UNIQUE violation (duplicate email) becomes
//! `AlreadyExists`; everything else is a store fault.

use walktrack_core::storage::RepositoryError;

/// Maps a rusqlite error, naming the offending record by `key`.
///
/// `key` is whatever identifies the record at the call site: the id for
/// reads and writes, the email for user inserts.
fn map_rusqlite_error(err: &rusqlite::Error, entity_type: &'static str, key: &str) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            RepositoryError::AlreadyExists {
                entity_type,
                id: key.to_string(),
            }
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        // A stored row that no longer decodes (bad timestamp, wrong column type)
        rusqlite::Error::FromSqlConversionFailure(..) | rusqlite::Error::InvalidColumnType(..) => {
            RepositoryError::InvalidData(format!("{entity_type} {key}: {err}"))
        }

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a RepositoryError.
///
/// This is the main entry point for error mapping in async code.
pub fn map_tokio_rusqlite_error(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
    key: impl Into<String>,
) -> RepositoryError {
    let key = key.into();
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => {
            map_rusqlite_error(rusqlite_err, entity_type, &key)
        }
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::ffi;

    fn constraint_error(extended_code: i32) -> tokio_rusqlite::Error {
        let sqlite_err = ffi::Error {
            code: rusqlite::ErrorCode::ConstraintViolation,
            extended_code,
        };
        tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(sqlite_err, None))
    }

    #[test]
    fn test_unique_constraint_maps_to_already_exists() {
        let result = map_tokio_rusqlite_error(
            constraint_error(ffi::SQLITE_CONSTRAINT_UNIQUE),
            "User",
            "ana@example.com",
        );

        assert_eq!(
            result,
            RepositoryError::AlreadyExists {
                entity_type: "User",
                id: "ana@example.com".to_string(),
            }
        );
    }

    #[test]
    fn test_other_constraint_maps_to_query_failed() {
        let result = map_tokio_rusqlite_error(
            constraint_error(ffi::SQLITE_CONSTRAINT_NOTNULL),
            "Walk",
            "4",
        );

        assert!(matches!(result, RepositoryError::QueryFailed(_)));
    }

    #[test]
    fn test_conversion_failure_maps_to_invalid_data() {
        let err = tokio_rusqlite::Error::Rusqlite(rusqlite::Error::InvalidColumnType(
            2,
            "start_time".to_string(),
            rusqlite::types::Type::Integer,
        ));

        let result = map_tokio_rusqlite_error(err, "Walk", "9");

        match result {
            RepositoryError::InvalidData(message) => assert!(message.starts_with("Walk 9:")),
            other => panic!("Expected InvalidData, got {other:?}"),
        }
    }

    #[test]
    fn test_closed_connection_maps_to_connection_failed() {
        let result =
            map_tokio_rusqlite_error(tokio_rusqlite::Error::ConnectionClosed, "User", "1");

        assert!(matches!(result, RepositoryError::ConnectionFailed(_)));
    }

    #[test]
    fn test_other_error_maps_to_query_failed() {
        let err = tokio_rusqlite::Error::Other(Box::new(std::io::Error::other("test error")));

        let result = map_tokio_rusqlite_error(err, "User", "1");

        assert!(matches!(result, RepositoryError::QueryFailed(_)));
    }
}
