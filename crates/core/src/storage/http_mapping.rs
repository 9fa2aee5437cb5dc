//! Pure functions for mapping repository errors to HTTP status codes.
//!
//! Follows the Functional Core pattern: no I/O, so the server's error
//! responses can be checked without a running backend.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `AlreadyExists` -> 409 (Conflict)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `QueryFailed` -> 500 (Internal Server Error)
/// - `Serialization` -> 500 (Internal Server Error)
/// - `InvalidData` -> 500 (Internal Server Error)
///
/// `InvalidData` is raised when a stored record cannot be read back, which
/// is a server-side fault rather than a bad request.
///
/// # Examples
///
/// ```
/// use walktrack_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::NotFound {
///     entity_type: "Walk",
///     id: "17".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_)
        | RepositoryError::Serialization(_)
        | RepositoryError::InvalidData(_) => 500,
    }
}

/// Whether the error is the caller's fault (4xx) rather than the store's.
pub fn is_client_error(error: &RepositoryError) -> bool {
    (400..500).contains(&repository_error_to_status_code(error))
}
