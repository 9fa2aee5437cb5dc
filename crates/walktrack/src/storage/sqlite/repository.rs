//! SQLite repository implementation.
//!
//! Implements the repository traits from `walktrack_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use walktrack_core::records::{KeyKind, RecordId, UserRecord, WalkRecord};
use walktrack_core::storage::{
    RepositoryError, Result, StorageBackend, UserRepository, WalkRepository,
};

use super::conversions::{format_datetime, row_to_user, row_to_walk};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// Issues numeric keys from `INTEGER PRIMARY KEY AUTOINCREMENT` columns.
#[derive(Clone)]
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    /// Runs a single-row `DELETE` and reports whether a row was removed.
    async fn delete_row(&self, sql: &'static str, id: i64, entity_type: &'static str) -> Result<bool> {
        self.conn
            .call(move |conn| {
                let rows = conn.execute(sql, [id]).map_err(wrap_err)?;
                Ok(rows > 0)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, entity_type, id.to_string()))
    }
}

impl StorageBackend for SqliteRepository {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn key_kind(&self) -> KeyKind {
        KeyKind::Numeric
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn create_user(&self, user: &mut UserRecord) -> Result<RecordId> {
        let name = user.name.clone();
        let email = user.email.clone();
        let key = user.email.clone();

        let id = self
            .conn
            .call(move |conn| {
                conn.execute(schema::INSERT_USER, rusqlite::params![name, email])
                    .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", key))?;

        let id = RecordId::Numeric(id);
        user.id = Some(id.clone());
        Ok(id)
    }

    async fn get_user(&self, id: &RecordId) -> Result<Option<UserRecord>> {
        let Some(id) = id.as_numeric() else {
            return Ok(None);
        };

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_USER_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([id], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", id.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_ALL_USERS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_user).map_err(wrap_err)?;

                let mut users = Vec::new();
                for row_result in rows {
                    users.push(row_result.map_err(wrap_err)?);
                }
                Ok(users)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", "*"))
    }

    async fn update_user(&self, id: &RecordId, user: &UserRecord) -> Result<bool> {
        let Some(id) = id.as_numeric() else {
            return Ok(false);
        };
        let name = user.name.clone();
        let email = user.email.clone();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::UPDATE_USER, rusqlite::params![id, name, email])
                    .map_err(wrap_err)?;
                Ok(rows > 0)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", id.to_string()))
    }

    async fn delete_user(&self, id: &RecordId) -> Result<bool> {
        match id.as_numeric() {
            Some(id) => self.delete_row(schema::DELETE_USER, id, "User").await,
            None => Ok(false),
        }
    }
}

// ============================================================================
// WalkRepository implementation
// ============================================================================

#[async_trait]
impl WalkRepository for SqliteRepository {
    async fn create_walk(&self, walk: &mut WalkRecord) -> Result<RecordId> {
        let user_id = walk.user_id.clone();
        let start_time = format_datetime(&walk.start_time);
        let end_time = walk.end_time.as_ref().map(format_datetime);
        let distance_meters = walk.distance_meters;
        let polyline = walk.polyline.clone();
        let duration = walk.duration_seconds;

        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_WALK,
                    rusqlite::params![
                        user_id,
                        start_time,
                        end_time,
                        distance_meters,
                        polyline,
                        duration
                    ],
                )
                .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Walk", "new"))?;

        let id = RecordId::Numeric(id);
        walk.id = Some(id.clone());
        Ok(id)
    }

    async fn get_walk(&self, id: &RecordId) -> Result<Option<WalkRecord>> {
        let Some(id) = id.as_numeric() else {
            return Ok(None);
        };

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_WALK_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([id], row_to_walk) {
                    Ok(walk) => Ok(Some(walk)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Walk", id.to_string()))
    }

    async fn list_walks_by_user(&self, user_id: &str) -> Result<Vec<WalkRecord>> {
        let user_id = user_id.to_string();
        let key = user_id.clone();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_WALKS_BY_USER)
                    .map_err(wrap_err)?;
                let rows = stmt.query_map([&user_id], row_to_walk).map_err(wrap_err)?;

                let mut walks = Vec::new();
                for row_result in rows {
                    walks.push(row_result.map_err(wrap_err)?);
                }
                Ok(walks)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Walk", format!("user {key}")))
    }

    async fn update_walk(&self, id: &RecordId, walk: &WalkRecord) -> Result<bool> {
        let Some(id) = id.as_numeric() else {
            return Ok(false);
        };
        let user_id = walk.user_id.clone();
        let start_time = format_datetime(&walk.start_time);
        let end_time = walk.end_time.as_ref().map(format_datetime);
        let distance_meters = walk.distance_meters;
        let polyline = walk.polyline.clone();
        let duration = walk.duration_seconds;

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_WALK,
                        rusqlite::params![
                            id,
                            user_id,
                            start_time,
                            end_time,
                            distance_meters,
                            polyline,
                            duration
                        ],
                    )
                    .map_err(wrap_err)?;
                Ok(rows > 0)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Walk", id.to_string()))
    }

    async fn delete_walk(&self, id: &RecordId) -> Result<bool> {
        match id.as_numeric() {
            Some(id) => self.delete_row(schema::DELETE_WALK, id, "Walk").await,
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::contract;

    async fn repo() -> SqliteRepository {
        SqliteRepository::new_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_contract_user_lifecycle() {
        contract::user_lifecycle(&repo().await).await;
    }

    #[tokio::test]
    async fn test_contract_update_missing_user_writes_nothing() {
        contract::update_missing_user_writes_nothing(&repo().await).await;
    }

    #[tokio::test]
    async fn test_contract_create_ignores_preset_id() {
        contract::create_ignores_preset_id(&repo().await).await;
    }

    #[tokio::test]
    async fn test_contract_walk_lifecycle() {
        contract::walk_lifecycle(&repo().await).await;
    }

    #[tokio::test]
    async fn test_contract_list_walks_by_user_is_exact() {
        contract::list_walks_by_user_is_exact(&repo().await).await;
    }

    #[tokio::test]
    async fn test_contract_update_missing_walk_writes_nothing() {
        contract::update_missing_walk_writes_nothing(&repo().await).await;
    }

    #[tokio::test]
    async fn test_contract_foreign_ids_are_not_found() {
        contract::foreign_ids_are_not_found(&repo().await).await;
    }

    #[tokio::test]
    async fn test_duplicate_email_is_already_exists() {
        let repo = repo().await;
        let mut first = contract::user_record("Ana", "ana@example.com");
        let mut second = contract::user_record("Ana Two", "ana@example.com");

        repo.create_user(&mut first).await.unwrap();
        let err = repo.create_user(&mut second).await.unwrap_err();

        assert_eq!(
            err,
            RepositoryError::AlreadyExists {
                entity_type: "User",
                id: "ana@example.com".to_string(),
            }
        );
        assert_eq!(second.id, None);
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let repo = repo().await;
        let mut a = contract::user_record("Ana", "ana@example.com");
        let mut b = contract::user_record("Bea", "bea@example.com");

        let first = repo.create_user(&mut a).await.unwrap();
        let second = repo.create_user(&mut b).await.unwrap();

        assert!(second.as_numeric().unwrap() > first.as_numeric().unwrap());
    }

    #[tokio::test]
    async fn test_deleted_ids_are_not_reused() {
        let repo = repo().await;
        let mut a = contract::user_record("Ana", "ana@example.com");
        let first = repo.create_user(&mut a).await.unwrap();
        repo.delete_user(&first).await.unwrap();

        let mut b = contract::user_record("Bea", "bea@example.com");
        let second = repo.create_user(&mut b).await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_file_database_persists_across_connections() {
        let path = std::env::temp_dir().join(format!(
            "walktrack-test-{}-{}.db",
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        let path_str = path.to_string_lossy().to_string();

        let id = {
            let repo = SqliteRepository::new(&path_str).await.unwrap();
            let mut user = contract::user_record("Ana", "ana@example.com");
            repo.create_user(&mut user).await.unwrap()
        };

        let reopened = SqliteRepository::new(&path_str).await.unwrap();
        let user = reopened.get_user(&id).await.unwrap();
        assert_eq!(user.map(|u| u.name), Some("Ana".to_string()));

        drop(reopened);
        let _ = std::fs::remove_file(&path);
    }
}
