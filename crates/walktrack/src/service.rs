//! Record service: the imperative shell around the storage backends.
//!
//! Validates API records, maps them to storage form, calls the active
//! backend and maps results back. "Not found" is a value here
//! (`None`/`false`); handlers decide how to report it.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use walktrack_core::records::{
    record_to_user, record_to_walk, user_to_record, validate_user, validate_walk, walk_to_record,
    KeyKind, RecordId, User, ValidationErrors, Walk,
};
use walktrack_core::storage::{RepositoryError, UserRepository, WalkRepository};

/// Errors surfaced by [`RecordService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Clone)]
pub struct RecordService {
    users: Arc<dyn UserRepository>,
    walks: Arc<dyn WalkRepository>,
}

impl RecordService {
    pub fn new(users: Arc<dyn UserRepository>, walks: Arc<dyn WalkRepository>) -> Self {
        Self { users, walks }
    }

    /// Name of the backend serving requests.
    pub fn backend_name(&self) -> &'static str {
        self.users.name()
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn create_user(&self, user: &User) -> Result<User> {
        validate_user(user)?;

        let mut record = user_to_record(user, self.users.key_kind());
        let id = self.users.create_user(&mut record).await?;
        tracing::info!(user_id = %id, "Created user");

        Ok(record_to_user(&record))
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        let Some(id) = self.user_id(id) else {
            return Ok(None);
        };

        let record = self.users.get_user(&id).await?;
        Ok(record.as_ref().map(record_to_user))
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let records = self.users.list_users().await?;
        Ok(records.iter().map(record_to_user).collect())
    }

    /// Replaces the user at `id`. `None` when no such user exists.
    pub async fn update_user(&self, id: &str, user: &User) -> Result<Option<User>> {
        validate_user(user)?;

        let Some(id) = self.user_id(id) else {
            return Ok(None);
        };

        let mut record = user_to_record(user, self.users.key_kind());
        record.id = Some(id.clone());

        if !self.users.update_user(&id, &record).await? {
            tracing::warn!(user_id = %id, "Update skipped, user not found");
            return Ok(None);
        }
        tracing::info!(user_id = %id, "Updated user");

        Ok(Some(record_to_user(&record)))
    }

    /// Deletes the user at `id`. `false` when no such user exists.
    pub async fn delete_user(&self, id: &str) -> Result<bool> {
        let Some(id) = self.user_id(id) else {
            return Ok(false);
        };

        let deleted = self.users.delete_user(&id).await?;
        if deleted {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(deleted)
    }

    // ========================================================================
    // Walks
    // ========================================================================

    pub async fn create_walk(&self, walk: &Walk) -> Result<Walk> {
        validate_walk(walk)?;

        let mut record = walk_to_record(walk, self.walks.key_kind(), Utc::now());
        let id = self.walks.create_walk(&mut record).await?;
        tracing::info!(walk_id = %id, user_id = %record.user_id, "Created walk");

        Ok(record_to_walk(&record))
    }

    pub async fn get_walk(&self, id: &str) -> Result<Option<Walk>> {
        let Some(id) = self.walk_id(id) else {
            return Ok(None);
        };

        let record = self.walks.get_walk(&id).await?;
        Ok(record.as_ref().map(record_to_walk))
    }

    pub async fn list_walks_by_user(&self, user_id: &str) -> Result<Vec<Walk>> {
        let records = self.walks.list_walks_by_user(user_id).await?;
        Ok(records.iter().map(record_to_walk).collect())
    }

    /// Replaces the walk at `id`. `None` when no such walk exists.
    pub async fn update_walk(&self, id: &str, walk: &Walk) -> Result<Option<Walk>> {
        validate_walk(walk)?;

        let Some(id) = self.walk_id(id) else {
            return Ok(None);
        };

        let mut record = walk_to_record(walk, self.walks.key_kind(), Utc::now());
        record.id = Some(id.clone());

        if !self.walks.update_walk(&id, &record).await? {
            tracing::warn!(walk_id = %id, "Update skipped, walk not found");
            return Ok(None);
        }
        tracing::info!(walk_id = %id, "Updated walk");

        Ok(Some(record_to_walk(&record)))
    }

    /// Deletes the walk at `id`. `false` when no such walk exists.
    pub async fn delete_walk(&self, id: &str) -> Result<bool> {
        let Some(id) = self.walk_id(id) else {
            return Ok(false);
        };

        let deleted = self.walks.delete_walk(&id).await?;
        if deleted {
            tracing::info!(walk_id = %id, "Deleted walk");
        }
        Ok(deleted)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn user_id(&self, raw: &str) -> Option<RecordId> {
        parse_id(raw, self.users.key_kind())
    }

    fn walk_id(&self, raw: &str) -> Option<RecordId> {
        parse_id(raw, self.walks.key_kind())
    }
}

fn parse_id(raw: &str, kind: KeyKind) -> Option<RecordId> {
    let id = RecordId::parse(raw, kind);
    if id.is_none() {
        tracing::debug!(id = raw, "Identifier does not fit the backend key type");
    }
    id
}
