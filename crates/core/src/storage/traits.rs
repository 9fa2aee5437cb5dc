use async_trait::async_trait;

use crate::records::{KeyKind, RecordId, UserRecord, WalkRecord};

use super::Result;

/// What every storage backend reports about itself.
pub trait StorageBackend: Send + Sync {
    /// Short backend name for logs and health output.
    fn name(&self) -> &'static str;

    /// The identifier shape this backend issues and accepts.
    fn key_kind(&self) -> KeyKind;
}

/// Repository for user records.
///
/// An id of the wrong [`KeyKind`] never matches a record: lookups return
/// `None` and mutations return `false`.
#[async_trait]
pub trait UserRepository: StorageBackend {
    /// Stores a new user under a fresh id.
    ///
    /// Any id already on `user` is ignored. The assigned id is written back
    /// into `user.id` and returned.
    async fn create_user(&self, user: &mut UserRecord) -> Result<RecordId>;

    /// Gets a user by its ID.
    async fn get_user(&self, id: &RecordId) -> Result<Option<UserRecord>>;

    /// Lists every stored user.
    async fn list_users(&self) -> Result<Vec<UserRecord>>;

    /// Replaces the user stored at `id`.
    ///
    /// Returns `false` without writing when nothing is stored there.
    async fn update_user(&self, id: &RecordId, user: &UserRecord) -> Result<bool>;

    /// Deletes a user. Returns `false` when nothing is stored at `id`.
    async fn delete_user(&self, id: &RecordId) -> Result<bool>;
}

/// Repository for walk records.
///
/// Same id rules as [`UserRepository`].
#[async_trait]
pub trait WalkRepository: StorageBackend {
    /// Stores a new walk under a fresh id, written back into `walk.id`.
    async fn create_walk(&self, walk: &mut WalkRecord) -> Result<RecordId>;

    /// Gets a walk by its ID.
    async fn get_walk(&self, id: &RecordId) -> Result<Option<WalkRecord>>;

    /// Lists the walks whose owning user id equals `user_id` exactly.
    ///
    /// Order is unspecified.
    async fn list_walks_by_user(&self, user_id: &str) -> Result<Vec<WalkRecord>>;

    /// Replaces the walk stored at `id`. Returns `false` when absent.
    async fn update_walk(&self, id: &RecordId, walk: &WalkRecord) -> Result<bool>;

    /// Deletes a walk. Returns `false` when nothing is stored at `id`.
    async fn delete_walk(&self, id: &RecordId) -> Result<bool>;
}
