//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use walktrack_core::records::{KeyKind, RecordId, UserRecord, WalkRecord};
use walktrack_core::storage::{Result, StorageBackend, UserRepository, WalkRepository};

/// In-memory storage backend for testing and local development.
///
/// Uses HashMaps wrapped in `Arc<RwLock<_>>` for thread-safe access and
/// issues numeric keys from per-entity counters. Data is not persisted and
/// will be lost when the repository is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    users: Arc<RwLock<HashMap<i64, UserRecord>>>,
    walks: Arc<RwLock<HashMap<i64, WalkRecord>>>,
    next_user_id: Arc<AtomicI64>,
    next_walk_id: Arc<AtomicI64>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            walks: Arc::new(RwLock::new(HashMap::new())),
            next_user_id: Arc::new(AtomicI64::new(1)),
            next_walk_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl StorageBackend for InMemoryRepository {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn key_kind(&self) -> KeyKind {
        KeyKind::Numeric
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn create_user(&self, user: &mut UserRecord) -> Result<RecordId> {
        let key = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        let id = RecordId::Numeric(key);
        user.id = Some(id.clone());

        self.users.write().await.insert(key, user.clone());
        Ok(id)
    }

    async fn get_user(&self, id: &RecordId) -> Result<Option<UserRecord>> {
        let Some(key) = id.as_numeric() else {
            return Ok(None);
        };
        let users = self.users.read().await;
        Ok(users.get(&key).cloned())
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        let users = self.users.read().await;
        let mut listed: Vec<UserRecord> = users.values().cloned().collect();
        listed.sort_by_key(|u| u.id.as_ref().and_then(RecordId::as_numeric));
        Ok(listed)
    }

    async fn update_user(&self, id: &RecordId, user: &UserRecord) -> Result<bool> {
        let Some(key) = id.as_numeric() else {
            return Ok(false);
        };
        let mut users = self.users.write().await;
        let Some(stored) = users.get_mut(&key) else {
            return Ok(false);
        };
        *stored = UserRecord {
            id: Some(id.clone()),
            ..user.clone()
        };
        Ok(true)
    }

    async fn delete_user(&self, id: &RecordId) -> Result<bool> {
        let Some(key) = id.as_numeric() else {
            return Ok(false);
        };
        Ok(self.users.write().await.remove(&key).is_some())
    }
}

#[async_trait]
impl WalkRepository for InMemoryRepository {
    async fn create_walk(&self, walk: &mut WalkRecord) -> Result<RecordId> {
        let key = self.next_walk_id.fetch_add(1, Ordering::SeqCst);
        let id = RecordId::Numeric(key);
        walk.id = Some(id.clone());

        self.walks.write().await.insert(key, walk.clone());
        Ok(id)
    }

    async fn get_walk(&self, id: &RecordId) -> Result<Option<WalkRecord>> {
        let Some(key) = id.as_numeric() else {
            return Ok(None);
        };
        let walks = self.walks.read().await;
        Ok(walks.get(&key).cloned())
    }

    async fn list_walks_by_user(&self, user_id: &str) -> Result<Vec<WalkRecord>> {
        let walks = self.walks.read().await;
        let mut listed: Vec<WalkRecord> = walks
            .values()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect();
        listed.sort_by_key(|w| w.start_time);
        Ok(listed)
    }

    async fn update_walk(&self, id: &RecordId, walk: &WalkRecord) -> Result<bool> {
        let Some(key) = id.as_numeric() else {
            return Ok(false);
        };
        let mut walks = self.walks.write().await;
        let Some(stored) = walks.get_mut(&key) else {
            return Ok(false);
        };
        *stored = WalkRecord {
            id: Some(id.clone()),
            ..walk.clone()
        };
        Ok(true)
    }

    async fn delete_walk(&self, id: &RecordId) -> Result<bool> {
        let Some(key) = id.as_numeric() else {
            return Ok(false);
        };
        Ok(self.walks.write().await.remove(&key).is_some())
    }
}
