//! Application state with repository-based storage.
//!
//! The backend is chosen once at startup from [`Config`]; handlers only see
//! the [`RecordService`] wrapping it.

use std::sync::Arc;

use walktrack_core::storage::{UserRepository, WalkRepository};

use crate::config::{BackendKind, Config};
use crate::service::RecordService;
use crate::storage::InMemoryRepository;

/// Shared application state, cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    pub service: RecordService,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepository>, walks: Arc<dyn WalkRepository>) -> Self {
        Self {
            service: RecordService::new(users, walks),
        }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        let repo = Arc::new(InMemoryRepository::new());
        Self::new(repo.clone(), repo)
    }

    /// Build the state for the backend named in `config`.
    ///
    /// Fails when the backend's Cargo feature is compiled out or the store
    /// cannot be opened.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let state = match config.backend {
            BackendKind::Memory => Self::in_memory(),
            BackendKind::Sqlite => Self::sqlite(config).await?,
            BackendKind::DynamoDb => Self::dynamodb(config).await?,
        };

        tracing::info!(backend = state.backend_name(), "Storage backend ready");
        Ok(state)
    }

    /// Name of the active storage backend.
    pub fn backend_name(&self) -> &'static str {
        self.service.backend_name()
    }

    #[cfg(feature = "sqlite")]
    async fn sqlite(config: &Config) -> anyhow::Result<Self> {
        use crate::storage::SqliteRepository;

        tracing::info!(path = %config.sqlite_path, "Opening SQLite database");
        let repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
        Ok(Self::new(repo.clone(), repo))
    }

    #[cfg(not(feature = "sqlite"))]
    async fn sqlite(_config: &Config) -> anyhow::Result<Self> {
        anyhow::bail!("SQLite backend requested but the 'sqlite' feature is not enabled")
    }

    #[cfg(feature = "dynamodb")]
    async fn dynamodb(config: &Config) -> anyhow::Result<Self> {
        use crate::storage::DynamoDbRepository;

        tracing::info!(
            table = %config.dynamodb_table_name,
            endpoint = ?config.dynamodb_endpoint_url,
            "Connecting to DynamoDB"
        );
        let repo = Arc::new(
            DynamoDbRepository::from_env(
                &config.dynamodb_table_name,
                config.dynamodb_endpoint_url.as_deref(),
            )
            .await?,
        );
        Ok(Self::new(repo.clone(), repo))
    }

    #[cfg(not(feature = "dynamodb"))]
    async fn dynamodb(_config: &Config) -> anyhow::Result<Self> {
        anyhow::bail!("DynamoDB backend requested but the 'dynamodb' feature is not enabled")
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::in_memory()
    }
}
