//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository traits
//! defined in `walktrack_core::storage`. Any compiled-in backend can be
//! selected at startup; see [`crate::config::BackendKind`].
//!
//! # Feature Flags
//!
//! - `sqlite` (default): SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//! - `dynamodb` (default): AWS DynamoDB storage backend using `aws-sdk-dynamodb`
//!
//! The in-memory backend is always available.
//!
//! # Examples
//!
//! Build with SQLite only:
//! ```bash
//! cargo build -p walktrack --no-default-features --features sqlite
//! ```

#[cfg(test)]
mod contract;

pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbRepository;
