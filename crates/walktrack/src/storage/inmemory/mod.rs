//! In-memory storage backend.
//!
//! Stores all records in HashMaps wrapped in `Arc<RwLock<_>>`. Selected with
//! `STORAGE_BACKEND=memory`, and used by the handler tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use walktrack::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
