//! SQLite storage backend implementation.
//!
//! This module provides a SQLite-based implementation of the repository traits
//! using `rusqlite` for synchronous operations and `tokio-rusqlite` for async wrapping.
//! Walk coordinates are kept in their bracketed text form in `polyline_json`.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
