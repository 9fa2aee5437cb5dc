//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of the repository traits
//! using `aws-sdk-dynamodb`. Users and walks share one table; `keys` holds
//! the key layout.

mod conversions;
mod error;
mod keys;
mod repository;

pub use repository::DynamoDbRepository;
