mod error;
mod http_mapping;
mod traits;

pub use error::{RepositoryError, Result};
pub use http_mapping::{is_client_error, repository_error_to_status_code};
pub use traits::{StorageBackend, UserRepository, WalkRepository};
