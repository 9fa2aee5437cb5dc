mod error;
mod mapper;
pub mod polyline;
mod types;
mod validation;

pub use error::{ValidationError, ValidationErrors};
pub use mapper::{format_instant, record_to_user, record_to_walk, user_to_record, walk_to_record};
pub use types::{KeyKind, RecordId, User, UserRecord, Walk, WalkRecord};
pub use validation::{validate_user, validate_walk};
