pub mod error;
pub mod health;
pub mod users;
pub mod walks;
