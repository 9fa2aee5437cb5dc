pub mod records;
pub mod serde;
pub mod storage;
