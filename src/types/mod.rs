pub mod errors;
pub mod records;
pub mod timestamp;
