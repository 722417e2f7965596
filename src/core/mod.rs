pub mod duration;
pub mod timestamp;
pub mod token;
