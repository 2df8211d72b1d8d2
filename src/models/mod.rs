pub mod poll;
pub mod records;
pub mod timestamp;
