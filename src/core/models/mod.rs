pub mod ballot;
pub mod common;
pub mod poll;
pub mod voter;
