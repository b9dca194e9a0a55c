pub mod ballot;
pub mod poll;
