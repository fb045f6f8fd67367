pub mod error;
pub mod reader;
pub mod structs;
