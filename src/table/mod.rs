//! Delimited-text input and output.
//!
//! The reader turns an uploaded CSV export into a [`RawTable`](crate::models::RawTable);
//! the writers render the violation and summary tables for download.

mod reader;
mod writer;

pub use reader::read_table;
pub use writer::{VIOLATION_HEADERS, write_summary, write_violations};
