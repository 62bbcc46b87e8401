//! I/O module
//!
//! Handles the flat-file persistence of products and users.
//!
//! # Components
//!
//! - `record_format` - Line format handling (record encoding and decoding)
//! - `file_store` - Append, scan, bulk load and delete-by-rewrite over one file

pub mod file_store;
pub mod record_format;

pub use file_store::{FileStore, LoadedRecords, SkippedLine};
pub use record_format::{decode_line, Record};
