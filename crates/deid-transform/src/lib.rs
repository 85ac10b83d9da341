//! Column transforms for de-identification.
//!
//! Every transform takes a frame by reference and returns a new frame; the
//! input is never modified.
//!
//! - **hashing**: salted SHA-256 replacement of identifier columns
//! - **truncate**: temporal precision reduction of date/datetime columns
//! - **columns**: column lookup and removal

pub mod columns;
pub mod error;
pub mod hashing;
pub mod truncate;

pub use columns::drop_columns;
pub use error::{Result, TransformError};
pub use hashing::{DIGEST_HEX_LEN, hash_identifier_columns, salted_digest};
pub use truncate::{TruncationUnit, truncate_datetime_columns};
