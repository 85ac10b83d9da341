//! Storage backends for the three tiers.
//!
//! The pipeline only talks to [`TableStore`]; a write always replaces the
//! whole table at its location.

pub mod error;
pub mod local;
pub mod memory;
pub mod store;

pub use error::{Result, StorageError};
pub use local::LocalParquetStore;
pub use memory::InMemoryStore;
pub use store::TableStore;
