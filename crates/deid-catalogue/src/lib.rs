//! Catalogue providers.
//!
//! The catalogue is a JSON object mapping table names to descriptors. It is
//! fetched once per run, parsed in document order, and validated before any
//! table is processed.

pub mod error;
pub mod file;
pub mod http;
pub mod parse;
pub mod provider;

pub use error::{CatalogueError, Result};
pub use file::FileCatalogue;
pub use http::HttpCatalogue;
pub use parse::parse_catalogue;
pub use provider::{CatalogueProvider, provider_for};
