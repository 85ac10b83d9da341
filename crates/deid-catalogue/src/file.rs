use std::fs;
use std::path::PathBuf;

use deid_model::Catalogue;
use tracing::info;

use crate::error::{CatalogueError, Result};
use crate::parse::parse_catalogue;
use crate::provider::CatalogueProvider;

/// Catalogue stored as a local JSON file.
#[derive(Debug, Clone)]
pub struct FileCatalogue {
    path: PathBuf,
}

impl FileCatalogue {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogueProvider for FileCatalogue {
    fn fetch(&self) -> Result<Catalogue> {
        let json = fs::read_to_string(&self.path).map_err(|source| CatalogueError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        let catalogue = parse_catalogue(&json)?;
        info!(path = %self.path.display(), tables = catalogue.len(), "loaded catalogue");
        Ok(catalogue)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
