use deid_model::{Catalogue, CatalogueSource};

use crate::error::Result;
use crate::file::FileCatalogue;
use crate::http::HttpCatalogue;

/// Source of table descriptors.
pub trait CatalogueProvider {
    /// Fetch and validate the whole catalogue.
    fn fetch(&self) -> Result<Catalogue>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// Build the provider configured by `source`.
pub fn provider_for(source: &CatalogueSource) -> Result<Box<dyn CatalogueProvider>> {
    Ok(match source {
        CatalogueSource::Url(url) => Box::new(HttpCatalogue::new(url.clone())?),
        CatalogueSource::File(path) => Box::new(FileCatalogue::new(path.clone())),
    })
}
