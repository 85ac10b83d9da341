//! Catalogue served over HTTP.

use std::time::Duration;

use deid_model::Catalogue;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use tracing::{debug, info};

use crate::error::{CatalogueError, Result};
use crate::parse::parse_catalogue;
use crate::provider::CatalogueProvider;

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for a catalogue endpoint returning the whole catalogue as JSON.
pub struct HttpCatalogue {
    client: Client,
    url: String,
}

impl HttpCatalogue {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| CatalogueError::Request {
                url: url.clone(),
                source,
            })?;
        Ok(Self { client, url })
    }
}

impl CatalogueProvider for HttpCatalogue {
    fn fetch(&self) -> Result<Catalogue> {
        debug!(url = %self.url, "fetching catalogue");
        let request_error = |source: reqwest::Error| CatalogueError::Request {
            url: self.url.clone(),
            source,
        };

        let response = self
            .client
            .get(&self.url)
            .header(USER_AGENT, concat!("deid-pipeline/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
            .send()
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(CatalogueError::Status {
                url: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().map_err(request_error)?;
        let catalogue = parse_catalogue(&body)?;
        info!(url = %self.url, tables = catalogue.len(), "fetched catalogue");
        Ok(catalogue)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
