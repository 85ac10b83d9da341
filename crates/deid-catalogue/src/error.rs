use deid_model::ModelError;
use thiserror::Error;

/// Failure to obtain a usable catalogue. Always fatal for a run.
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("catalogue request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("catalogue endpoint {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not read catalogue file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalogue JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid catalogue: {0}")]
    Invalid(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, CatalogueError>;
