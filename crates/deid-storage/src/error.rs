use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is not configured: {0}")]
    Unconfigured(String),
    #[error("no table at {0}")]
    NotFound(String),
    #[error("invalid location {uri}: {reason}")]
    InvalidLocation { uri: String, reason: String },
    #[error("io error at {uri}: {source}")]
    Io {
        uri: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parquet error at {uri}: {source}")]
    Parquet {
        uri: String,
        #[source]
        source: PolarsError,
    },
    #[error("write to {0} was rejected by the store")]
    Rejected(String),
    #[error("{0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;
