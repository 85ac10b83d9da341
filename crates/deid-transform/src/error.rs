use polars::prelude::PolarsError;
use thiserror::Error;

/// Schema-level failures of a column transform.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("column {column} not found (available: {available:?})")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },
    #[error("column {column} has type {dtype}, expected a date or datetime")]
    NotTemporal { column: String, dtype: String },
    #[error("cannot hash {column} into {target}: a column with that name already exists")]
    HashTargetExists { column: String, target: String },
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
