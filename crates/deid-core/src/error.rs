use deid_catalogue::CatalogueError;
use deid_model::{ConfigError, FailureStage, ModelError, TableFailure};
use deid_storage::StorageError;
use deid_transform::TransformError;
use thiserror::Error;

/// Failure scoped to a single table.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("could not read raw table: {0}")]
    Read(#[source] StorageError),
    #[error("{0}")]
    Transform(#[from] TransformError),
    #[error("could not write intermediate tier: {0}")]
    WriteIntermediate(#[source] StorageError),
    #[error("could not write final tier: {0}")]
    WriteFinal(#[source] StorageError),
}

impl PublishError {
    pub fn stage(&self) -> FailureStage {
        match self {
            Self::Read(_) => FailureStage::Read,
            Self::Transform(_) => FailureStage::Transform,
            Self::WriteIntermediate(_) => FailureStage::WriteIntermediate,
            Self::WriteFinal(_) => FailureStage::WriteFinal,
        }
    }

    pub fn to_failure(&self) -> TableFailure {
        TableFailure {
            stage: self.stage(),
            message: self.to_string(),
        }
    }
}

/// Failure that stops the whole run before any table is processed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("catalogue error: {0}")]
    Catalogue(#[from] CatalogueError),
    #[error("table selection error: {0}")]
    Selection(#[from] ModelError),
}
