//! Data model for the tiered de-identification pipeline.
//!
//! - **descriptor**: per-table column treatments and the catalogue holding them
//! - **location**: storage tiers and table addressing
//! - **config**: the process-wide configuration object
//! - **outcome**: per-table results and the run summary

pub mod config;
pub mod descriptor;
pub mod error;
pub mod location;
pub mod outcome;

pub use config::{
    CatalogueSource, DEFAULT_FILE_EXTENSION, HashingConfig, PipelineConfig, REDACTED_VALUE,
    StorageConfig, TierContainers,
};
pub use descriptor::{Catalogue, TableDescriptor};
pub use error::{ConfigError, ModelError, Result};
pub use location::{TableLocation, Tier, raw_file_name};
pub use outcome::{
    FailureStage, PublishReport, RunSummary, SkipReason, TableFailure, TableOutcome, TableResult,
    TableStatus, TierArtifact, TierOutcome,
};
