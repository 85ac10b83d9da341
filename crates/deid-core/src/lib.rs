//! De-identification and tiered publication.
//!
//! - **publisher**: per-table transform chain and the two guarded writes
//! - **driver**: best-effort loop over the catalogue
//! - **error**: per-table and run-level errors

pub mod driver;
pub mod error;
pub mod publisher;

pub use driver::{PipelineDriver, RunOptions, run_pipeline};
pub use error::{PipelineError, PublishError};
pub use publisher::{TierPublisher, deidentify};
