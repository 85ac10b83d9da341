//! Best-effort loop over the catalogue.
//!
//! Tables are processed one at a time, in catalogue order. A table that
//! fails or is skipped is recorded in the [`RunSummary`] and the loop moves
//! on; only configuration and catalogue errors stop a run.

use std::time::Instant;

use deid_catalogue::CatalogueProvider;
use deid_model::{
    Catalogue, PipelineConfig, RunSummary, TableDescriptor, TableOutcome, TableResult, TableStatus,
    Tier,
};
use deid_storage::TableStore;
use tracing::{info, info_span, warn};

use crate::error::{PipelineError, PublishError};
use crate::publisher::TierPublisher;

/// Options for a single run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Compute tiers without writing them.
    pub dry_run: bool,
    /// Restrict the run to these tables; empty means all.
    pub only: Vec<String>,
}

pub struct PipelineDriver<'a, S: ?Sized> {
    store: &'a S,
    config: &'a PipelineConfig,
    dry_run: bool,
}

impl<'a, S: TableStore + ?Sized> PipelineDriver<'a, S> {
    pub fn new(store: &'a S, config: &'a PipelineConfig) -> Self {
        Self {
            store,
            config,
            dry_run: false,
        }
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Process every table of `catalogue`.
    pub fn run(&self, catalogue: &Catalogue) -> RunSummary {
        let mut summary = RunSummary::start(self.dry_run);
        let publisher = TierPublisher::new(self.store, self.config).with_dry_run(self.dry_run);
        for (table_name, descriptor) in catalogue.iter() {
            summary.record(self.process_table(&publisher, table_name, descriptor));
        }
        summary.finish();
        info!(
            published = summary.count(TableStatus::Published),
            skipped = summary.count(TableStatus::Skipped),
            failed = summary.count(TableStatus::Failed),
            "run complete"
        );
        summary
    }

    fn process_table(
        &self,
        publisher: &TierPublisher<'_, S>,
        table_name: &str,
        descriptor: &TableDescriptor,
    ) -> TableOutcome {
        let raw_location = self.config.storage.location(Tier::Raw, table_name);
        let span = info_span!("table", table = %table_name, file_name = %raw_location.file_name);
        let _guard = span.enter();
        let start = Instant::now();

        let result = self
            .store
            .read_table(&raw_location)
            .map_err(PublishError::Read)
            .and_then(|raw| publisher.publish(table_name, descriptor, &raw));

        let result = match result {
            Ok(report) => {
                info!(
                    rows = report.rows,
                    intermediate = %report.intermediate,
                    final_tier = %report.final_tier,
                    duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
                    "table processed"
                );
                TableResult::Processed(report)
            }
            Err(error) => {
                warn!(stage = %error.stage(), error = %error, "table failed");
                TableResult::Failed(error.to_failure())
            }
        };
        TableOutcome {
            table_name: table_name.to_string(),
            file_name: raw_location.file_name,
            result,
        }
    }
}

/// Validate `config`, fetch the catalogue and process it.
///
/// # Errors
///
/// Only run-level failures are returned; per-table failures are part of the
/// summary.
pub fn run_pipeline<S: TableStore + ?Sized>(
    config: &PipelineConfig,
    provider: &dyn CatalogueProvider,
    store: &S,
    options: &RunOptions,
) -> Result<RunSummary, PipelineError> {
    let span = info_span!("run", dry_run = options.dry_run);
    let _guard = span.enter();

    config.validate()?;
    info!(source = %provider.describe(), "fetching catalogue");
    let mut catalogue = provider.fetch()?;
    if !options.only.is_empty() {
        catalogue = catalogue.select(&options.only)?;
    }
    info!(tables = catalogue.len(), "processing catalogue");

    Ok(PipelineDriver::new(store, config)
        .with_dry_run(options.dry_run)
        .run(&catalogue))
}
