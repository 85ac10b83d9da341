//! Tier publication for a single table.
//!
//! The chain is:
//! 1. hash client identifier columns
//! 2. drop other identifiable columns
//! 3. truncate event timestamps to the hour
//! 4. truncate birth dates to the month (intermediate candidate)
//! 5. intermediate guard, then write
//! 6. drop free-text columns (final candidate)
//! 7. final guard, then write
//!
//! Both guards look only at the descriptor: a tier is written when at least
//! one documented column survives its drops, whatever the row count.
//!
//! A table that fails the intermediate guard never reaches the final guard;
//! its final tier is reported as [`SkipReason::IntermediateSkipped`]. The
//! final drops are a superset of the intermediate drops, so an empty
//! intermediate set always implies an empty final set.

use deid_model::{
    HashingConfig, PipelineConfig, PublishReport, SkipReason, TableDescriptor, TableLocation,
    Tier, TierArtifact, TierOutcome,
};
use deid_storage::{StorageError, TableStore};
use deid_transform::{
    TruncationUnit, drop_columns, hash_identifier_columns, truncate_datetime_columns,
};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use crate::error::PublishError;

/// Run steps 1-4: the intermediate-tier candidate.
///
/// # Errors
///
/// Any schema error from the column transforms.
pub fn deidentify(
    raw: &DataFrame,
    descriptor: &TableDescriptor,
    hashing: &HashingConfig,
) -> deid_transform::Result<DataFrame> {
    let hashed = hash_identifier_columns(raw, &descriptor.client_id_columns, hashing)?;
    let deidentified = drop_columns(&hashed, &descriptor.other_identifiable_columns)?;
    let hour_truncated = truncate_datetime_columns(
        &deidentified,
        &descriptor.datetime_columns,
        TruncationUnit::Hour,
    )?;
    truncate_datetime_columns(
        &hour_truncated,
        &descriptor.date_of_birth_columns,
        TruncationUnit::Month,
    )
}

/// Publishes one table at a time into the intermediate and final tiers.
pub struct TierPublisher<'a, S: ?Sized> {
    store: &'a S,
    config: &'a PipelineConfig,
    dry_run: bool,
}

impl<'a, S: TableStore + ?Sized> TierPublisher<'a, S> {
    pub fn new(store: &'a S, config: &'a PipelineConfig) -> Self {
        Self {
            store,
            config,
            dry_run: false,
        }
    }

    /// Compute every tier but write nothing.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// De-identify `raw` and write the tiers its descriptor allows.
    ///
    /// # Errors
    ///
    /// A transform error aborts before anything is written. A failed
    /// intermediate write stops the table; a failed final write leaves the
    /// intermediate tier in place.
    pub fn publish(
        &self,
        table_name: &str,
        descriptor: &TableDescriptor,
        raw: &DataFrame,
    ) -> Result<PublishReport, PublishError> {
        let span = info_span!("publish", table = %table_name);
        let _guard = span.enter();
        let rows = raw.height();

        let mut intermediate = deidentify(raw, descriptor, &self.config.hashing)?;
        if !descriptor.has_intermediate_content() {
            info!("no informative columns remain; skipping both tiers");
            return Ok(PublishReport {
                rows,
                intermediate: TierOutcome::Skipped(SkipReason::NoInformativeColumns),
                final_tier: TierOutcome::Skipped(SkipReason::IntermediateSkipped),
            });
        }
        let intermediate_outcome = self
            .emit(Tier::Intermediate, table_name, &mut intermediate)
            .map_err(PublishError::WriteIntermediate)?;

        let mut final_frame = drop_columns(&intermediate, &descriptor.free_text_columns)?;
        let final_outcome = if descriptor.has_final_content() {
            self.emit(Tier::Final, table_name, &mut final_frame)
                .map_err(PublishError::WriteFinal)?
        } else {
            info!("only free text remains; skipping final tier");
            TierOutcome::Skipped(SkipReason::NoInformativeColumns)
        };

        Ok(PublishReport {
            rows,
            intermediate: intermediate_outcome,
            final_tier: final_outcome,
        })
    }

    fn emit(
        &self,
        tier: Tier,
        table_name: &str,
        df: &mut DataFrame,
    ) -> Result<TierOutcome, StorageError> {
        let location = self.config.storage.location(tier, table_name);
        let artifact = tier_artifact(&location, df);
        if self.dry_run {
            debug!(tier = %tier, uri = %artifact.uri, "dry run; not writing");
            return Ok(TierOutcome::Planned(artifact));
        }
        self.store.write_table(&location, df)?;
        info!(
            tier = %tier,
            uri = %artifact.uri,
            rows = artifact.rows,
            columns = artifact.columns.len(),
            "published tier"
        );
        Ok(TierOutcome::Written(artifact))
    }
}

fn tier_artifact(location: &TableLocation, df: &DataFrame) -> TierArtifact {
    TierArtifact {
        uri: location.uri(),
        rows: df.height(),
        columns: df
            .get_column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect(),
    }
}
