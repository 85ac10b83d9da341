//! Per-table outcomes and the run summary.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Why a tier was not written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No documented column survives this tier's drops.
    NoInformativeColumns,
    /// The intermediate tier was skipped, so the final tier was never evaluated.
    IntermediateSkipped,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoInformativeColumns => f.write_str("no informative columns"),
            Self::IntermediateSkipped => f.write_str("intermediate skipped"),
        }
    }
}

/// A tier artifact, written or (in a dry run) only prepared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierArtifact {
    pub uri: String,
    pub rows: usize,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TierOutcome {
    Written(TierArtifact),
    /// Dry run: the artifact was computed but not persisted.
    Planned(TierArtifact),
    Skipped(SkipReason),
}

impl TierOutcome {
    pub fn artifact(&self) -> Option<&TierArtifact> {
        match self {
            Self::Written(artifact) | Self::Planned(artifact) => Some(artifact),
            Self::Skipped(_) => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

impl fmt::Display for TierOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Written(_) => f.write_str("written"),
            Self::Planned(_) => f.write_str("planned"),
            Self::Skipped(reason) => write!(f, "skipped ({reason})"),
        }
    }
}

/// What the publisher did with one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    pub rows: usize,
    pub intermediate: TierOutcome,
    pub final_tier: TierOutcome,
}

/// Step at which a table failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Read,
    Transform,
    WriteIntermediate,
    WriteFinal,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Read => "read",
            Self::Transform => "transform",
            Self::WriteIntermediate => "write intermediate",
            Self::WriteFinal => "write final",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableFailure {
    pub stage: FailureStage,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableResult {
    Processed(PublishReport),
    Failed(TableFailure),
}

/// Coarse classification of a table's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    /// At least the intermediate tier was written (or planned).
    Published,
    /// Neither tier carried informative columns.
    Skipped,
    Failed,
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Published => f.write_str("published"),
            Self::Skipped => f.write_str("skipped"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableOutcome {
    pub table_name: String,
    pub file_name: String,
    pub result: TableResult,
}

impl TableOutcome {
    pub fn status(&self) -> TableStatus {
        match &self.result {
            TableResult::Failed(_) => TableStatus::Failed,
            TableResult::Processed(report) if report.intermediate.is_skipped() => {
                TableStatus::Skipped
            }
            TableResult::Processed(_) => TableStatus::Published,
        }
    }

    pub fn report(&self) -> Option<&PublishReport> {
        match &self.result {
            TableResult::Processed(report) => Some(report),
            TableResult::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&TableFailure> {
        match &self.result {
            TableResult::Failed(failure) => Some(failure),
            TableResult::Processed(_) => None,
        }
    }
}

/// Outcomes of one run, in catalogue order.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub dry_run: bool,
    pub tables: Vec<TableOutcome>,
}

impl RunSummary {
    pub fn start(dry_run: bool) -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            dry_run,
            tables: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: TableOutcome) {
        self.tables.push(outcome);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn count(&self, status: TableStatus) -> usize {
        self.tables
            .iter()
            .filter(|outcome| outcome.status() == status)
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.tables
            .iter()
            .any(|outcome| outcome.status() == TableStatus::Failed)
    }

    pub fn outcome(&self, table_name: &str) -> Option<&TableOutcome> {
        self.tables
            .iter()
            .find(|outcome| outcome.table_name == table_name)
    }
}
