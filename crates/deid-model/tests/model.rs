//! Tests for configuration, locations, catalogue selection and outcomes.

use deid_model::{
    Catalogue, CatalogueSource, ConfigError, HashingConfig, ModelError, PipelineConfig,
    PublishReport, RunSummary, SkipReason, StorageConfig, TableDescriptor, TableFailure,
    TableOutcome, TableResult, TableStatus, Tier, TierArtifact, TierContainers, TierOutcome,
};

fn storage() -> StorageConfig {
    StorageConfig::new(
        "acct",
        "acct.blob.core.windows.net",
        TierContainers::new("bronze", "silver", "gold"),
    )
}

fn config() -> PipelineConfig {
    PipelineConfig::new(
        storage(),
        HashingConfig::new("_hash", "pepper"),
        CatalogueSource::Url("http://catalogue.local/tables".to_string()),
    )
}

#[test]
fn valid_config_passes() {
    assert_eq!(config().validate(), Ok(()));
}

#[test]
fn blank_salt_is_missing() {
    let mut config = config();
    config.hashing = HashingConfig::new("_hash", "  ");
    assert_eq!(
        config.validate(),
        Err(ConfigError::MissingSetting("HASH_SALT"))
    );
}

#[test]
fn shared_container_is_rejected() {
    let mut config = config();
    config.storage.containers = TierContainers::new("bronze", "silver", "silver");
    assert_eq!(
        config.validate(),
        Err(ConfigError::DuplicateContainer {
            first: "SILVER_CONTAINER",
            second: "GOLD_CONTAINER",
            container: "silver".to_string(),
        })
    );
}

#[test]
fn half_credentials_are_rejected() {
    let mut config = config();
    config.storage = storage().with_credentials(Some("fs.azure.account.key".to_string()), None);
    assert_eq!(config.validate(), Err(ConfigError::IncompleteCredentials));
}

#[test]
fn dots_only_extension_is_rejected() {
    let mut config = config();
    config.storage = storage().with_file_extension("..");
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidSetting {
            name: "RAW_FILE_EXTENSION",
            ..
        })
    ));
}

#[test]
fn secrets_are_redacted_in_debug_output() {
    let config = PipelineConfig::new(
        storage().with_credentials(Some("accessor".to_string()), Some("s3cr3t-key".to_string())),
        HashingConfig::new("_hash", "pepper-salt"),
        CatalogueSource::Url("http://catalogue.local".to_string()),
    );
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("pepper-salt"));
    assert!(!rendered.contains("s3cr3t-key"));
    assert!(rendered.contains("[REDACTED]"));
}

#[test]
fn locations_follow_naming_convention() {
    let storage = storage();
    let raw = storage.location(Tier::Raw, "dbo.Client.Visits");
    assert_eq!(raw.file_name, "dboClientVisits.txt");
    assert_eq!(
        raw.uri(),
        "wasbs://bronze@acct.blob.core.windows.net/dboClientVisits.txt"
    );
    let final_tier = storage.location(Tier::Final, "dbo.Client.Visits");
    assert_eq!(final_tier.container, "gold");
    assert_eq!(final_tier.file_name, raw.file_name);
}

#[test]
fn hashed_column_name_appends_suffix() {
    let hashing = HashingConfig::new("_hash", "pepper");
    assert_eq!(hashing.hashed_column_name("client_id"), "client_id_hash");
}

#[test]
fn select_keeps_catalogue_order() {
    let catalogue = Catalogue::new()
        .with_table("b.Second", TableDescriptor::new())
        .with_table("a.First", TableDescriptor::new())
        .with_table("c.Third", TableDescriptor::new());

    let selected = catalogue.select(&["c.Third", "b.Second"]).unwrap();
    let names: Vec<&str> = selected.table_names().collect();
    assert_eq!(names, vec!["b.Second", "c.Third"]);
}

#[test]
fn select_rejects_unknown_table() {
    let catalogue = Catalogue::new().with_table("a.First", TableDescriptor::new());
    let error = catalogue.select(&["missing"]).unwrap_err();
    assert!(matches!(error, ModelError::UnknownTable(name) if name == "missing"));
}

#[test]
fn summary_counts_statuses() {
    let artifact = TierArtifact {
        uri: "wasbs://silver@acct/A.txt".to_string(),
        rows: 2,
        columns: vec!["a".to_string()],
    };
    let mut summary = RunSummary::start(false);
    summary.record(TableOutcome {
        table_name: "A".to_string(),
        file_name: "A.txt".to_string(),
        result: TableResult::Processed(PublishReport {
            rows: 2,
            intermediate: TierOutcome::Written(artifact),
            final_tier: TierOutcome::Skipped(SkipReason::NoInformativeColumns),
        }),
    });
    summary.record(TableOutcome {
        table_name: "B".to_string(),
        file_name: "B.txt".to_string(),
        result: TableResult::Processed(PublishReport {
            rows: 0,
            intermediate: TierOutcome::Skipped(SkipReason::NoInformativeColumns),
            final_tier: TierOutcome::Skipped(SkipReason::IntermediateSkipped),
        }),
    });
    summary.record(TableOutcome {
        table_name: "C".to_string(),
        file_name: "C.txt".to_string(),
        result: TableResult::Failed(TableFailure {
            stage: deid_model::FailureStage::Transform,
            message: "column missing".to_string(),
        }),
    });
    summary.finish();

    assert_eq!(summary.count(TableStatus::Published), 1);
    assert_eq!(summary.count(TableStatus::Skipped), 1);
    assert_eq!(summary.count(TableStatus::Failed), 1);
    assert!(summary.has_failures());
    assert!(summary.finished_at.is_some());

    let json = serde_json::to_value(&summary).expect("serialize summary");
    assert_eq!(json["tables"][1]["result"]["processed"]["intermediate"]["skipped"], "no_informative_columns");
    assert_eq!(json["tables"][2]["result"]["failed"]["stage"], "transform");
}
