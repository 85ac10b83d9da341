//! Tests for building the pipeline configuration from CLI arguments.

use std::path::PathBuf;

use clap::Parser;
use deid_cli::cli::{Cli, Command, RunArgs};
use deid_model::{CatalogueSource, ConfigError, REDACTED_VALUE, Tier};

const BASE: [&str; 16] = [
    "deid",
    "run",
    "--storage-account",
    "acct",
    "--storage-connector",
    "acct.blob.core.windows.net",
    "--bronze-container",
    "bronze",
    "--silver-container",
    "silver",
    "--gold-container",
    "gold",
    "--hash-suffix",
    "_hash",
    "--catalogue-url",
    "http://catalogue.local/tables",
];

fn run_args(extra: &[&str]) -> RunArgs {
    let args = BASE.iter().chain(extra.iter()).copied();
    match Cli::try_parse_from(args).unwrap().command {
        Command::Run(args) => args,
        Command::Tables(_) => panic!("expected the run command"),
    }
}

#[test]
fn builds_config_from_flags() {
    let args = run_args(&["--hash-salt", "pepper", "--storage-root", "/data/lake"]);

    let config = args.config.pipeline_config().unwrap();

    assert_eq!(config.storage.account, "acct");
    assert_eq!(config.storage.file_extension, "txt");
    assert_eq!(config.storage.root, Some(PathBuf::from("/data/lake")));
    assert_eq!(config.hashing.hashed_column_name("ClientID"), "ClientID_hash");
    assert_eq!(
        config.catalogue,
        CatalogueSource::Url("http://catalogue.local/tables".to_string())
    );
    assert_eq!(
        config.storage.location(Tier::Final, "dbo.Visits").uri(),
        "wasbs://gold@acct.blob.core.windows.net/dboVisits.txt"
    );
}

#[test]
fn missing_salt_is_reported_by_name() {
    let args = run_args(&[]);

    let error = args.config.pipeline_config().unwrap_err();

    assert_eq!(error, ConfigError::MissingSetting("HASH_SALT"));
}

#[test]
fn catalogue_file_takes_precedence_over_url() {
    let args = run_args(&["--hash-salt", "pepper", "--catalogue-file", "tables.json"]);

    let config = args.config.pipeline_config().unwrap();

    assert_eq!(
        config.catalogue,
        CatalogueSource::File(PathBuf::from("tables.json"))
    );
}

#[test]
fn half_a_credential_pair_is_rejected() {
    let args = run_args(&["--hash-salt", "pepper", "--storage-key", "s3cret"]);

    let error = args.config.pipeline_config().unwrap_err();

    assert_eq!(error, ConfigError::IncompleteCredentials);
}

#[test]
fn secrets_are_redacted_in_debug_output() {
    let args = run_args(&[
        "--hash-salt",
        "pepper",
        "--storage-accessor",
        "account_key",
        "--storage-key",
        "s3cret",
    ]);

    let rendered = format!("{:?}", args.config.pipeline_config().unwrap());

    assert!(!rendered.contains("pepper"));
    assert!(!rendered.contains("s3cret"));
    assert!(rendered.contains(REDACTED_VALUE));
}

#[test]
fn run_flags_are_collected() {
    let args = run_args(&[
        "--hash-salt",
        "pepper",
        "--only",
        "dbo.Visits",
        "--only",
        "dbo.Accounts",
        "--dry-run",
        "--file-extension",
        "parquet",
    ]);

    assert_eq!(args.only, vec!["dbo.Visits", "dbo.Accounts"]);
    assert!(args.dry_run);
    assert!(args.report.is_none());
    let config = args.config.pipeline_config().unwrap();
    assert_eq!(config.storage.file_name("dbo.Visits"), "dboVisits.parquet");
}
