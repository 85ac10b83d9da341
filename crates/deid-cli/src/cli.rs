//! CLI argument definitions for the de-identification runner.
//!
//! Every setting can come from a flag or from its environment variable; the
//! flag wins when both are present.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use deid_model::{
    CatalogueSource, ConfigError, DEFAULT_FILE_EXTENSION, HashingConfig, PipelineConfig,
    StorageConfig, TierContainers,
};

#[derive(Parser)]
#[command(
    name = "deid",
    version,
    about = "Publish de-identified copies of raw tables into intermediate and final tiers",
    long_about = "Read every table listed in the data catalogue from the raw tier, hash \
                  client identifiers, drop identifying columns, coarsen timestamps, and \
                  write the intermediate and final tiers."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Publish every catalogued table into the intermediate and final tiers.
    Run(RunArgs),

    /// List catalogued tables with their treatments and guard verdicts.
    Tables(TablesArgs),
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Only process this table (repeatable).
    #[arg(long = "only", value_name = "TABLE")]
    pub only: Vec<String>,

    /// Evaluate transforms and guards without writing any tier.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write the run summary as JSON to this path.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Args)]
pub struct TablesArgs {
    #[command(flatten)]
    pub catalogue: CatalogueArgs,

    /// Extension appended to raw file names.
    #[arg(
        long = "file-extension",
        env = "RAW_FILE_EXTENSION",
        default_value = DEFAULT_FILE_EXTENSION
    )]
    pub file_extension: String,
}

/// All settings of a run.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub storage: StorageArgs,

    #[command(flatten)]
    pub hashing: HashingArgs,

    #[command(flatten)]
    pub catalogue: CatalogueArgs,
}

#[derive(Args)]
pub struct StorageArgs {
    /// Storage account name.
    #[arg(long = "storage-account", env = "STORAGE_ACCOUNT")]
    pub account: Option<String>,

    /// Storage endpoint used in every table location.
    #[arg(long = "storage-connector", env = "STORAGE_CONNECTOR")]
    pub connector: Option<String>,

    /// Property name under which the storage key is presented.
    #[arg(long = "storage-accessor", env = "STORAGE_ACCESSOR")]
    pub accessor: Option<String>,

    /// Storage account key.
    #[arg(long = "storage-key", env = "STORAGE_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Container holding raw tables.
    #[arg(long = "bronze-container", env = "BRONZE_CONTAINER")]
    pub bronze_container: Option<String>,

    /// Container receiving the intermediate tier.
    #[arg(long = "silver-container", env = "SILVER_CONTAINER")]
    pub silver_container: Option<String>,

    /// Container receiving the final tier.
    #[arg(long = "gold-container", env = "GOLD_CONTAINER")]
    pub gold_container: Option<String>,

    /// Local directory backing the storage account.
    #[arg(long = "storage-root", env = "STORAGE_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Extension appended to raw file names.
    #[arg(
        long = "file-extension",
        env = "RAW_FILE_EXTENSION",
        default_value = DEFAULT_FILE_EXTENSION
    )]
    pub file_extension: String,
}

#[derive(Args)]
pub struct HashingArgs {
    /// Suffix of hashed identifier columns.
    #[arg(long = "hash-suffix", env = "CLIENT_ID_HASH_SUFFIX")]
    pub suffix: Option<String>,

    /// Salt appended to identifiers before hashing.
    #[arg(long = "hash-salt", env = "HASH_SALT", hide_env_values = true)]
    pub salt: Option<String>,
}

#[derive(Args)]
pub struct CatalogueArgs {
    /// Endpoint serving the data catalogue JSON.
    #[arg(long = "catalogue-url", env = "DATA_CATALOGUE_URL", value_name = "URL")]
    pub url: Option<String>,

    /// Local catalogue JSON; takes precedence over the URL.
    #[arg(long = "catalogue-file", env = "DATA_CATALOGUE_FILE", value_name = "PATH")]
    pub file: Option<PathBuf>,
}

impl CatalogueArgs {
    /// The configured catalogue source.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingSetting`] when neither a file nor a URL is given.
    pub fn source(&self) -> Result<CatalogueSource, ConfigError> {
        match (&self.file, &self.url) {
            (Some(path), _) => Ok(CatalogueSource::File(path.clone())),
            (None, Some(url)) => Ok(CatalogueSource::Url(url.clone())),
            (None, None) => Err(ConfigError::MissingSetting("DATA_CATALOGUE_URL")),
        }
    }
}

impl ConfigArgs {
    /// Assemble and validate the pipeline configuration.
    ///
    /// # Errors
    ///
    /// The first [`ConfigError`] found; see [`PipelineConfig::validate`].
    pub fn pipeline_config(&self) -> Result<PipelineConfig, ConfigError> {
        let storage = &self.storage;
        let containers = TierContainers::new(
            storage.bronze_container.clone().unwrap_or_default(),
            storage.silver_container.clone().unwrap_or_default(),
            storage.gold_container.clone().unwrap_or_default(),
        );
        let storage_config = StorageConfig::new(
            storage.account.clone().unwrap_or_default(),
            storage.connector.clone().unwrap_or_default(),
            containers,
        )
        .with_file_extension(storage.file_extension.clone())
        .with_root(storage.root.clone())
        .with_credentials(storage.accessor.clone(), storage.key.clone());
        let hashing = HashingConfig::new(
            self.hashing.suffix.clone().unwrap_or_default(),
            self.hashing.salt.clone().unwrap_or_default(),
        );

        let config = PipelineConfig::new(storage_config, hashing, self.catalogue.source()?);
        config.validate()?;
        Ok(config)
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
