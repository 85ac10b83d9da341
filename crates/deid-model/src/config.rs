//! Process-wide configuration.
//!
//! The configuration is assembled once at startup (see the CLI crate) and
//! passed by reference into the transformer and the publisher. Nothing in the
//! library crates reads the environment.

use std::fmt;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::location::{TableLocation, Tier, raw_file_name};

/// Placeholder printed instead of secrets.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Default extension appended to raw file names.
pub const DEFAULT_FILE_EXTENSION: &str = "txt";

/// Parameters for hashing client identifier columns.
#[derive(Clone, PartialEq, Eq)]
pub struct HashingConfig {
    /// Appended to a column name to form its hashed column name.
    pub suffix: String,
    salt: String,
}

impl HashingConfig {
    pub fn new(suffix: impl Into<String>, salt: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            salt: salt.into(),
        }
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Name of the column holding the digest of `column`.
    pub fn hashed_column_name(&self, column: &str) -> String {
        format!("{column}{}", self.suffix)
    }
}

impl fmt::Debug for HashingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashingConfig")
            .field("suffix", &self.suffix)
            .field("salt", &REDACTED_VALUE)
            .finish()
    }
}

/// Container names of the three tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierContainers {
    pub raw: String,
    pub intermediate: String,
    pub final_tier: String,
}

impl TierContainers {
    pub fn new(
        raw: impl Into<String>,
        intermediate: impl Into<String>,
        final_tier: impl Into<String>,
    ) -> Self {
        Self {
            raw: raw.into(),
            intermediate: intermediate.into(),
            final_tier: final_tier.into(),
        }
    }

    pub fn container(&self, tier: Tier) -> &str {
        match tier {
            Tier::Raw => &self.raw,
            Tier::Intermediate => &self.intermediate,
            Tier::Final => &self.final_tier,
        }
    }
}

/// Storage identity and naming convention.
#[derive(Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Storage account name.
    pub account: String,
    /// Connector (account endpoint) used in every location.
    pub connector: String,
    pub containers: TierContainers,
    /// Extension appended to every file name, without the leading dot.
    pub file_extension: String,
    /// Local directory backing the filesystem store.
    pub root: Option<PathBuf>,
    accessor: Option<String>,
    key: Option<String>,
}

impl StorageConfig {
    pub fn new(
        account: impl Into<String>,
        connector: impl Into<String>,
        containers: TierContainers,
    ) -> Self {
        Self {
            account: account.into(),
            connector: connector.into(),
            containers,
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            root: None,
            accessor: None,
            key: None,
        }
    }

    #[must_use]
    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into();
        self
    }

    #[must_use]
    pub fn with_root(mut self, root: Option<PathBuf>) -> Self {
        self.root = root;
        self
    }

    /// Set the accessor property and its key. Both are handed to the backend
    /// unchanged.
    #[must_use]
    pub fn with_credentials(mut self, accessor: Option<String>, key: Option<String>) -> Self {
        self.accessor = accessor;
        self.key = key;
        self
    }

    pub fn accessor(&self) -> Option<&str> {
        self.accessor.as_deref()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// File name of `table_name` under the configured extension.
    pub fn file_name(&self, table_name: &str) -> String {
        raw_file_name(table_name, &self.file_extension)
    }

    /// Location of `table_name` inside `tier`.
    pub fn location(&self, tier: Tier, table_name: &str) -> TableLocation {
        TableLocation::new(
            self.containers.container(tier),
            &self.connector,
            self.file_name(table_name),
        )
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("account", &self.account)
            .field("connector", &self.connector)
            .field("containers", &self.containers)
            .field("file_extension", &self.file_extension)
            .field("root", &self.root)
            .field("accessor", &self.accessor)
            .field("key", &self.key.as_ref().map(|_| REDACTED_VALUE))
            .finish()
    }
}

/// Where the catalogue is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueSource {
    Url(String),
    File(PathBuf),
}

/// Everything a run needs, validated before any table is touched.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub storage: StorageConfig,
    pub hashing: HashingConfig,
    pub catalogue: CatalogueSource,
}

impl PipelineConfig {
    pub fn new(storage: StorageConfig, hashing: HashingConfig, catalogue: CatalogueSource) -> Self {
        Self {
            storage,
            hashing,
            catalogue,
        }
    }

    /// Check required settings.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require("STORAGE_ACCOUNT", &self.storage.account)?;
        require("STORAGE_CONNECTOR", &self.storage.connector)?;
        require("BRONZE_CONTAINER", &self.storage.containers.raw)?;
        require("SILVER_CONTAINER", &self.storage.containers.intermediate)?;
        require("GOLD_CONTAINER", &self.storage.containers.final_tier)?;
        require("CLIENT_ID_HASH_SUFFIX", &self.hashing.suffix)?;
        require("HASH_SALT", self.hashing.salt())?;
        match &self.catalogue {
            CatalogueSource::Url(url) => require("DATA_CATALOGUE_URL", url)?,
            CatalogueSource::File(path) => {
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::MissingSetting("DATA_CATALOGUE_FILE"));
                }
            }
        }
        let extension = &self.storage.file_extension;
        if !extension.is_empty() && extension.trim_start_matches('.').is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "RAW_FILE_EXTENSION",
                reason: "extension must contain more than dots".to_string(),
            });
        }

        let containers = &self.storage.containers;
        let named = [
            ("BRONZE_CONTAINER", containers.raw.as_str()),
            ("SILVER_CONTAINER", containers.intermediate.as_str()),
            ("GOLD_CONTAINER", containers.final_tier.as_str()),
        ];
        for (idx, (first, container)) in named.iter().enumerate() {
            if let Some((second, _)) = named[idx + 1..].iter().find(|(_, other)| other == container) {
                return Err(ConfigError::DuplicateContainer {
                    first: *first,
                    second: *second,
                    container: (*container).to_string(),
                });
            }
        }

        if self.storage.accessor.is_some() != self.storage.key.is_some() {
            return Err(ConfigError::IncompleteCredentials);
        }
        Ok(())
    }
}

fn require(name: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::MissingSetting(name))
    } else {
        Ok(())
    }
}
