use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("table {table}: columns {columns:?} are listed as both client id and other identifiable")]
    AmbiguousIdentifier { table: String, columns: Vec<String> },
    #[error("table {0} is not present in the catalogue")]
    UnknownTable(String),
}

/// Invalid or missing startup configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    MissingSetting(&'static str),
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
    #[error("{first} and {second} both point at container {container}")]
    DuplicateContainer {
        first: &'static str,
        second: &'static str,
        container: String,
    },
    #[error("storage credentials require both an accessor and a key")]
    IncompleteCredentials,
}

pub type Result<T> = std::result::Result<T, ModelError>;
