//! Storage tiers and table addressing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three storage stages a table passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Unprocessed input.
    Raw,
    /// Identifiers hashed or dropped, timestamps coarsened.
    Intermediate,
    /// Intermediate without free-text columns.
    Final,
}

impl Tier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Intermediate => "intermediate",
            Self::Final => "final",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File name of a table in every tier: the table name with all `.`
/// characters removed, plus `extension`.
///
/// ```
/// use deid_model::raw_file_name;
///
/// assert_eq!(raw_file_name("Sales.Orders", "txt"), "SalesOrders.txt");
/// assert_eq!(raw_file_name("Sales.Orders", ".parquet"), "SalesOrders.parquet");
/// assert_eq!(raw_file_name("dbo.Client.Address", ""), "dboClientAddress");
/// ```
pub fn raw_file_name(table_name: &str, extension: &str) -> String {
    let stem: String = table_name.chars().filter(|ch| *ch != '.').collect();
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() {
        stem
    } else {
        format!("{stem}.{extension}")
    }
}

/// Address of one table file inside one tier container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableLocation {
    /// Tier container name.
    pub container: String,
    /// Storage connector or account endpoint.
    pub connector: String,
    pub file_name: String,
}

impl TableLocation {
    pub fn new(
        container: impl Into<String>,
        connector: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            container: container.into(),
            connector: connector.into(),
            file_name: file_name.into(),
        }
    }

    /// Blob-style URI, `wasbs://<container>@<connector>/<file_name>`.
    pub fn uri(&self) -> String {
        format!(
            "wasbs://{}@{}/{}",
            self.container, self.connector, self.file_name
        )
    }
}

impl fmt::Display for TableLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri())
    }
}
