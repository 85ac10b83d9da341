//! Table descriptors and the catalogue that holds them.
//!
//! A [`TableDescriptor`] declares which columns of one raw table need which
//! treatment. The keys of `columns_descriptions` are the documented columns
//! of the table; the publication guards are computed from them alone, so a
//! hashed `<name><suffix>` column never counts as informative.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Column treatments for a single logical table.
///
/// Field names follow the catalogue's wire keys through `serde` renames.
/// Lists keep their catalogue order: hashed columns are appended to the
/// output schema in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Direct client identifiers, replaced by salted digests.
    #[serde(rename = "client_id", default)]
    pub client_id_columns: Vec<String>,
    /// Identifying columns that are dropped before the intermediate tier.
    #[serde(default)]
    pub other_identifiable_columns: Vec<String>,
    /// Event timestamps, truncated to the hour.
    #[serde(rename = "date_time", default)]
    pub datetime_columns: Vec<String>,
    /// Birth dates, truncated to the month.
    #[serde(rename = "date_of_birth", default)]
    pub date_of_birth_columns: Vec<String>,
    /// Unstructured text, dropped before the final tier.
    #[serde(default)]
    pub free_text_columns: Vec<String>,
    /// Documented columns and their descriptions.
    #[serde(default)]
    pub columns_descriptions: IndexMap<String, String>,
}

impl TableDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client_id_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.client_id_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_other_identifiable_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.other_identifiable_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_datetime_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.datetime_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_date_of_birth_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_of_birth_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_free_text_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.free_text_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Document a column. An empty description is allowed.
    pub fn with_description(mut self, column: impl Into<String>, description: impl Into<String>) -> Self {
        self.columns_descriptions
            .insert(column.into(), description.into());
        self
    }

    /// Names of all documented columns.
    pub fn documented_columns(&self) -> BTreeSet<&str> {
        self.columns_descriptions.keys().map(String::as_str).collect()
    }

    /// Documented columns that survive the intermediate tier's drops.
    pub fn intermediate_informative_columns(&self) -> BTreeSet<&str> {
        let dropped = as_set(&self.other_identifiable_columns);
        self.documented_columns()
            .into_iter()
            .filter(|name| !dropped.contains(name))
            .collect()
    }

    /// Documented columns that survive the final tier's drops.
    pub fn final_informative_columns(&self) -> BTreeSet<&str> {
        let mut dropped = as_set(&self.other_identifiable_columns);
        dropped.extend(self.free_text_columns.iter().map(String::as_str));
        self.documented_columns()
            .into_iter()
            .filter(|name| !dropped.contains(name))
            .collect()
    }

    pub fn has_intermediate_content(&self) -> bool {
        !self.intermediate_informative_columns().is_empty()
    }

    pub fn has_final_content(&self) -> bool {
        !self.final_informative_columns().is_empty()
    }

    /// Reject columns that are both hashed and dropped.
    pub fn validate(&self, table_name: &str) -> Result<()> {
        let dropped = as_set(&self.other_identifiable_columns);
        let overlap: BTreeSet<&str> = self
            .client_id_columns
            .iter()
            .map(String::as_str)
            .filter(|name| dropped.contains(name))
            .collect();
        if overlap.is_empty() {
            return Ok(());
        }
        Err(ModelError::AmbiguousIdentifier {
            table: table_name.to_string(),
            columns: overlap.into_iter().map(str::to_string).collect(),
        })
    }
}

fn as_set(columns: &[String]) -> BTreeSet<&str> {
    columns.iter().map(String::as_str).collect()
}

/// Descriptors keyed by logical table name, in catalogue order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalogue {
    tables: IndexMap<String, TableDescriptor>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, name: impl Into<String>, descriptor: TableDescriptor) -> Self {
        self.insert(name, descriptor);
        self
    }

    /// Insert or replace a table. A replaced table keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, descriptor: TableDescriptor) {
        self.tables.insert(name.into(), descriptor);
    }

    pub fn get(&self, name: &str) -> Option<&TableDescriptor> {
        self.tables.get(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TableDescriptor)> {
        self.tables
            .iter()
            .map(|(name, descriptor)| (name.as_str(), descriptor))
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Validate every descriptor; the first violation is returned.
    pub fn validate(&self) -> Result<()> {
        for (name, descriptor) in self.iter() {
            descriptor.validate(name)?;
        }
        Ok(())
    }

    /// Keep only the named tables, preserving catalogue order.
    ///
    /// Every requested name must exist in the catalogue.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        let wanted: BTreeSet<&str> = names.iter().map(AsRef::as_ref).collect();
        if let Some(missing) = wanted.iter().find(|name| !self.tables.contains_key(**name)) {
            return Err(ModelError::UnknownTable((*missing).to_string()));
        }
        let tables = self
            .tables
            .iter()
            .filter(|(name, _)| wanted.contains(name.as_str()))
            .map(|(name, descriptor)| (name.clone(), descriptor.clone()))
            .collect();
        Ok(Self { tables })
    }
}

impl<'a> IntoIterator for &'a Catalogue {
    type Item = (&'a String, &'a TableDescriptor);
    type IntoIter = indexmap::map::Iter<'a, String, TableDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}
