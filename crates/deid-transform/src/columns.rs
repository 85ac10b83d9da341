//! Column lookup and removal.

use std::collections::BTreeSet;

use polars::prelude::{Column, DataFrame};
use tracing::debug;

use crate::error::{Result, TransformError};

/// Look up a column, reporting the available names when it is absent.
pub(crate) fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| TransformError::MissingColumn {
            column: name.to_string(),
            available: df
                .get_column_names()
                .into_iter()
                .map(ToString::to_string)
                .collect(),
        })
}

/// Names in first-seen order with repeats removed.
pub(crate) fn unique_names<S: AsRef<str>>(columns: &[S]) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    columns
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Remove `columns` from a copy of `df`.
///
/// Names that are not in `df` are skipped, so a column listed under two
/// treatments is dropped once.
///
/// # Errors
///
/// Only polars errors; absent names are not an error.
pub fn drop_columns<S: AsRef<str>>(df: &DataFrame, columns: &[S]) -> Result<DataFrame> {
    let mut out = df.clone();
    for name in unique_names(columns) {
        if out.get_column_index(name).is_none() {
            debug!(column = name, "column absent; nothing to drop");
            continue;
        }
        out = out.drop(name)?;
        debug!(column = name, "dropped column");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_names_keeps_first_occurrence() {
        let names = unique_names(&["b", "a", "b", "c", "a"]);
        assert_eq!(names, vec!["b", "a", "c"]);
    }
}
