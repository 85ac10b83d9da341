//! Salted hashing of client identifier columns.
//!
//! Each identifier value is rendered as text, the salt is appended, and the
//! SHA-256 digest of the resulting bytes is stored as lowercase hex under
//! `<column><suffix>`. The original column is removed.
//!
//! # Null values
//!
//! A null identifier hashes the single byte `0xFF` followed by the salt.
//! `0xFF` cannot occur in UTF-8 text, so the null digest differs from the
//! digest of every non-null value, including the empty string (whose input
//! is the salt alone).

use deid_model::HashingConfig;
use polars::prelude::{DataFrame, DataType, IntoSeries, StringChunkedBuilder};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::columns::{require_column, unique_names};
use crate::error::{Result, TransformError};

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Hashed in place of the value bytes when the value is null.
const NULL_MARKER: u8 = 0xFF;

/// Hex SHA-256 of `value || salt`.
///
/// ```
/// use deid_transform::salted_digest;
///
/// let digest = salted_digest(Some("12345"), "pepper");
/// assert_eq!(digest.len(), 64);
/// assert_ne!(salted_digest(None, "pepper"), salted_digest(Some(""), "pepper"));
/// ```
pub fn salted_digest(value: Option<&str>, salt: &str) -> String {
    let mut hasher = Sha256::new();
    match value {
        Some(value) => hasher.update(value.as_bytes()),
        None => hasher.update([NULL_MARKER]),
    }
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Replace each identifier column with its salted digest column.
///
/// Digest columns are appended in the order the columns are named. Values
/// of non-text columns are cast to text before hashing.
///
/// # Errors
///
/// Fails with [`TransformError::MissingColumn`] when a named column is
/// absent, with [`TransformError::HashTargetExists`] when the digest column
/// name is already taken by another column, or with a polars error when a
/// column cannot be cast to text.
pub fn hash_identifier_columns<S: AsRef<str>>(
    df: &DataFrame,
    columns: &[S],
    hashing: &HashingConfig,
) -> Result<DataFrame> {
    let mut out = df.clone();
    for name in unique_names(columns) {
        let as_text = require_column(&out, name)?.cast(&DataType::String)?;
        let values = as_text.str()?;
        let target = hashing.hashed_column_name(name);
        if target != name && out.get_column_index(&target).is_some() {
            return Err(TransformError::HashTargetExists {
                column: name.to_string(),
                target,
            });
        }

        let mut builder = StringChunkedBuilder::new(target.as_str().into(), values.len());
        for value in values {
            builder.append_value(salted_digest(value, hashing.salt()));
        }
        out.with_column(builder.finish().into_series())?;
        if target != name {
            out = out.drop(name)?;
        }
        debug!(column = name, hashed_column = %target, "hashed identifier column");
    }
    Ok(out)
}
