//! Temporal precision reduction.
//!
//! Values are replaced by the start of their enclosing unit, in the column's
//! own time zone; nulls stay null and column names are unchanged.

use std::fmt;

use polars::prelude::{DataFrame, DataType, Expr, IntoLazy, col, lit};
use tracing::debug;

use crate::columns::{require_column, unique_names};
use crate::error::{Result, TransformError};

/// Unit a timestamp is truncated to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TruncationUnit {
    Minute,
    /// Event timestamps.
    Hour,
    Day,
    /// Birth dates.
    Month,
    Year,
}

impl TruncationUnit {
    /// Polars duration string for this unit.
    pub const fn every(self) -> &'static str {
        match self {
            Self::Minute => "1m",
            Self::Hour => "1h",
            Self::Day => "1d",
            Self::Month => "1mo",
            Self::Year => "1y",
        }
    }

    /// Whether this unit is finer than a calendar day.
    pub const fn is_sub_daily(self) -> bool {
        matches!(self, Self::Minute | Self::Hour)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for TruncationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Truncate each named column to the start of its enclosing `unit`.
///
/// `Date` columns are already day-precise and are left unchanged by
/// sub-daily units.
///
/// # Errors
///
/// Fails with [`TransformError::MissingColumn`] when a column is absent and
/// with [`TransformError::NotTemporal`] when it is neither `Date` nor
/// `Datetime`.
pub fn truncate_datetime_columns<S: AsRef<str>>(
    df: &DataFrame,
    columns: &[S],
    unit: TruncationUnit,
) -> Result<DataFrame> {
    let mut exprs: Vec<Expr> = Vec::new();
    for name in unique_names(columns) {
        match require_column(df, name)?.dtype() {
            DataType::Datetime(_, _) => {}
            DataType::Date if unit.is_sub_daily() => continue,
            DataType::Date => {}
            other => {
                return Err(TransformError::NotTemporal {
                    column: name.to_string(),
                    dtype: other.to_string(),
                });
            }
        }
        exprs.push(col(name).dt().truncate(lit(unit.every())).alias(name));
    }
    if exprs.is_empty() {
        return Ok(df.clone());
    }

    let count = exprs.len();
    let out = df.clone().lazy().with_columns(exprs).collect()?;
    debug!(columns = count, unit = %unit, "truncated temporal columns");
    Ok(out)
}
