use deid_model::TableLocation;
use polars::prelude::DataFrame;

use crate::error::Result;

/// Table I/O backend addressed by [`TableLocation`].
pub trait TableStore {
    /// Read the whole table stored at `location`.
    fn read_table(&self, location: &TableLocation) -> Result<DataFrame>;

    /// Replace whatever is stored at `location` with `df`.
    fn write_table(&self, location: &TableLocation, df: &mut DataFrame) -> Result<()>;
}

impl<T: TableStore + ?Sized> TableStore for &T {
    fn read_table(&self, location: &TableLocation) -> Result<DataFrame> {
        (**self).read_table(location)
    }

    fn write_table(&self, location: &TableLocation, df: &mut DataFrame) -> Result<()> {
        (**self).write_table(location, df)
    }
}
