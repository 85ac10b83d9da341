//! In-process store keyed by location URI.
//!
//! Used for dry runs and tests. Writes are logged in order, and containers
//! can be marked as rejecting writes to exercise failure handling.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use deid_model::TableLocation;
use polars::prelude::DataFrame;

use crate::error::{Result, StorageError};
use crate::store::TableStore;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<BTreeMap<String, DataFrame>>,
    writes: Mutex<Vec<String>>,
    rejected_containers: BTreeSet<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table, e.g. a raw input.
    #[must_use]
    pub fn with_table(self, location: &TableLocation, df: DataFrame) -> Self {
        if let Ok(mut tables) = self.tables.lock() {
            tables.insert(location.uri(), df);
        }
        self
    }

    /// Make every write into `container` fail with [`StorageError::Rejected`].
    #[must_use]
    pub fn rejecting_writes_to(mut self, container: impl Into<String>) -> Self {
        self.rejected_containers.insert(container.into());
        self
    }

    /// The table currently stored at `location`.
    pub fn get(&self, location: &TableLocation) -> Option<DataFrame> {
        self.lock_tables().ok()?.get(&location.uri()).cloned()
    }

    pub fn contains(&self, location: &TableLocation) -> bool {
        self.get(location).is_some()
    }

    /// URIs written so far, in write order.
    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .map(|writes| writes.clone())
            .unwrap_or_default()
    }

    fn lock_tables(&self) -> Result<MutexGuard<'_, BTreeMap<String, DataFrame>>> {
        self.tables
            .lock()
            .map_err(|_| StorageError::Backend("in-memory store lock poisoned".to_string()))
    }
}

impl TableStore for InMemoryStore {
    fn read_table(&self, location: &TableLocation) -> Result<DataFrame> {
        let uri = location.uri();
        self.lock_tables()?
            .get(&uri)
            .cloned()
            .ok_or(StorageError::NotFound(uri))
    }

    fn write_table(&self, location: &TableLocation, df: &mut DataFrame) -> Result<()> {
        let uri = location.uri();
        if self.rejected_containers.contains(&location.container) {
            return Err(StorageError::Rejected(uri));
        }
        self.lock_tables()?.insert(uri.clone(), df.clone());
        self.writes
            .lock()
            .map_err(|_| StorageError::Backend("in-memory store lock poisoned".to_string()))?
            .push(uri);
        Ok(())
    }
}
