//! Filesystem store holding each table as one Parquet file.
//!
//! A location maps to `<root>/<connector>/<container>/<file_name>`. Writes
//! go to a hidden sibling file first and are renamed over the target, so a
//! reader never sees a half-written table.

use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

use deid_model::{REDACTED_VALUE, StorageConfig, TableLocation};
use polars::prelude::{DataFrame, ParquetReader, ParquetWriter, SerReader};
use tracing::{debug, info};

use crate::error::{Result, StorageError};
use crate::store::TableStore;

#[derive(Clone)]
pub struct LocalParquetStore {
    root: PathBuf,
    accessor: Option<String>,
    key: Option<String>,
}

impl LocalParquetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            accessor: None,
            key: None,
        }
    }

    /// Open the store for a run, rooted at `config.root`.
    ///
    /// The credential pair is kept on the store as given. The local backend
    /// reads and writes without it.
    ///
    /// # Errors
    ///
    /// [`StorageError::Unconfigured`] when no root directory is set.
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        let root = config.root.clone().ok_or_else(|| {
            StorageError::Unconfigured("STORAGE_ROOT is not set".to_string())
        })?;
        let store = Self::new(root).with_credentials(config.accessor(), config.key());
        info!(
            root = %store.root.display(),
            account = %config.account,
            accessor = store.accessor().unwrap_or("-"),
            key = if store.has_key() { REDACTED_VALUE } else { "-" },
            "opened local storage"
        );
        Ok(store)
    }

    #[must_use]
    pub fn with_credentials(mut self, accessor: Option<&str>, key: Option<&str>) -> Self {
        self.accessor = accessor.map(str::to_string);
        self.key = key.map(str::to_string);
        self
    }

    /// Property name the key is presented under.
    pub fn accessor(&self) -> Option<&str> {
        self.accessor.as_deref()
    }

    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    /// Filesystem path backing `location`.
    ///
    /// # Errors
    ///
    /// Rejects empty components and components that would escape the root.
    pub fn path_for(&self, location: &TableLocation) -> Result<PathBuf> {
        let parts = [
            ("connector", location.connector.as_str()),
            ("container", location.container.as_str()),
            ("file name", location.file_name.as_str()),
        ];
        for (label, part) in parts {
            if part.is_empty() || part == "." || part == ".." || part.contains(['/', '\\']) {
                return Err(StorageError::InvalidLocation {
                    uri: location.uri(),
                    reason: format!("{label} {part:?} is not a single path component"),
                });
            }
        }
        Ok(self
            .root
            .join(&location.connector)
            .join(&location.container)
            .join(&location.file_name))
    }
}

impl fmt::Debug for LocalParquetStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalParquetStore")
            .field("root", &self.root)
            .field("accessor", &self.accessor)
            .field("key", &self.key.as_ref().map(|_| REDACTED_VALUE))
            .finish()
    }
}

impl TableStore for LocalParquetStore {
    fn read_table(&self, location: &TableLocation) -> Result<DataFrame> {
        let path = self.path_for(location)?;
        debug!(path = %path.display(), "reading table");
        let file = File::open(&path).map_err(|error| match error.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(location.uri()),
            _ => StorageError::Io {
                uri: location.uri(),
                source: error,
            },
        })?;
        ParquetReader::new(file)
            .finish()
            .map_err(|source| StorageError::Parquet {
                uri: location.uri(),
                source,
            })
    }

    fn write_table(&self, location: &TableLocation, df: &mut DataFrame) -> Result<()> {
        let path = self.path_for(location)?;
        let io_error = |source: io::Error| StorageError::Io {
            uri: location.uri(),
            source,
        };
        let parent = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(parent).map_err(io_error)?;

        let staging = parent.join(format!(".{}.partial", location.file_name));
        let written = File::create(&staging)
            .map_err(io_error)
            .and_then(|file| {
                ParquetWriter::new(file)
                    .finish(df)
                    .map_err(|source| StorageError::Parquet {
                        uri: location.uri(),
                        source,
                    })
            })
            .and_then(|_| fs::rename(&staging, &path).map_err(io_error));
        if written.is_err() {
            let _ = fs::remove_file(&staging);
        }
        written?;

        info!(
            uri = %location.uri(),
            rows = df.height(),
            columns = df.width(),
            "wrote table"
        );
        Ok(())
    }
}
