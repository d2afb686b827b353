//! Record store boundary.
//!
//! The dashboard only needs `fetch_table(name) -> records`. Stores are
//! shared across the per-source loader threads, hence `Send + Sync`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IngestError, Result};
use crate::record::{RawRecord, parse_records};

/// Source of raw records, addressed by table name.
pub trait RecordStore: Send + Sync + fmt::Debug {
    /// Fetch every record of a table.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::SourceNotFound`] for an unknown table, or any
    /// read/parse failure of the backing storage.
    fn fetch_table(&self, name: &str) -> Result<Vec<RawRecord>>;
}

/// Reads tables from `<root>/<table>.json` exports.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    /// Open a store rooted at an existing directory.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::DirectoryNotFound`] if `root` is not a directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(IngestError::DirectoryNotFound { path: root });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the export file backing a table.
    ///
    /// # Errors
    ///
    /// Rejects names that are empty or would escape the root directory.
    pub fn table_path(&self, name: &str) -> Result<PathBuf> {
        let trimmed = name.trim();
        if trimmed.is_empty()
            || trimmed.starts_with('.')
            || trimmed.contains(['/', '\\'])
        {
            return Err(IngestError::InvalidTableName {
                table: name.to_string(),
            });
        }
        Ok(self.root.join(format!("{trimmed}.json")))
    }
}

impl RecordStore for JsonDirStore {
    fn fetch_table(&self, name: &str) -> Result<Vec<RawRecord>> {
        let path = self.table_path(name)?;
        if !path.is_file() {
            return Err(IngestError::SourceNotFound {
                table: name.to_string(),
            });
        }
        let text = std::fs::read_to_string(&path).map_err(|source| IngestError::FileRead {
            path: path.clone(),
            source,
        })?;
        let raw: serde_json::Value =
            serde_json::from_str(&text).map_err(|source| IngestError::JsonParse {
                path: path.clone(),
                source,
            })?;
        let records = parse_records(&raw)?;
        debug!(
            table = name,
            records = records.len(),
            path = %path.display(),
            "fetched table"
        );
        Ok(records)
    }
}

/// In-memory store, mostly for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: BTreeMap<String, Vec<RawRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_table(mut self, name: impl Into<String>, records: Vec<RawRecord>) -> Self {
        self.insert(name, records);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, records: Vec<RawRecord>) {
        self.tables.insert(name.into(), records);
    }
}

impl RecordStore for MemoryStore {
    fn fetch_table(&self, name: &str) -> Result<Vec<RawRecord>> {
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| IngestError::SourceNotFound {
                table: name.to_string(),
            })
    }
}
