//! Error types for record ingestion.

use std::path::PathBuf;

use dash_model::ModelError;
use thiserror::Error;

/// Errors that can occur while fetching or normalizing records.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Records violate the `{id, fields}` contract.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The record store has no table with this name.
    #[error("table not found: {table}")]
    SourceNotFound { table: String },

    /// Table names map onto file names and must not contain separators.
    #[error("invalid table name: {table:?}")]
    InvalidTableName { table: String },

    /// Record store root directory is missing.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read a table file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Table file is not valid JSON.
    #[error("failed to parse JSON {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

impl IngestError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Model(ModelError::MalformedInput(message.into()))
    }
}
