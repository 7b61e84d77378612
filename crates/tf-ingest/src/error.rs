//! Error types for guest list ingestion and editing.

use std::path::PathBuf;

use thiserror::Error;
use tf_model::SchemaError;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("row {row} out of range ({len} rows)")]
    RowOutOfRange { row: usize, len: usize },

    #[error("column '{column}' not found in guest list")]
    UnknownColumn { column: String },

    #[error("failed to write guest CSV: {message}")]
    CsvWrite { message: String },
}

pub type Result<T> = std::result::Result<T, IngestError>;
