//! Storage error types.

use std::path::PathBuf;

use thiserror::Error;
use tf_ingest::IngestError;
use tf_model::SchemaError;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Guest list or metadata object is absent.
    #[error("event not found: {event_id}")]
    NotFound { event_id: String },

    #[error("invalid storage key: {key:?}")]
    InvalidKey { key: String },

    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {key}: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize event metadata: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("could not allocate an unused event id")]
    IdExhausted,

    #[error("object store lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = StoreError::NotFound {
            event_id: "abc123".to_string(),
        };
        assert_eq!(err.to_string(), "event not found: abc123");
    }
}
