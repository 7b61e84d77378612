use thiserror::Error;

use crate::mapping::CanonicalField;

/// Raised when a guest list cannot be turned into a registry under a mapping.
///
/// Callers must ask the uploader to re-map columns; a partial registry is
/// never produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("column '{column}' mapped to {field} not found in CSV header")]
    MissingColumn {
        field: CanonicalField,
        column: String,
    },
    #[error("failed to parse guest CSV: {message}")]
    Csv { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid event id: {0:?}")]
    InvalidEventId(String),
    #[error("invalid admin token: {0:?}")]
    InvalidToken(String),
}
