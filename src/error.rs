//! Error types for the generation pipeline.

use thiserror::Error;

/// Why a `CREATE TABLE` statement could not be turned into a schema model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no CREATE TABLE found")]
    NoCreateTable,
    #[error("no parenthesized table body found")]
    NoBody,
    #[error("no columns parsed")]
    NoColumns,
    /// Only raised in strict mode; lenient parsing drops the clause instead.
    #[error("could not parse column definition: {0}")]
    InvalidColumn(String),
}

/// Failure of [`crate::generate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("SQL contains potentially dangerous commands ({rule})")]
    UnsafeInput { rule: &'static str },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl GenerateError {
    /// Rejected input as opposed to input we failed to understand.
    pub fn is_unsafe_input(&self) -> bool {
        matches!(self, GenerateError::UnsafeInput { .. })
    }
}

/// Failure of the file sink or the record history.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("[IO]: {0}")]
    Io(#[from] std::io::Error),
    #[error("[JSON]: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] crate::validate::ValidationError),
    #[error("migration {0} not found")]
    NotFound(u64),
    #[error("migration {0} has no generated content")]
    EmptyMigration(u64),
}
