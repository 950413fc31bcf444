//! Field validation for generation and save requests.

use thiserror::Error;

pub const NAME_MAX_LEN: usize = 255;
pub const NOTES_MAX_LEN: usize = 1000;
pub const DEFAULT_SQL_MIN_LEN: usize = 10;
pub const DEFAULT_SQL_MAX_LEN: usize = 50_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Migration name must be a valid identifier (letters, numbers, underscores only, starting with letter or underscore).")]
    MigrationName,
    #[error("{field} may not be greater than {max} characters.")]
    TooLong { field: &'static str, max: usize },
    #[error("SQL schema must be at least {0} characters long.")]
    SqlTooShort(usize),
    #[error("SQL schema is too large. Maximum {0} characters allowed.")]
    SqlTooLong(usize),
    #[error("File name must contain only letters, numbers, and underscores.")]
    FileName,
}

/// Accepted SQL input size, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlLimits {
    pub min: usize,
    pub max: usize,
}

impl Default for SqlLimits {
    fn default() -> Self {
        Self {
            min: DEFAULT_SQL_MIN_LEN,
            max: DEFAULT_SQL_MAX_LEN,
        }
    }
}

fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// `^[A-Za-z_][A-Za-z0-9_]*$`, at most 255 characters.
pub fn migration_name(name: &str) -> Result<(), ValidationError> {
    max_len("Migration name", name, NAME_MAX_LEN)?;
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(ValidationError::MigrationName);
    }
    Ok(())
}

pub fn sql_schema(sql: &str, limits: SqlLimits) -> Result<(), ValidationError> {
    let len = sql.chars().count();
    if len < limits.min {
        return Err(ValidationError::SqlTooShort(limits.min));
    }
    if len > limits.max {
        return Err(ValidationError::SqlTooLong(limits.max));
    }
    Ok(())
}

/// `^[A-Za-z0-9_]+$`, at most 255 characters.
pub fn file_name(name: &str) -> Result<(), ValidationError> {
    max_len("File name", name, NAME_MAX_LEN)?;
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::FileName);
    }
    Ok(())
}

pub fn notes(notes: Option<&str>) -> Result<(), ValidationError> {
    notes.map_or(Ok(()), |n| max_len("Notes", n, NOTES_MAX_LEN))
}
