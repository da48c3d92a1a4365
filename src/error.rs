/// Error types shared by the table substrate and the query engines.
///
/// Every variant describes a programming error (a missing column, a value of
/// the wrong type). Data-shape outcomes such as an empty filter result are
/// never errors.
use thiserror::Error;

use crate::column::ColumnType;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Type mismatch in column '{column}': expected {expected:?}, got {found}")]
    TypeMismatch {
        column: String,
        expected: ColumnType,
        found: String,
    },

    #[error("Column '{0}' is not nullable")]
    NotNullable(String),

    #[error("Missing value for column '{0}'")]
    MissingValue(String),

    #[error("Row {row} out of range [0, {len})")]
    RowOutOfRange { row: usize, len: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, TableError>;
