//! Error types for the core table model

use thiserror::Error;

use crate::model::Kind;

/// Errors surfaced by the core data model.
///
/// Every precondition violation is reported synchronously; the core never
/// retries and never downgrades a violation to a default value. The only
/// silent adjustments in the library are construction-time coercion and
/// null-padding during smoothing.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// A column name appeared twice where names must be unique.
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    /// A column name must be a non-empty string.
    #[error("column name must not be empty")]
    EmptyName,

    /// A row or pattern did not have one entry per column.
    #[error("expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Parallel name/kind/data sequences had different lengths.
    #[error("{what} must have the same length as data ({expected}), got {actual}")]
    ArityMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A value could not be coerced to the declared kind.
    #[error("cannot coerce {value} to {kind}")]
    Coerce { value: String, kind: Kind },

    /// A value was neither null nor an instance of the column's kind.
    #[error("column {column} holds {expected}, got {actual}")]
    KindMismatch {
        column: String,
        expected: Kind,
        actual: Kind,
    },

    /// Referenced a column name the table does not declare.
    #[error("no such column: {0}")]
    UnknownColumn(String),

    /// Linear search found no matching element.
    #[error("value {0} not found")]
    NotFound(String),

    /// A row index beyond the current row count.
    #[error("row index {index} out of range for {rows} rows")]
    RowOutOfRange { index: usize, rows: usize },

    /// Two tables did not share the column names an operation requires.
    #[error("tables must have the same columns")]
    SchemaMismatch,

    /// A join would produce two columns with the same name.
    #[error("column {0} exists in both tables")]
    ColumnCollision(String),

    /// The two join-key columns were declared with different kinds.
    #[error("join keys disagree: {left} is {left_kind}, {right} is {right_kind}")]
    JoinKindMismatch {
        left: String,
        left_kind: Kind,
        right: String,
        right_kind: Kind,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
