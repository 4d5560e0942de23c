//! Error types for the table-filter crate.

use thiserror::Error;

use crate::data_type::ColumnDataType;

/// Errors that can occur when resolving columns or applying filter actions.
///
/// Every action either succeeds and returns a new state, or fails with one of
/// these before any state is produced.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The action is not valid for the column's data type.
    #[error("{operation} is not supported for {data_type} column '{column}'")]
    InvalidColumnOperation {
        column: String,
        data_type: ColumnDataType,
        operation: &'static str,
    },

    /// No column with this id is registered.
    #[error("column with id '{0}' not found")]
    UnknownColumn(String),

    /// An option column has no static options, no transform function, and
    /// its accessor does not produce option values.
    #[error(
        "[{column}] either provide static options, a transform function, or ensure the column data conforms to the option shape"
    )]
    Configuration { column: String },

    /// Operator string does not name an operator of the data type.
    #[error("'{operator}' is not a {data_type} operator")]
    UnknownOperator {
        data_type: ColumnDataType,
        operator: String,
    },

    /// Label table could not be parsed.
    #[error("invalid translation table: {0}")]
    Translations(#[from] serde_json::Error),
}

/// Result type for table-filter operations.
pub type Result<T> = std::result::Result<T, FilterError>;
