//! Error types for pgferry.

use thiserror::Error;

/// The main error type for pgferry operations.
#[derive(Debug, Error)]
pub enum FerryError {
    /// A column name was requested that the result set does not contain.
    #[error("Unknown column '{name}'. Available columns: {}", available.join(", "))]
    UnknownColumn {
        name: String,
        available: Vec<String>,
    },

    /// A column value could not be decoded into the requested type.
    #[error("Decode error for column '{column}': {source}")]
    Decode {
        column: String,
        #[source]
        source: sqlx::Error,
    },

    /// The cursor has no current row (before the first advance or after the end).
    #[error("Cursor has no current row")]
    NoCurrentRow,

    /// A field index was outside the record's column list.
    #[error("Field index {index} out of range for {count} columns")]
    FieldOutOfRange { index: usize, count: usize },

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error.
    #[error("Execution error: {0}")]
    Execution(String),

    /// Bulk COPY error.
    #[error("Copy error: {0}")]
    Copy(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FerryError {
    /// Create an unknown-column error listing what the result set does have.
    pub fn unknown_column(name: impl Into<String>, available: Vec<String>) -> Self {
        Self::UnknownColumn {
            name: name.into(),
            available,
        }
    }

    /// Create a decode error for the given column.
    pub fn decode(column: impl Into<String>, source: sqlx::Error) -> Self {
        Self::Decode {
            column: column.into(),
            source,
        }
    }
}

/// Result type alias for pgferry operations.
pub type FerryResult<T> = Result<T, FerryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_column_display() {
        let err =
            FerryError::unknown_column("emial", vec!["id".to_string(), "email".to_string()]);
        assert_eq!(
            err.to_string(),
            "Unknown column 'emial'. Available columns: id, email"
        );
    }

    #[test]
    fn test_field_out_of_range_display() {
        let err = FerryError::FieldOutOfRange { index: 5, count: 3 };
        assert_eq!(err.to_string(), "Field index 5 out of range for 3 columns");
    }
}
