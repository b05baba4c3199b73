use thiserror::Error;

/// Convenience result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Error type returned by table construction and query operations.
///
/// All validation errors are raised before any row is processed; a failed operation never
/// produces a partial result. Panics raised by caller-supplied transform/predicate/combine
/// functions are not caught or wrapped.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A name-based selection referenced a column that does not exist.
    #[error("column not found: '{column}'")]
    ColumnNotFound { column: String },

    /// An ordinal selection was given a negative position.
    #[error("invalid column position: {position}")]
    InvalidPosition { position: i64 },

    /// An ordinal selection was given a position past the last column.
    #[error("column position {position} out of range: table has {column_count} columns")]
    PositionOutOfRange { position: i64, column_count: usize },

    /// A typed map was given an element descriptor it does not recognize.
    #[error("invalid output element type: {message}")]
    InvalidOutputType { message: String },

    /// The backing table is malformed (ragged columns, duplicate names, mixed value types),
    /// or a mapped output value does not fit the shape established for the result.
    #[error("schema error: {message}")]
    Schema { message: String },
}
