use sqlx::error::ErrorKind;
use thiserror::Error;

/// SQLSTATE raised when text cannot be parsed as the target type (e.g. `'abc'::int`).
const INVALID_TEXT_REPRESENTATION: &str = "22P02";
/// SQLSTATE raised when a numeric value does not fit the target type.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

/// Unified error type for database operations that application code can handle
#[derive(Error, Debug)]
pub enum DbError {
    /// Entity not found by the given identifier
    #[error("Entity not found")]
    NotFound,

    /// A value could not be coerced to the column type
    #[error("Invalid input syntax: {message}")]
    InvalidTextRepresentation { message: String },

    /// A computed value does not fit the column type (e.g. `votes` overflowing `INTEGER`)
    #[error("Numeric value out of range: {message}")]
    NumericValueOutOfRange { message: String },

    /// Unique constraint violation
    #[error("Unique constraint violation")]
    UniqueViolation {
        constraint: Option<String>,
        table: Option<String>,
        message: String,
    },

    /// Foreign key constraint violation
    #[error("Foreign key constraint violation on {}", constraint.as_deref().unwrap_or("<unknown>"))]
    ForeignKeyViolation {
        constraint: Option<String>,
        table: Option<String>,
        message: String,
    },

    /// A required column was given no value
    #[error("Not-null constraint violation on {}", column.as_deref().unwrap_or("<unknown>"))]
    NotNullViolation {
        column: Option<String>,
        table: Option<String>,
        message: String,
    },

    /// Catch-all for non-recoverable errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DbError {
    /// Name of the violated constraint, if the error carries one.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            DbError::UniqueViolation { constraint, .. } | DbError::ForeignKeyViolation { constraint, .. } => constraint.as_deref(),
            _ => None,
        }
    }
}

/// Convert from sqlx::Error using the SQLSTATE class of the underlying database error
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => DbError::NotFound,
            sqlx::Error::Database(db_err) => {
                let constraint = db_err.constraint().map(|s| s.to_string());
                let table = db_err.table().map(|s| s.to_string());
                let message = db_err.message().to_string();

                match db_err.kind() {
                    ErrorKind::UniqueViolation => DbError::UniqueViolation { constraint, table, message },
                    ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation { constraint, table, message },
                    ErrorKind::NotNullViolation => {
                        let column = db_err
                            .try_downcast_ref::<sqlx::postgres::PgDatabaseError>()
                            .and_then(|pg_err| pg_err.column())
                            .map(|s| s.to_string());
                        DbError::NotNullViolation { column, table, message }
                    }
                    _ => match db_err.code().as_deref() {
                        Some(INVALID_TEXT_REPRESENTATION) => DbError::InvalidTextRepresentation { message },
                        Some(NUMERIC_VALUE_OUT_OF_RANGE) => DbError::NumericValueOutOfRange { message },
                        // All other database errors are non-recoverable - convert to anyhow
                        _ => DbError::Other(anyhow::Error::from(err)),
                    },
                }
            }
            _ => DbError::Other(anyhow::Error::from(err)),
        }
    }
}

/// Type alias for database operation results
pub type Result<T> = std::result::Result<T, DbError>;
