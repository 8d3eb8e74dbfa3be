//! # Database Errors

use thiserror::Error;

/// Result type for pool operations
pub type DbResult<T> = Result<T, DbError>;

/// Errors raised while running a statement through the pool
#[derive(Debug, Clone, Error)]
pub enum DbError {
    /// Store unreachable, pool closed, or no connection within the timeout
    #[error("Connection error: {0}")]
    Connection(String),

    /// The store rejected or failed the statement
    #[error("Query error: {0}")]
    Query(String),

    /// A returned row did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Pool settings could not be turned into connect options
    #[error("Invalid database configuration: {0}")]
    Config(String),
}

impl DbError {
    /// Whether the failure is about reaching the store rather than the statement
    pub fn is_connection(&self) -> bool {
        matches!(self, DbError::Connection(_))
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => DbError::Connection(err.to_string()),
            sqlx::Error::Configuration(_) => DbError::Config(err.to_string()),
            sqlx::Error::Database(db_err) => DbError::Query(db_err.message().to_string()),
            sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. } => DbError::Decode(err.to_string()),
            other => DbError::Query(other.to_string()),
        }
    }
}
