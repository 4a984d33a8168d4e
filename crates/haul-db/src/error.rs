//! # Store Errors
//!
//! ```text
//! sqlx::Error ─┐
//! MigrateError ├──► DbError ──► CliError (code + exit status)
//! serde_json ──┘
//! ```
//!
//! The app treats a failed rate table save as a warning. A `DbError` only
//! reaches the operator when the store cannot be opened or read.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// The file could not be opened or created: missing directory,
    /// permissions, or not an SQLite file at all.
    #[error("Cannot open store: {0}")]
    ConnectionFailed(String),

    /// An embedded schema file failed or no longer matches what the store
    /// recorded for it.
    #[error("Schema migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected a statement (including `SQLITE_BUSY` after the busy
    /// timeout ran out).
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A stored value could not be turned into JSON text or back.
    #[error("Stored value is not valid JSON: {0}")]
    Serialization(String),

    /// No pooled connection became free before the acquire timeout.
    #[error("No store connection available")]
    PoolExhausted,

    #[error("Store error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::QueryFailed("no rows returned".to_string()),
            sqlx::Error::Database(e) => DbError::QueryFailed(e.message().to_string()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("store already closed".to_string()),
            sqlx::Error::Io(e) => DbError::ConnectionFailed(e.to_string()),
            sqlx::Error::Migrate(e) => DbError::MigrationFailed(e.to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        DbError::Serialization(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlx_error_mapping() {
        let err: DbError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, DbError::PoolExhausted));

        let err: DbError = sqlx::Error::PoolClosed.into();
        assert_eq!(err.to_string(), "Cannot open store: store already closed");

        let err: DbError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.to_string(), "Query failed: no rows returned");
    }

    #[test]
    fn test_json_error_mapping() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DbError = json_err.into();
        assert!(matches!(err, DbError::Serialization(_)));
    }
}
