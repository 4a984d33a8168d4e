//! # CLI Error Type
//!
//! Unified error type for `haul` commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in haul                                   │
//! │                                                                         │
//! │  Command Function                                                      │
//! │  Result<(), CliError>                                                  │
//! │         │                                                               │
//! │         ├── DbError::ConnectionFailed ──────┐                           │
//! │         ├── CoreError::InvalidConfig ───────┤                           │
//! │         ├── CoreError::Validation ──────────┼──► CliError { code, msg } │
//! │         └── std::io::Error ─────────────────┘          │                │
//! │                                                        ▼                │
//! │  main(): "error: [VALIDATION_ERROR] ..." on stderr, exit code by code   │
//! │                                                                         │
//! │  NOT errors: bad numbers (coerced to 0) and failed rate table saves     │
//! │  (logged with warn!, the run continues).                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use haul_core::CoreError;
use haul_db::DbError;

/// Error returned from CLI commands.
#[derive(Debug, Clone)]
pub struct CliError {
    /// Machine-readable error code, also selects the exit code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Item or record not found
    NotFound,

    /// Operator input rejected (bad id, duplicate id, malformed argument)
    ValidationError,

    /// Imported rate table could not be parsed
    InvalidConfig,

    /// Store could not be opened or queried
    DatabaseError,

    /// Reading or writing a file or stream failed
    IoError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Code as printed on stderr.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// Process exit status for this code.
    ///
    /// `2` is left to clap for usage errors.
    pub const fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::Internal => 1,
            ErrorCode::ValidationError => 3,
            ErrorCode::NotFound => 4,
            ErrorCode::InvalidConfig => 5,
            ErrorCode::DatabaseError => 6,
            ErrorCode::IoError => 7,
        }
    }
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        CliError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Converts store errors to CLI errors.
impl From<DbError> for CliError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(e) => {
                CliError::new(ErrorCode::DatabaseError, format!("Cannot open store: {}", e))
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Migration failed: {}", e);
                CliError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) | DbError::Internal(e) => {
                tracing::error!("Database operation failed: {}", e);
                CliError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::Serialization(e) => CliError::internal(e),
            DbError::PoolExhausted => {
                CliError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
        }
    }
}

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemNotFound(id) => CliError::not_found("Item", &id),
            CoreError::InvalidConfig { .. } => {
                CliError::new(ErrorCode::InvalidConfig, err.to_string())
            }
            CoreError::Validation(e) => CliError::validation(e.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::new(ErrorCode::IoError, err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::internal(err.to_string())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;
    use haul_core::ValidationError;

    #[test]
    fn test_core_error_mapping() {
        let err: CliError = CoreError::ItemNotFound("piano".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.to_string(), "[NOT_FOUND] Item not found: piano");

        let err: CliError = CoreError::InvalidConfig {
            reason: "expected a JSON object".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidConfig);
        assert!(err.message.contains("expected a JSON object"));

        let err: CliError = CoreError::Validation(ValidationError::Duplicate {
            field: "item id".to_string(),
            value: "fridge".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("fridge"));
    }

    #[test]
    fn test_db_error_mapping() {
        let err: CliError = DbError::ConnectionFailed("disk full".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);

        let err: CliError = DbError::QueryFailed("syntax".to_string()).into();
        assert_eq!(err.message, "Database operation failed");
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            ErrorCode::NotFound,
            ErrorCode::ValidationError,
            ErrorCode::InvalidConfig,
            ErrorCode::DatabaseError,
            ErrorCode::IoError,
            ErrorCode::Internal,
        ];
        let mut exits: Vec<u8> = codes.iter().map(ErrorCode::exit_code).collect();
        exits.sort_unstable();
        exits.dedup();
        assert_eq!(exits.len(), codes.len());
        assert!(!exits.contains(&0));
        assert!(!exits.contains(&2));
    }
}
