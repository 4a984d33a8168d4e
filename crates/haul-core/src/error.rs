//! # Error Types
//!
//! Domain-specific error types for haul-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  haul-core errors (this file)                                          │
//! │  ├── CoreError        - Rate table / session rule violations           │
//! │  └── ValidationError  - Operator input that cannot be accepted         │
//! │                                                                         │
//! │  haul-db errors (separate crate)                                       │
//! │  └── DbError          - Key-value store failures                       │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr + exit code     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pricing and reconciliation never return these: bad numbers are coerced
//! to zero instead. Errors only come from operator edits and imports.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Imported or exported configuration text is not a usable rate table.
    ///
    /// ## When This Occurs
    /// - Pasted text is not JSON at all
    /// - JSON is valid but not an object (`[]`, `42`, `"text"`)
    /// - An `items` entry is not an object
    #[error("Invalid rate configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A line item id is not part of the current rate table.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::InvalidConfig {
            reason: err.to_string(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for operator edits.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., an item id with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two line items sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
