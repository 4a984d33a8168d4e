//! # Validation Module
//!
//! Input coercion and operator-edit validation.
//!
//! ## Two Kinds of Input
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Input Boundaries                                   │
//! │                                                                         │
//! │  Numbers (distance, floors, fees, quantities, ...)                     │
//! │  ├── CLI argument   ──► coerce_number / coerce_count / coerce_money    │
//! │  ├── Persisted JSON ──► lenient::number (serde)                        │
//! │  └── Imported JSON  ──► lenient::number (serde)                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  NEVER an error: empty, non-numeric, NaN, ±∞, negative → 0             │
//! │                                                                         │
//! │  Identity (item ids, labels)                                           │
//! │  ├── items add / update ──► validate_item_id, validate_item_label      │
//! │  └── config import     ──► validate_unique_ids                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  ValidationError, shown to the operator, nothing changes               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use haul_core::validation::{coerce_count, coerce_number};
//!
//! assert_eq!(coerce_number("12.5"), 12.5);
//! assert_eq!(coerce_number("twelve"), 0.0);
//! assert_eq!(coerce_count("-3"), 0);
//! assert_eq!(coerce_count("2.9"), 2);
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::LineItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a line item id.
pub const MAX_ITEM_ID_LEN: usize = 64;

/// Maximum length of a line item label.
pub const MAX_ITEM_LABEL_LEN: usize = 100;

/// Maximum length of a unit label ("대", "세트", ...).
pub const MAX_UNIT_LABEL_LEN: usize = 20;

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Clamps a real number to `[0, +∞)`, mapping NaN and infinities to zero.
#[inline]
pub fn clamp_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parses a user-typed number, falling back to zero.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Empty text is zero (a cleared form field)
/// - Anything that does not parse, or parses to NaN/±∞, is zero
/// - Negative values are clamped to zero
pub fn coerce_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .map(clamp_non_negative)
        .unwrap_or(0.0)
}

/// Converts a real number to a non-negative count, truncating any fraction.
pub fn count_from_f64(value: f64) -> u32 {
    let value = clamp_non_negative(value).trunc();
    if value >= u32::MAX as f64 {
        u32::MAX
    } else {
        value as u32
    }
}

/// Parses a user-typed count (floors, helpers, item quantity).
pub fn coerce_count(raw: &str) -> u32 {
    count_from_f64(coerce_number(raw))
}

/// Parses a user-typed amount of money, rounding to whole units.
pub fn coerce_money(raw: &str) -> Money {
    Money::from_f64_rounded(coerce_number(raw))
}

// =============================================================================
// Lenient Serde Helpers
// =============================================================================

/// Deserializers that coerce instead of failing.
///
/// Used through `#[serde(deserialize_with = "...")]` on rate table fields so
/// that one bad value in a persisted or pasted table does not discard the
/// rest of it.
pub mod lenient {
    use serde::de::{DeserializeOwned, Error as _};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::{clamp_non_negative, coerce_number};
    use crate::DEFAULT_UNIT_LABEL;

    /// Any JSON value as a non-negative real number.
    pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(n) => n.as_f64().map(clamp_non_negative).unwrap_or(0.0),
            Value::String(s) => coerce_number(&s),
            _ => 0.0,
        })
    }

    /// Any JSON value as text; numbers are stringified, everything else is empty.
    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        })
    }

    /// Unit label text; blank falls back to the default counting unit.
    pub fn unit_label<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = string(deserializer)?;
        if label.trim().is_empty() {
            Ok(DEFAULT_UNIT_LABEL.to_string())
        } else {
            Ok(label)
        }
    }

    /// A JSON array of `T`; anything that is not an array is an empty list.
    ///
    /// Array entries must still deserialize as `T`.
    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(entries) => entries
                .into_iter()
                .map(|entry| serde_json::from_value(entry).map_err(D::Error::custom))
                .collect(),
            _ => Ok(Vec::new()),
        }
    }
}

// =============================================================================
// Line Item Validators
// =============================================================================

/// Validates a line item id.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - Letters, digits, hyphens and underscores only (`bed_s`, `itm_3fa9c1`)
///
/// ## Example
/// ```rust
/// use haul_core::validation::validate_item_id;
///
/// assert!(validate_item_id("fridge").is_ok());
/// assert!(validate_item_id("").is_err());
/// assert!(validate_item_id("has space").is_err());
/// ```
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "item id".to_string(),
        });
    }

    if id.chars().count() > MAX_ITEM_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "item id".to_string(),
            max: MAX_ITEM_ID_LEN,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "item id".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a line item label.
pub fn validate_item_label(label: &str) -> ValidationResult<()> {
    let label = label.trim();

    if label.is_empty() {
        return Err(ValidationError::Required {
            field: "label".to_string(),
        });
    }

    if label.chars().count() > MAX_ITEM_LABEL_LEN {
        return Err(ValidationError::TooLong {
            field: "label".to_string(),
            max: MAX_ITEM_LABEL_LEN,
        });
    }

    Ok(())
}

/// Validates a unit label. Blank is allowed and means the default unit.
pub fn validate_unit_label(unit: &str) -> ValidationResult<()> {
    if unit.trim().chars().count() > MAX_UNIT_LABEL_LEN {
        return Err(ValidationError::TooLong {
            field: "unit label".to_string(),
            max: MAX_UNIT_LABEL_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Checks that no two line items share an id.
///
/// Quantities are keyed by id, so a repeated id would make two rows of
/// the rate table share one quantity.
pub fn validate_unique_ids(items: &[LineItem]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "item id".to_string(),
                value: item.id.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
