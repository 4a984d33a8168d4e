//! # Money Module
//!
//! Provides the `Money` type for quote amounts.
//!
//! ## Whole Currency Units
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHY INTEGERS?                                                          │
//! │                                                                         │
//! │  Quotes are priced in won, which has no minor unit in practice.        │
//! │  Item unit prices, breakdown lines and totals are whole won:           │
//! │                                                                         │
//! │    base fee 120,000 + fridge 20,000 × 2 = 160,000                      │
//! │                                                                         │
//! │  Rate table fees, kilometres and the weekend rate may be fractional.   │
//! │  Pricing carries them unrounded and rounds the final total once        │
//! │  (see `from_f64_rounded` and `types::Rate`).                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use haul_core::money::Money;
//!
//! let fridge = Money::from_units(20_000);
//! let two = fridge.multiply_quantity(2);
//! assert_eq!(two.units(), 40_000);
//! assert_eq!(two.to_string(), "40,000");
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use crate::validation::{clamp_non_negative, lenient};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units (won).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic stays simple; values built through the
///   coercion helpers are never negative.
/// - **Single field tuple struct**: serializes as a bare JSON integer, so
///   the persisted rate table reads `"baseFee": 120000`.
/// - **Lenient Deserialize**: a missing, `null`, textual or negative amount
///   becomes zero instead of failing the whole rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Creates a Money value from a real number, rounding half away from zero.
    ///
    /// NaN, infinities and negative values become zero.
    ///
    /// ## Example
    /// ```rust
    /// use haul_core::money::Money;
    ///
    /// assert_eq!(Money::from_f64_rounded(1500.5).units(), 1501);
    /// assert_eq!(Money::from_f64_rounded(1500.4).units(), 1500);
    /// assert_eq!(Money::from_f64_rounded(f64::NAN).units(), 0);
    /// assert_eq!(Money::from_f64_rounded(-20.0).units(), 0);
    /// ```
    pub fn from_f64_rounded(value: f64) -> Self {
        // `as` saturates at i64::MAX for absurd inputs
        Money(clamp_non_negative(value).round() as i64)
    }

    /// Returns the value in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Item: 장롱(2~3칸) 30,000
    /// Quantity: 2
    ///      │
    ///      ▼
    /// multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line amount: 60,000
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays the amount with ko-KR digit grouping (`1,234,567`).
///
/// The currency suffix (`원`) is left to the caller.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if self.0 < 0 {
            write!(f, "-{}", grouped)
        } else {
            f.write_str(&grouped)
        }
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient::number(deserializer).map(Money::from_f64_rounded)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by a count (floors, helpers, item quantities).
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
