//! # Domain Types
//!
//! Core domain types for quoting a carry-down job.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │  QuoteRequest   │   │ QuoteBreakdown  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (key)       │   │  distance_km    │   │  base_fee       │       │
//! │  │  label          │   │  floors         │   │  items_subtotal │       │
//! │  │  unit_price     │   │  has_elevator   │   │  ...surcharges  │       │
//! │  │  unit_label     │   │  helpers        │   │  subtotal       │       │
//! │  └─────────────────┘   │  weekend        │   │  total          │       │
//! │                        │  quantities     │   └─────────────────┘       │
//! │  ┌─────────────────┐   └─────────────────┘                             │
//! │  │      Rate       │                                                    │
//! │  │  f64, as entered│   RateConfig lives in `rate_config`.              │
//! │  │  0.2 = +20%     │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::money::Money;
use crate::validation::{clamp_non_negative, lenient};
use crate::DEFAULT_UNIT_LABEL;

// =============================================================================
// Rate
// =============================================================================

/// A non-negative rate table number, kept exactly as the operator entered it.
///
/// Used for the fees, the per-km charge and the weekend surcharge fraction
/// (`0.2` = +20%). Pricing multiplies these unrounded and rounds only the
/// final total, so `1500.5` per km or a `0.33333` weekend rate is never
/// cut short on load.
///
/// Whole values serialize as JSON integers (`120000`, not `120000.0`);
/// anything else serializes as the original real number.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Rate(f64);

impl Rate {
    /// Largest whole value written as a JSON integer (2^53).
    const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

    /// Creates a rate. NaN, infinities and negative values become zero.
    pub fn new(value: f64) -> Self {
        Rate(clamp_non_negative(value))
    }

    /// Creates a rate from whole currency units.
    pub fn from_units(units: i64) -> Self {
        Rate::new(units as f64)
    }

    #[inline]
    pub const fn zero() -> Self {
        Rate(0.0)
    }

    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Rounded to whole won, for breakdown lines.
    pub fn to_money(&self) -> Money {
        Money::from_f64_rounded(self.0)
    }

    fn is_whole(&self) -> bool {
        self.0.fract() == 0.0 && self.0 <= Self::MAX_EXACT_INTEGER
    }
}

/// Shortest text that reads back to the same value (`120000`, `0.33333`).
impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Rate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_whole() {
            serializer.serialize_u64(self.0 as u64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient::number(deserializer).map(Rate::new)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// Prefix of generated item ids.
pub const GENERATED_ID_PREFIX: &str = "itm_";

/// Placeholder label of a new item.
pub const BLANK_ITEM_LABEL: &str = "새 품목";

fn default_unit_label() -> String {
    DEFAULT_UNIT_LABEL.to_string()
}

/// One priced, countable entry of the rate table (a fridge, a wardrobe...).
///
/// ## JSON Shape
/// ```json
/// { "id": "fridge", "label": "냉장고(중/대)", "unitPrice": 20000, "unitLabel": "대" }
/// ```
/// `price` is accepted as an alias of `unitPrice`, and any `type` field is
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Key into `QuoteRequest::quantities`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,

    /// Display name shown to the customer.
    #[serde(default, deserialize_with = "lenient::string")]
    pub label: String,

    /// Price of one unit, whole currency units.
    #[serde(default, alias = "price")]
    pub unit_price: Money,

    /// Counting word shown after the quantity ("대", "세트", "개").
    #[serde(
        default = "default_unit_label",
        deserialize_with = "lenient::unit_label"
    )]
    pub unit_label: String,
}

impl LineItem {
    /// Creates a line item. A blank unit label becomes the default unit.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        unit_price: Money,
        unit_label: impl Into<String>,
    ) -> Self {
        let unit_label = unit_label.into();
        LineItem {
            id: id.into(),
            label: label.into(),
            unit_price,
            unit_label: if unit_label.trim().is_empty() {
                default_unit_label()
            } else {
                unit_label
            },
        }
    }

    /// A fresh row for the operator to fill in.
    ///
    /// Gets a generated `itm_` id, the placeholder label `새 품목`, the
    /// default unit and a zero price.
    pub fn blank() -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        LineItem::new(
            format!("{}{}", GENERATED_ID_PREFIX, &suffix[..6]),
            BLANK_ITEM_LABEL,
            Money::zero(),
            DEFAULT_UNIT_LABEL,
        )
    }

    /// Price of `qty` units.
    #[inline]
    pub fn line_amount(&self, qty: u32) -> Money {
        self.unit_price.multiply_quantity(qty)
    }
}

// =============================================================================
// Quote Request
// =============================================================================

/// One customer's job parameters.
///
/// ## Invariant
/// After every rate table item change, `quantities` holds exactly one key
/// per current `LineItem::id` (see [`crate::reconcile`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Round-trip distance in kilometres.
    pub distance_km: f64,

    /// Floors the items are carried down.
    pub floors: u32,

    /// With an elevator the floor surcharge does not apply.
    pub has_elevator: bool,

    /// Extra helpers on the crew.
    pub helpers: u32,

    /// Weekend or night job.
    pub weekend: bool,

    /// Quantity per line item id.
    pub quantities: BTreeMap<String, u32>,
}

impl Default for QuoteRequest {
    /// A fresh form: 8 km, first floor with an elevator, no helpers,
    /// weekday, nothing selected yet.
    fn default() -> Self {
        QuoteRequest {
            distance_km: 8.0,
            floors: 1,
            has_elevator: true,
            helpers: 0,
            weekend: false,
            quantities: BTreeMap::new(),
        }
    }
}

impl QuoteRequest {
    /// Creates a default request with a zero quantity for every item.
    pub fn for_items(items: &[LineItem]) -> Self {
        crate::reconcile::reconcile(QuoteRequest::default(), items)
    }

    /// Quantity entered for an item id; zero when the id is unknown.
    #[inline]
    pub fn quantity(&self, item_id: &str) -> u32 {
        self.quantities.get(item_id).copied().unwrap_or(0)
    }

    /// Sets the distance, clamping NaN and negative values to zero.
    pub fn set_distance_km(&mut self, km: f64) {
        self.distance_km = clamp_non_negative(km);
    }
}

// =============================================================================
// Quote Breakdown
// =============================================================================

/// Itemized price of a request against a rate table.
///
/// Produced only by [`crate::pricing::price`]; never edited afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBreakdown {
    pub base_fee: Money,
    pub items_subtotal: Money,
    pub distance_surcharge: Money,
    pub floor_surcharge: Money,
    pub helper_surcharge: Money,
    pub subtotal: Money,
    /// `1.0` on weekdays, `1 + rate` on weekends.
    pub weekend_multiplier: f64,
    pub total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
