//! # Rate Configuration
//!
//! The operator-editable pricing schedule.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     RateConfig Lifecycle                                │
//! │                                                                         │
//! │  startup ──► load(persisted) ──┬── well-formed JSON ──► parsed table    │
//! │                                └── missing / broken ──► default table   │
//! │                                                                         │
//! │  operator edit ──► set_field / set_items ──► save                       │
//! │                                                                         │
//! │  import text ──► import() ──┬── Ok  ──► replace() ──► save              │
//! │                             └── Err ──► table untouched, error shown    │
//! │                                                                         │
//! │  reset ──► replace(RateConfig::default()) ──► save                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## JSON Shape
//! ```json
//! {
//!   "bizName": "", "bizPhone": "", "bizEmail": "",
//!   "baseFee": 120000,
//!   "baseDistanceKm": 10.0,
//!   "extraPerKm": 1000,
//!   "noElevatorPerFloor": 5000,
//!   "weekendRateMultiplierAdd": 0.2,
//!   "helperFee": 50000,
//!   "items": [ { "id": "fridge", "label": "냉장고(중/대)", "unitPrice": 20000, "unitLabel": "대" } ]
//! }
//! ```
//! Older tables spelled two fields `noElevPerFloor` and `weekendRate`;
//! both are still read. Absent or non-numeric numbers read as zero.
//! Fees and the weekend rate keep every decimal they were entered with
//! (see [`Rate`]); an exported table reads back to the same values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{LineItem, Rate};
use crate::validation::{coerce_number, lenient, validate_unique_ids};

/// Built-in sample schedule: (id, label, unit price, unit label).
const DEFAULT_ITEMS: &[(&str, &str, i64, &str)] = &[
    ("fridge", "냉장고(중/대)", 20_000, "대"),
    ("washer", "세탁기", 15_000, "대"),
    ("drum", "드럼 세탁기", 20_000, "대"),
    ("bed_s", "침대(싱글/더블)", 10_000, "세트"),
    ("bed_l", "침대(대형)", 20_000, "세트"),
    ("wardrobe", "장롱(2~3칸)", 30_000, "개"),
    ("desk", "책상/책장", 10_000, "개"),
    ("small", "소형가구", 5_000, "개"),
];

// =============================================================================
// Rate Config
// =============================================================================

/// The pricing schedule used for every quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateConfig {
    /// Business name printed on quotes.
    #[serde(rename = "bizName", default, deserialize_with = "lenient::string")]
    pub business_name: String,

    /// Business phone printed on quotes.
    #[serde(rename = "bizPhone", default, deserialize_with = "lenient::string")]
    pub business_phone: String,

    /// Business email printed on quotes.
    #[serde(rename = "bizEmail", default, deserialize_with = "lenient::string")]
    pub business_email: String,

    /// Flat fee charged on every job.
    #[serde(default)]
    pub base_fee: Rate,

    /// Kilometres included in the base fee.
    #[serde(default, deserialize_with = "lenient::number")]
    pub base_distance_km: f64,

    /// Charge per kilometre beyond `base_distance_km`.
    #[serde(default)]
    pub extra_per_km: Rate,

    /// Charge per floor when there is no elevator.
    #[serde(default, alias = "noElevPerFloor")]
    pub no_elevator_per_floor: Rate,

    /// Weekend/night surcharge added to the ×1 multiplier.
    #[serde(
        rename = "weekendRateMultiplierAdd",
        alias = "weekendRate",
        default
    )]
    pub weekend_rate: Rate,

    /// Charge per extra helper.
    #[serde(default)]
    pub helper_fee: Rate,

    /// Priced items in display order.
    #[serde(default, deserialize_with = "lenient::list")]
    pub items: Vec<LineItem>,
}

impl Default for RateConfig {
    /// The sample schedule a fresh installation starts with.
    ///
    /// ## Default Values
    /// - Base fee 120,000 including 10 km
    /// - 1,000 per extra km
    /// - 5,000 per floor without elevator
    /// - +20% on weekends/nights
    /// - 50,000 per helper
    /// - 8 household items
    fn default() -> Self {
        RateConfig {
            business_name: String::new(),
            business_phone: String::new(),
            business_email: String::new(),
            base_fee: Rate::from_units(120_000),
            base_distance_km: 10.0,
            extra_per_km: Rate::from_units(1_000),
            no_elevator_per_floor: Rate::from_units(5_000),
            weekend_rate: Rate::new(0.2),
            helper_fee: Rate::from_units(50_000),
            items: DEFAULT_ITEMS
                .iter()
                .map(|&(id, label, price, unit)| {
                    LineItem::new(id, label, Money::from_units(price), unit)
                })
                .collect(),
        }
    }
}

impl RateConfig {
    /// Loads the persisted table, falling back to the default schedule.
    ///
    /// Never fails: a missing record, broken JSON or a non-object value
    /// all yield `RateConfig::default()`.
    ///
    /// ## Example
    /// ```rust
    /// use haul_core::RateConfig;
    ///
    /// assert_eq!(RateConfig::load(None), RateConfig::default());
    /// assert_eq!(RateConfig::load(Some("{oops")), RateConfig::default());
    ///
    /// let cfg = RateConfig::load(Some(r#"{"baseFee": 90000}"#));
    /// assert_eq!(cfg.base_fee.value(), 90_000.0);
    /// assert!(cfg.items.is_empty());
    /// ```
    pub fn load(persisted: Option<&str>) -> Self {
        persisted
            .and_then(|text| Self::parse(text).ok())
            .unwrap_or_default()
    }

    /// Parses a table from JSON text.
    ///
    /// The text must be a JSON object. Fields inside it are read leniently
    /// (see [`crate::validation::lenient`]).
    pub fn parse(text: &str) -> CoreResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(CoreError::InvalidConfig {
                reason: "expected a JSON object".to_string(),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Parses operator-pasted JSON for import.
    ///
    /// Same as [`RateConfig::parse`], and additionally rejects tables in
    /// which two items share an id.
    pub fn import(text: &str) -> CoreResult<Self> {
        let cfg = Self::parse(text)?;
        validate_unique_ids(&cfg.items)?;
        Ok(cfg)
    }

    /// Compact JSON for the persistence store.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Pretty-printed JSON for export.
    pub fn to_json_pretty(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Wholesale substitution (import, reset). No merge.
    pub fn replace(&mut self, new_config: RateConfig) {
        *self = new_config;
    }

    /// Replaces the item list.
    ///
    /// Does not check ids for uniqueness; callers that take ids from an
    /// operator validate first.
    pub fn set_items(&mut self, items: Vec<LineItem>) {
        self.items = items;
    }

    /// Looks up an item by id.
    pub fn item(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Applies an operator edit to one numeric field, coercing the text.
    ///
    /// The value is stored as typed; nothing is rounded here.
    pub fn set_field(&mut self, field: RateField, raw: &str) {
        let value = coerce_number(raw);
        match field {
            RateField::BaseFee => self.base_fee = Rate::new(value),
            RateField::BaseDistanceKm => self.base_distance_km = value,
            RateField::ExtraPerKm => self.extra_per_km = Rate::new(value),
            RateField::NoElevatorPerFloor => self.no_elevator_per_floor = Rate::new(value),
            RateField::WeekendRate => self.weekend_rate = Rate::new(value),
            RateField::HelperFee => self.helper_fee = Rate::new(value),
        }
    }

    /// Current value of a numeric field, as the operator would type it.
    pub fn field_value(&self, field: RateField) -> String {
        match field {
            RateField::BaseFee => self.base_fee.to_string(),
            RateField::BaseDistanceKm => self.base_distance_km.to_string(),
            RateField::ExtraPerKm => self.extra_per_km.to_string(),
            RateField::NoElevatorPerFloor => self.no_elevator_per_floor.to_string(),
            RateField::WeekendRate => self.weekend_rate.to_string(),
            RateField::HelperFee => self.helper_fee.to_string(),
        }
    }
}

// =============================================================================
// Rate Field
// =============================================================================

/// The numeric fields an operator can edit one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateField {
    BaseFee,
    BaseDistanceKm,
    ExtraPerKm,
    NoElevatorPerFloor,
    WeekendRate,
    HelperFee,
}

impl RateField {
    /// Every field, in display order.
    pub const ALL: [RateField; 6] = [
        RateField::BaseFee,
        RateField::BaseDistanceKm,
        RateField::ExtraPerKm,
        RateField::NoElevatorPerFloor,
        RateField::WeekendRate,
        RateField::HelperFee,
    ];

    /// JSON key of the field.
    pub const fn key(&self) -> &'static str {
        match self {
            RateField::BaseFee => "baseFee",
            RateField::BaseDistanceKm => "baseDistanceKm",
            RateField::ExtraPerKm => "extraPerKm",
            RateField::NoElevatorPerFloor => "noElevatorPerFloor",
            RateField::WeekendRate => "weekendRateMultiplierAdd",
            RateField::HelperFee => "helperFee",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
