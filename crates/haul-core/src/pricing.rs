//! # Quote Pricing
//!
//! Turns a rate table and a request into an itemized [`QuoteBreakdown`].
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Pricing Pipeline                                  │
//! │                                                                         │
//! │  1. items     Σ quantity(id) × unit_price                               │
//! │  2. distance  max(0, km − base_km) × extra_per_km                      │
//! │  3. floors    elevator ? 0 : floors × no_elevator_per_floor             │
//! │  4. helpers   helpers × helper_fee                                      │
//! │  5. subtotal  base_fee + 1 + 2 + 3 + 4                                  │
//! │  6. factor    weekend ? 1 + rate : 1                                    │
//! │  7. total     round(subtotal × factor)                                  │
//! │                                                                         │
//! │  Every input is already non-negative, so no step can go below zero.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Steps 1 to 6 run on the unrounded values from the rate table. Only the
//! total in step 7 is rounded, half away from zero. The breakdown lines
//! are each rounded to whole won for display, so with fractional rates
//! they may not add up exactly to the displayed subtotal.

use crate::money::Money;
use crate::rate_config::RateConfig;
use crate::types::{QuoteBreakdown, QuoteRequest};
use crate::validation::clamp_non_negative;

/// Prices a request against a rate table.
///
/// Pure and deterministic: the same inputs always give the same breakdown.
///
/// ## Example
/// ```rust
/// use haul_core::{price, QuoteRequest, RateConfig};
///
/// let cfg = RateConfig::default();
/// let mut req = QuoteRequest::for_items(&cfg.items);
/// req.quantities.insert("fridge".to_string(), 1);
///
/// let breakdown = price(&cfg, &req);
/// assert_eq!(breakdown.total.units(), 140_000);
/// ```
pub fn price(cfg: &RateConfig, req: &QuoteRequest) -> QuoteBreakdown {
    let items_subtotal: Money = cfg
        .items
        .iter()
        .map(|item| item.line_amount(req.quantity(&item.id)))
        .sum();

    let distance_charge = distance_charge(cfg, req.distance_km);

    let floor_charge = if req.has_elevator {
        0.0
    } else {
        f64::from(req.floors) * cfg.no_elevator_per_floor.value()
    };

    let helper_charge = f64::from(req.helpers) * cfg.helper_fee.value();

    let subtotal = cfg.base_fee.value()
        + items_subtotal.units() as f64
        + distance_charge
        + floor_charge
        + helper_charge;

    let weekend_multiplier = if req.weekend {
        1.0 + cfg.weekend_rate.value()
    } else {
        1.0
    };

    QuoteBreakdown {
        base_fee: cfg.base_fee.to_money(),
        items_subtotal,
        distance_surcharge: Money::from_f64_rounded(distance_charge),
        floor_surcharge: Money::from_f64_rounded(floor_charge),
        helper_surcharge: Money::from_f64_rounded(helper_charge),
        subtotal: Money::from_f64_rounded(subtotal),
        weekend_multiplier,
        total: Money::from_f64_rounded(subtotal * weekend_multiplier),
    }
}

/// Unrounded charge for the kilometres beyond the included distance.
fn distance_charge(cfg: &RateConfig, distance_km: f64) -> f64 {
    let excess = clamp_non_negative(distance_km) - clamp_non_negative(cfg.base_distance_km);
    if excess <= 0.0 {
        return 0.0;
    }
    excess * cfg.extra_per_km.value()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LineItem, Rate};

    /// Rate table with a single fridge line.
    fn fridge_config() -> RateConfig {
        let mut cfg = RateConfig::default();
        cfg.set_items(vec![LineItem::new(
            "fridge",
            "냉장고(중/대)",
            Money::from_units(20_000),
            "대",
        )]);
        cfg
    }

    fn request(cfg: &RateConfig) -> QuoteRequest {
        QuoteRequest::for_items(&cfg.items)
    }

    #[test]
    fn test_scenario_weekday_with_elevator() {
        let cfg = fridge_config();
        let mut req = request(&cfg);
        req.quantities.insert("fridge".to_string(), 1);

        let b = price(&cfg, &req);
        assert_eq!(b.base_fee.units(), 120_000);
        assert_eq!(b.items_subtotal.units(), 20_000);
        assert!(b.distance_surcharge.is_zero());
        assert!(b.floor_surcharge.is_zero());
        assert!(b.helper_surcharge.is_zero());
        assert_eq!(b.subtotal.units(), 140_000);
        assert_eq!(b.weekend_multiplier, 1.0);
        assert_eq!(b.total.units(), 140_000);
    }

    #[test]
    fn test_scenario_weekend_walk_down() {
        let cfg = fridge_config();
        let mut req = request(&cfg);
        req.distance_km = 20.0;
        req.floors = 3;
        req.has_elevator = false;
        req.helpers = 1;
        req.weekend = true;
        req.quantities.insert("fridge".to_string(), 2);

        let b = price(&cfg, &req);
        assert_eq!(b.items_subtotal.units(), 40_000);
        assert_eq!(b.distance_surcharge.units(), 10_000);
        assert_eq!(b.floor_surcharge.units(), 15_000);
        assert_eq!(b.helper_surcharge.units(), 50_000);
        assert_eq!(b.subtotal.units(), 235_000);
        assert!((b.weekend_multiplier - 1.2).abs() < 1e-9);
        assert_eq!(b.total.units(), 282_000);
    }

    #[test]
    fn test_no_distance_charge_within_base() {
        let cfg = fridge_config();
        let mut req = request(&cfg);
        for km in [0.0, 3.5, 9.99, 10.0] {
            req.distance_km = km;
            assert!(price(&cfg, &req).distance_surcharge.is_zero(), "km = {km}");
        }
    }

    #[test]
    fn test_distance_charge_is_linear_beyond_base() {
        let cfg = fridge_config();
        let mut req = request(&cfg);

        let mut last = Money::zero();
        for km in [11.0, 12.0, 15.0, 40.0, 100.0] {
            req.distance_km = km;
            let charge = price(&cfg, &req).distance_surcharge;
            assert_eq!(charge.units(), ((km - 10.0) * 1000.0) as i64);
            assert!(charge > last);
            last = charge;
        }
    }

    #[test]
    fn test_fractional_distance_is_rounded_for_display() {
        let cfg = fridge_config();
        let mut req = request(&cfg);
        req.distance_km = 12.3456;
        // 2.3456 km × 1000 = 2345.6
        let b = price(&cfg, &req);
        assert_eq!(b.distance_surcharge.units(), 2_346);
        assert_eq!(b.total.units(), 122_346);
    }

    #[test]
    fn test_distance_fraction_reaches_weekend_total() {
        let cfg = fridge_config();
        let mut req = request(&cfg);
        req.distance_km = 10.00045;
        req.weekend = true;

        // (120000 + 0.45) × 1.2 = 144000.54
        let b = price(&cfg, &req);
        assert!(b.distance_surcharge.is_zero());
        assert_eq!(b.subtotal.units(), 120_000);
        assert_eq!(b.total.units(), 144_001);
    }

    #[test]
    fn test_weekend_rate_keeps_every_decimal() {
        let mut cfg = fridge_config();
        cfg.weekend_rate = Rate::new(0.33333);
        let mut req = request(&cfg);
        req.distance_km = 20.0;
        req.floors = 3;
        req.has_elevator = false;
        req.helpers = 1;
        req.weekend = true;
        req.quantities.insert("fridge".to_string(), 2);

        // 235000 × 1.33333 = 313332.55
        let b = price(&cfg, &req);
        assert_eq!(b.subtotal.units(), 235_000);
        assert_eq!(b.weekend_multiplier, 1.33333);
        assert_eq!(b.total.units(), 313_333);
    }

    #[test]
    fn test_fractional_fees_are_not_rounded_first() {
        let mut cfg = fridge_config();
        cfg.extra_per_km = Rate::new(1_500.5);
        cfg.helper_fee = Rate::new(49_999.5);
        let mut req = request(&cfg);
        req.distance_km = 12.0;
        req.helpers = 2;

        // 120000 + 2 × 1500.5 + 2 × 49999.5
        let b = price(&cfg, &req);
        assert_eq!(b.distance_surcharge.units(), 3_001);
        assert_eq!(b.helper_surcharge.units(), 99_999);
        assert_eq!(b.total.units(), 223_000);
    }

    #[test]
    fn test_elevator_waives_floor_charge() {
        let cfg = fridge_config();
        let mut req = request(&cfg);
        req.has_elevator = true;
        for floors in [0, 1, 5, 30] {
            req.floors = floors;
            assert!(price(&cfg, &req).floor_surcharge.is_zero());
        }

        req.has_elevator = false;
        req.floors = 4;
        assert_eq!(price(&cfg, &req).floor_surcharge.units(), 20_000);
    }

    #[test]
    fn test_weekend_total_rounds_half_up() {
        let mut cfg = fridge_config();
        cfg.base_fee = Rate::from_units(5);
        cfg.weekend_rate = Rate::new(0.1);
        let mut req = request(&cfg);
        req.weekend = true;

        // 5 × 1.1 = 5.5 → 6
        let b = price(&cfg, &req);
        assert_eq!(b.subtotal.units(), 5);
        assert_eq!(b.total.units(), 6);

        req.weekend = false;
        assert_eq!(price(&cfg, &req).total.units(), 5);
    }

    #[test]
    fn test_unknown_quantity_ids_are_ignored() {
        let cfg = fridge_config();
        let mut req = request(&cfg);
        req.quantities.insert("ghost".to_string(), 9);
        assert!(price(&cfg, &req).items_subtotal.is_zero());
    }

    #[test]
    fn test_total_never_below_base_fee() {
        let cfg = fridge_config();
        let mut req = request(&cfg);
        req.set_distance_km(-50.0);
        req.floors = 0;
        req.helpers = 0;

        let b = price(&cfg, &req);
        assert_eq!(b.total, cfg.base_fee.to_money());
    }

    #[test]
    fn test_zeroed_config_prices_to_zero() {
        let cfg = RateConfig::load(Some("{}"));
        let mut req = QuoteRequest::for_items(&cfg.items);
        req.distance_km = 500.0;
        req.has_elevator = false;
        req.floors = 10;
        req.helpers = 3;
        req.weekend = true;

        let b = price(&cfg, &req);
        assert!(b.total.is_zero());
        assert_eq!(b.weekend_multiplier, 1.0);
    }
}
