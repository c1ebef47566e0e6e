// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-unit price computation.
//!
//! Constants here are the shop's tariff and must not drift: 12/g material,
//! 2500/h machine time scaled by the support-ratio tier, 1000 startup fee,
//! flexible-material doubling, final rounding to the nearest 100.

use crate::config::{Material, PrintConfig};
use serde::{Deserialize, Serialize};

/// Material price per gram, currency units.
pub const PRICE_PER_GRAM: f64 = 12.0;
/// Machine time price per hour before difficulty scaling.
pub const PRICE_PER_HOUR: f64 = 2500.0;
/// Flat per-job preparation fee.
pub const STARTUP_FEE: i64 = 1000;
/// Prices are quoted in steps of this size.
pub const ROUNDING_STEP: i64 = 100;

/// Physical quantities a price is computed from, slicer-reported or locally
/// estimated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrintStats {
    /// Total printed weight including supports, grams
    pub weight_grams: f64,
    /// Estimated print time, hours
    pub time_hours: f64,
    /// Weight of support material alone, grams
    #[serde(default)]
    pub support_weight_grams: f64,
}

/// Price breakdown for one line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Filament cost component, per unit
    pub material_cost: i64,
    /// Machine time component (difficulty-scaled), per unit
    pub time_cost: i64,
    /// Flat preparation fee, per unit
    pub startup_fee: i64,
    /// Rounded per-unit price
    pub unit_price: i64,
    /// `unit_price * quantity`
    pub total_price: i64,
    /// Print time the price was computed from
    pub estimated_time_hours: f64,
    /// Weight the price was computed from
    pub weight_grams: f64,
    /// Intermediate values for support tooling and tests
    pub debug: PriceDebug,
}

/// Intermediate pricing values, kept for inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDebug {
    /// Support weight share of total weight, percent
    pub support_ratio_percent: f64,
    /// Tier factor applied to machine time
    pub difficulty_factor: f64,
    /// Whether the flexible-material doubling was applied
    pub flexible_surcharge_applied: bool,
    /// Unit total before rounding to the nearest step
    pub raw_unit_total: i64,
}

/// Difficulty tier from the support-weight share of total weight.
///
/// Thresholds are exclusive lower bounds: exactly 30% lands in the >15%
/// tier, exactly 5% in the base tier.
#[inline]
pub fn support_tier_factor(support_ratio_percent: f64) -> f64 {
    if support_ratio_percent > 30.0 {
        1.30
    } else if support_ratio_percent > 15.0 {
        1.20
    } else if support_ratio_percent > 5.0 {
        1.10
    } else {
        1.00
    }
}

/// Round to the nearest pricing step (banker's rounding not used; ties go
/// away from zero as in `f64::round`).
#[inline]
fn round_to_step(value: i64) -> i64 {
    ((value as f64 / ROUNDING_STEP as f64).round() as i64) * ROUNDING_STEP
}

/// Compute the per-unit price breakdown for a configured print job.
///
/// Pure: reads the config and stats, performs no I/O. The caller supplies
/// non-negative inputs; the support ratio denominator is clamped to one
/// gram so weightless estimates cannot divide by zero.
pub fn calculate_price(config: &PrintConfig, stats: &PrintStats) -> PriceBreakdown {
    let material_cost = (stats.weight_grams * PRICE_PER_GRAM).ceil() as i64;

    let support_ratio_percent =
        stats.support_weight_grams / stats.weight_grams.max(1.0) * 100.0;
    let difficulty_factor = support_tier_factor(support_ratio_percent);

    let time_cost = (difficulty_factor * PRICE_PER_HOUR * stats.time_hours).ceil() as i64;

    let mut raw_unit_total = material_cost + time_cost + STARTUP_FEE;

    // Flexible surcharge doubles the whole unit total, fees included,
    // after all other components are summed.
    let flexible_surcharge_applied = config.material.is_flexible();
    if flexible_surcharge_applied {
        raw_unit_total *= 2;
    }

    let unit_price = round_to_step(raw_unit_total);
    let total_price = unit_price * i64::from(config.quantity);

    tracing::debug!(
        material = %config.material,
        weight_grams = stats.weight_grams,
        time_hours = stats.time_hours,
        support_ratio_percent,
        difficulty_factor,
        unit_price,
        total_price,
        "Price computed"
    );

    PriceBreakdown {
        material_cost,
        time_cost,
        startup_fee: STARTUP_FEE,
        unit_price,
        total_price,
        estimated_time_hours: stats.time_hours,
        weight_grams: stats.weight_grams,
        debug: PriceDebug {
            support_ratio_percent,
            difficulty_factor,
            flexible_surcharge_applied,
            raw_unit_total,
        },
    }
}
