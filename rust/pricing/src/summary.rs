// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Order-level price adjustments.
//!
//! Layered on top of [`crate::engine::calculate_price`]: the coarse
//! supports-needed multiplier (a second, binary difficulty signal separate
//! from the support-ratio tiers), the multi-plate surcharge, and the
//! minimum-price disclaimer flag.

use crate::engine::{PriceBreakdown, ROUNDING_STEP};
use serde::{Deserialize, Serialize};

/// Flat multiplier applied to the whole order when the slicer reports that
/// supports are required.
pub const COARSE_DIFFICULTY_FACTOR: f64 = 1.2;
/// Surcharge per build plate beyond the first.
pub const EXTRA_PLATE_FEE: i64 = 1000;
/// Orders at or below this total carry the manual-confirmation disclaimer.
pub const MINIMUM_PRICE_THRESHOLD: i64 = 3000;

/// Final order totals after order-level adjustments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Total carried in from the per-unit breakdown
    pub base_total: i64,
    /// Whether the coarse supports-needed multiplier was applied
    pub coarse_difficulty_applied: bool,
    /// Surcharge for build plates beyond the first
    pub plate_surcharge: i64,
    /// Final order total
    pub total_price: i64,
    /// True when the total is at or below the minimum threshold; the price
    /// is shown with a manual-confirmation disclaimer but not raised
    pub minimum_price_applied: bool,
}

#[inline]
fn round_to_step(value: i64) -> i64 {
    ((value as f64 / ROUNDING_STEP as f64).round() as i64) * ROUNDING_STEP
}

/// Apply order-level adjustments to a computed breakdown.
///
/// `supports_needed` is the slicer's binary flag; `plates` is the build
/// plate count determined upstream from geometry heuristics (1 for a
/// single-plate order).
pub fn summarize_order(
    breakdown: &PriceBreakdown,
    supports_needed: bool,
    plates: u32,
) -> OrderSummary {
    let base_total = breakdown.total_price;

    let mut total_price = base_total;
    if supports_needed {
        total_price = round_to_step((total_price as f64 * COARSE_DIFFICULTY_FACTOR) as i64);
    }

    let plate_surcharge = i64::from(plates.saturating_sub(1)) * EXTRA_PLATE_FEE;
    total_price += plate_surcharge;

    let minimum_price_applied = total_price <= MINIMUM_PRICE_THRESHOLD;
    if minimum_price_applied {
        tracing::debug!(total_price, "Order at minimum price, disclaimer shown");
    }

    OrderSummary {
        base_total,
        coarse_difficulty_applied: supports_needed,
        plate_surcharge,
        total_price,
        minimum_price_applied,
    }
}
