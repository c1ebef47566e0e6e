// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local print-stats estimation from geometry.
//!
//! Used whenever no authoritative slicer result is available: the slicer is
//! down, still being called, or returned the fallback payload. Prices from
//! this path are labeled "estimated" in the storefront.

use printlite_geometry::GeometryStats;
use printlite_pricing::{PrintConfig, PrintStats};

/// Share of the part that prints solid regardless of infill (walls, top and
/// bottom shells).
pub const SHELL_SOLID_FRACTION: f64 = 0.25;

/// Deposition rate per millimeter of layer height, grams per hour. At the
/// default 0.2 mm layer this gives 12 g/h, in line with the shop's printers.
pub const DEPOSITION_G_PER_H_PER_MM: f64 = 60.0;

/// Effective solid fraction of the printed part for a given infill density.
#[inline]
fn effective_solid_fraction(infill_percent: u8) -> f64 {
    SHELL_SOLID_FRACTION + (1.0 - SHELL_SOLID_FRACTION) * f64::from(infill_percent) / 100.0
}

/// Estimate weight and print time from measured geometry alone.
///
/// Weight is enclosed volume × material density × effective solid fraction;
/// time is weight over the layer-height-scaled deposition rate. Supports
/// are unknowable without slicing and estimated as zero.
pub fn estimate_print_stats(geometry: &GeometryStats, config: &PrintConfig) -> PrintStats {
    let solid_fraction = effective_solid_fraction(config.infill_percent);
    let weight_grams = geometry.volume_cm3 * config.material.density_g_cm3() * solid_fraction;

    let deposition_rate = DEPOSITION_G_PER_H_PER_MM * config.quality_mm;
    let time_hours = if deposition_rate > 0.0 {
        weight_grams / deposition_rate
    } else {
        0.0
    };

    tracing::debug!(
        volume_cm3 = geometry.volume_cm3,
        material = %config.material,
        infill_percent = config.infill_percent,
        weight_grams,
        time_hours,
        "Estimated print stats from geometry"
    );

    PrintStats {
        weight_grams,
        time_hours,
        support_weight_grams: 0.0,
    }
}
