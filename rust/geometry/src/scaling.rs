// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bed-fit auto-scaling.
//!
//! Computes the uniform shrink factor that fits a model inside the print
//! bed. This scaler only ever shrinks; undersized models are left alone.

use crate::stats::Dimensions;

/// Safety margin applied whenever a model is scaled down to fit.
const FIT_MARGIN: f64 = 0.95;

/// Printable envelope of the target machine, millimeters.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BedLimits {
    /// Maximum footprint extent on either the X or Y axis
    pub max_xy_mm: f64,
    /// Maximum build height
    pub max_z_mm: f64,
}

impl Default for BedLimits {
    fn default() -> Self {
        Self {
            max_xy_mm: 240.0,
            max_z_mm: 256.0,
        }
    }
}

/// Outcome of the bed-fit check.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleResult {
    /// True when the model exceeds the bed and a shrink factor was computed
    pub needs_scaling: bool,
    /// Uniform scale to apply; 1.0 when no scaling is needed, always ≤ 1.0 otherwise
    pub scale_factor: f64,
    /// Human-readable explanation of the decision
    pub reason: String,
    /// Extents before scaling
    pub original_size: Dimensions,
    /// Extents after applying `scale_factor`; `None` when unscaled
    pub scaled_size: Option<Dimensions>,
}

/// Round to two decimal places, the granularity shown in the UI and sent to
/// the slicer.
#[inline]
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Compute the uniform shrink factor that fits `dims` inside `limits`.
///
/// When either the footprint or the height exceeds the bed, the binding
/// constraint's ratio is taken (uniform scaling keeps both X and Y within
/// bounds because the ratio is computed from the true footprint maximum),
/// reduced by a 5% margin and rounded to two decimals.
pub fn compute_auto_scale(dims: &Dimensions, limits: &BedLimits) -> ScaleResult {
    let max_xy = dims.max_footprint();

    let exceeds_footprint = max_xy > limits.max_xy_mm;
    let exceeds_height = dims.z > limits.max_z_mm;

    if !exceeds_footprint && !exceeds_height {
        return ScaleResult {
            needs_scaling: false,
            scale_factor: 1.0,
            reason: "Model fits the print bed".to_string(),
            original_size: *dims,
            scaled_size: None,
        };
    }

    // Division by a zero extent yields +inf and is discarded by min()
    let scale_xy = limits.max_xy_mm / max_xy;
    let scale_z = limits.max_z_mm / dims.z;
    let scale_factor = round2(scale_xy.min(scale_z) * FIT_MARGIN);

    let reason = match (exceeds_footprint, exceeds_height) {
        (true, true) => "Model exceeds bed footprint and height".to_string(),
        (true, false) => format!("Footprint {:.1}mm exceeds {:.1}mm bed", max_xy, limits.max_xy_mm),
        (false, true) => format!("Height {:.1}mm exceeds {:.1}mm build volume", dims.z, limits.max_z_mm),
        (false, false) => unreachable!(),
    };

    tracing::debug!(
        scale_factor,
        max_xy,
        z = dims.z,
        "Auto-scale computed to fit bed"
    );

    ScaleResult {
        needs_scaling: true,
        scale_factor,
        reason,
        original_size: *dims,
        scaled_size: Some(dims.scaled(scale_factor)),
    }
}
