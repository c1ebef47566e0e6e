// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lay-flat orientation advice.
//!
//! The advisor identifies which axis would minimize print height if rotated
//! vertical. Actually rotating is gated behind `rotation_optimization_enabled`
//! and ships disabled: the slicer endpoint does not reliably honor rotation
//! inputs, and the viewer must show exactly what gets quoted. The optimal
//! axis is still computed and labeled for logging and UI hints.

use crate::stats::Dimensions;
use std::f64::consts::FRAC_PI_2;

/// Advisory rotation for a model, radians per axis.
///
/// Never mutates the mesh; downstream code forwards the rotation (identity
/// unless optimization is enabled) to the slicer as-is.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrientationResult {
    /// Rotation (rx, ry, rz) in radians
    pub rotation: [f64; 3],
    /// Human-readable description of the recommendation
    pub label: String,
}

impl OrientationResult {
    fn identity(label: impl Into<String>) -> Self {
        Self {
            rotation: [0.0, 0.0, 0.0],
            label: label.into(),
        }
    }
}

/// Recommends a print orientation from bounding-box extents.
#[derive(Debug, Clone, Copy)]
pub struct OrientationAdvisor {
    /// When false (the default), the returned rotation is always identity
    /// and the optimal axis is reported in the label only.
    pub rotation_optimization_enabled: bool,
}

impl Default for OrientationAdvisor {
    fn default() -> Self {
        Self {
            rotation_optimization_enabled: false,
        }
    }
}

impl OrientationAdvisor {
    /// Create an advisor with the shipped (disabled) configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recommend a rotation that would lay the shortest extent vertical.
    ///
    /// Infallible: malformed extents produce the identity rotation with an
    /// `"Error"` label rather than propagating.
    pub fn recommend(&self, dims: &Dimensions) -> OrientationResult {
        if !dims.is_finite() || dims.x < 0.0 || dims.y < 0.0 || dims.z < 0.0 {
            tracing::warn!(?dims, "Orientation advice skipped for malformed extents");
            return OrientationResult::identity("Error");
        }

        let min = dims.min_extent();
        let (axis, rotation) = if min == dims.z {
            ('z', [0.0, 0.0, 0.0])
        } else if min == dims.x {
            // Rotate about Y to bring X vertical
            ('x', [0.0, FRAC_PI_2, 0.0])
        } else {
            // Rotate about X to bring Y vertical
            ('y', [FRAC_PI_2, 0.0, 0.0])
        };

        let label = if axis == 'z' {
            "Already lying flat (z shortest)".to_string()
        } else {
            format!("Lay flat on {axis} axis to minimize print height")
        };

        tracing::debug!(
            optimal_axis = %axis,
            enabled = self.rotation_optimization_enabled,
            "Orientation advice computed"
        );

        if self.rotation_optimization_enabled {
            OrientationResult { rotation, label }
        } else {
            // Quoted geometry must match the viewer; report only.
            OrientationResult::identity(label)
        }
    }
}
