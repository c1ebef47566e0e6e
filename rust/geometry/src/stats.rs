// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Volume and bounding-box measurement.
//!
//! Enclosed volume is the sum of signed tetrahedron volumes between the
//! origin and every triangle (divergence theorem). The result is only
//! meaningful for closed, consistently wound meshes; an open mesh yields a
//! finite but wrong volume and is not rejected here.

use crate::error::{Error, Result};
use crate::mesh::Mesh;

/// Axis-aligned bounding-box extents, millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Dimensions {
    /// Create new extents
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Largest footprint extent (X/Y plane)
    #[inline]
    pub fn max_footprint(&self) -> f64 {
        self.x.max(self.y)
    }

    /// Shortest extent across all three axes
    #[inline]
    pub fn min_extent(&self) -> f64 {
        self.x.min(self.y).min(self.z)
    }

    /// Longest extent across all three axes
    #[inline]
    pub fn max_extent(&self) -> f64 {
        self.x.max(self.y).max(self.z)
    }

    /// Uniformly scaled copy
    #[inline]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }

    /// True when every extent is a finite number
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Measured geometry of one loaded mesh.
///
/// Computed once per file load and invalidated when a new file replaces it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryStats {
    /// Enclosed volume in cm³
    pub volume_cm3: f64,
    /// Bounding-box extents in mm
    pub dimensions: Dimensions,
}

/// Measure a mesh: enclosed volume (cm³) and bounding-box extents (mm).
///
/// Fails on meshes with fewer than 3 vertices or indices referencing
/// missing vertices; winding/closedness are the caller's input-quality
/// assumption and are not validated.
pub fn compute_geometry_stats(mesh: &Mesh) -> Result<GeometryStats> {
    if mesh.vertex_count() < 3 {
        return Err(Error::DegenerateMesh {
            vertex_count: mesh.vertex_count(),
        });
    }

    let mut signed_mm3 = 0.0f64;
    for [v1, v2, v3] in mesh.triangles()? {
        // Signed tetrahedron volume against the origin
        signed_mm3 += v1.dot(&v2.cross(&v3)) / 6.0;
    }

    let (min, max) = mesh.bounds();
    let dimensions = Dimensions::new(max.x - min.x, max.y - min.y, max.z - min.z);

    Ok(GeometryStats {
        volume_cm3: signed_mm3.abs() / 1000.0,
        dimensions,
    })
}
