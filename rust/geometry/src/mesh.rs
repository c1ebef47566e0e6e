// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use crate::error::{Error, Result};
use nalgebra::{Point3, Vector3};

/// Triangle mesh loaded from an uploaded model file.
///
/// Positions are stored flat (x, y, z per vertex) in millimeters. The index
/// buffer is optional: when `None`, consecutive position triples form the
/// triangles. The quoting core never mutates a mesh after load; centering
/// and normal generation for display are the viewer's concern.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions (x, y, z), millimeters
    pub positions: Vec<f32>,
    /// Triangle indices (i0, i1, i2); `None` for soup-of-triangles meshes
    pub indices: Option<Vec<u32>>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            indices: None,
        }
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            indices: Some(Vec::with_capacity(index_count)),
        }
    }

    /// Add a vertex position
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>) {
        self.positions.push(position.x as f32);
        self.positions.push(position.y as f32);
        self.positions.push(position.z as f32);
    }

    /// Add a triangle to the index buffer
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        let indices = self.indices.get_or_insert_with(Vec::new);
        indices.push(i0);
        indices.push(i1);
        indices.push(i2);
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.vertex_count() / 3,
        }
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Fetch a vertex in f64 precision
    #[inline]
    fn vertex(&self, i: u32) -> Result<Vector3<f64>> {
        let base = i as usize * 3;
        if base + 2 >= self.positions.len() {
            return Err(Error::IndexOutOfBounds {
                index: i,
                vertex_count: self.vertex_count(),
            });
        }
        Ok(Vector3::new(
            self.positions[base] as f64,
            self.positions[base + 1] as f64,
            self.positions[base + 2] as f64,
        ))
    }

    /// Iterate triangles as f64 vertex triples, honoring the index buffer
    /// when present and consuming consecutive triples otherwise.
    pub fn triangles(&self) -> Result<Vec<[Vector3<f64>; 3]>> {
        let mut out = Vec::with_capacity(self.triangle_count());
        match &self.indices {
            Some(indices) => {
                if indices.len() % 3 != 0 {
                    return Err(Error::RaggedIndexBuffer { len: indices.len() });
                }
                for tri in indices.chunks_exact(3) {
                    out.push([
                        self.vertex(tri[0])?,
                        self.vertex(tri[1])?,
                        self.vertex(tri[2])?,
                    ]);
                }
            }
            None => {
                for i in (0..self.vertex_count() / 3 * 3).step_by(3) {
                    out.push([
                        self.vertex(i as u32)?,
                        self.vertex(i as u32 + 1)?,
                        self.vertex(i as u32 + 2)?,
                    ]);
                }
            }
        }
        Ok(out)
    }

    /// Calculate bounds (min, max) in f64 precision
    #[inline]
    pub fn bounds(&self) -> (Point3<f64>, Point3<f64>) {
        if self.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f64::MAX, f64::MAX, f64::MAX);
        let mut max = Point3::new(f64::MIN, f64::MIN, f64::MIN);

        // Use chunks for better cache locality
        self.positions.chunks_exact(3).for_each(|chunk| {
            let (x, y, z) = (chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
            min.x = min.x.min(x);
            min.y = min.y.min(y);
            min.z = min.z.min(z);
            max.x = max.x.max(x);
            max.y = max.y.max(y);
            max.z = max.z.max(z);
        });

        (min, max)
    }
}
