//! Printlite Geometry
//!
//! Mesh measurement for the print-quoting pipeline: enclosed volume and
//! bounding-box dimensions using nalgebra, lay-flat orientation advice and
//! bed-fit auto-scaling.

pub mod error;
pub mod mesh;
pub mod orientation;
pub mod scaling;
pub mod stats;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use error::{Error, Result};
pub use mesh::Mesh;
pub use orientation::{OrientationAdvisor, OrientationResult};
pub use scaling::{compute_auto_scale, BedLimits, ScaleResult};
pub use stats::{compute_geometry_stats, Dimensions, GeometryStats};
