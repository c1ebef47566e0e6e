use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while measuring a mesh
#[derive(Error, Debug)]
pub enum Error {
    #[error("Degenerate mesh: {vertex_count} vertices, need at least 3")]
    DegenerateMesh { vertex_count: usize },

    #[error("Triangle index {index} out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u32, vertex_count: usize },

    #[error("Index buffer length {len} is not a multiple of 3")]
    RaggedIndexBuffer { len: usize },
}
