//! Error types for shapelod

use thiserror::Error;

/// Main error type for shapelod operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid decimation ratio {0}: must be finite and in (0, 1]")]
    InvalidRatio(f32),

    #[error("Empty result: target of {target} faces from a source with {source_faces} faces")]
    EmptyResult { target: usize, source_faces: usize },

    #[error("Non-manifold input: edge ({}, {}) borders more than two faces or has inconsistent winding", .edge.0, .edge.1)]
    NonManifoldInput { edge: (usize, usize) },

    #[error("No correspondence found for vertex {vertex}: original surface is empty or unreachable")]
    CorrespondenceFailure { vertex: usize },

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for shapelod operations
pub type Result<T> = std::result::Result<T, Error>;
