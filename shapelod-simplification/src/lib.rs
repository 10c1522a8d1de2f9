//! Topology simplification for shapelod
//!
//! This crate reduces a triangle mesh to a target fraction of its face
//! count. It works on positions and faces only; attribute layers and shape
//! keys are resampled onto the result by the transfer crate afterwards.

pub mod edge_collapse;

pub use edge_collapse::*;

use shapelod_core::{Result, TriangleMesh};

/// Simplify a mesh toward a fraction of its original face count
pub trait MeshSimplifier {
    /// Simplify the mesh, keeping `keep_ratio` of its faces. The ratio must
    /// be finite and in (0, 1]; 1.0 returns the topology unchanged. The
    /// face target is `round(face_count * keep_ratio)`, clamped to at
    /// least 4 and at most the original count.
    fn simplify(&self, mesh: &TriangleMesh, keep_ratio: f32) -> Result<TriangleMesh>;
}
