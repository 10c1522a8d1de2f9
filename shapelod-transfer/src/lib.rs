//! Correspondence-based attribute transfer
//!
//! This crate maps every vertex of a simplified mesh to its nearest point
//! on the original surface, then resamples attribute layers and shape keys
//! through those correspondences:
//!
//! - Continuous layers (UVs, vertex group weights, custom normals) are
//!   barycentrically blended from the matched original face
//! - Discrete layers (material indices, smoothing flags) are resolved per
//!   face by majority vote with a deterministic tie-break
//! - Shape keys are rebuilt so the deformed simplified surface tracks the
//!   deformed original surface
//!
//! All per-vertex and per-key work is data parallel; the spatial index is
//! built once and shared read-only across queries.

pub mod attributes;
pub mod correspondence;
pub mod shape_keys;
pub mod spatial;
pub mod triangle;

pub use attributes::*;
pub use correspondence::*;
pub use shape_keys::*;
pub use spatial::*;
pub use triangle::*;
