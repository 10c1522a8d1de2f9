//! Core data structures for shapelod
//!
//! This crate provides the mesh, attribute-layer, and shape-key model shared
//! by the decimation engine, plus the workspace-wide error type. Everything
//! here is plain serializable data with integer indices; no type holds a
//! reference into any host scene.

pub mod point;
pub mod mesh;
pub mod polygon;
pub mod attributes;
pub mod shape_key;
pub mod correspondence;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use polygon::*;
pub use attributes::*;
pub use shape_key::*;
pub use correspondence::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector2, Vector3, Matrix3, Matrix4};

/// Common result type for shapelod operations
pub type Result<T> = std::result::Result<T, Error>;

// Type aliases for easier imports
pub type Point = Point3f;
pub type Mesh = TriangleMesh;
