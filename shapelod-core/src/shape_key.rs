//! Shape keys (blend shapes)

use crate::point::*;
use serde::{Deserialize, Serialize};

/// Name given to the basis key when the source mesh carried none
pub const DEFAULT_BASIS_NAME: &str = "Basis";

/// A named blend shape: per-vertex position offsets from the base positions,
/// plus the key's current blend value. The first key of a mesh is the basis
/// and always has all-zero offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeKey {
    pub name: String,
    pub value: f32,
    pub offsets: Vec<Vector3f>,
}

impl ShapeKey {
    /// Create a key with all-zero offsets
    pub fn zeroed(name: impl Into<String>, vertex_count: usize) -> Self {
        Self {
            name: name.into(),
            value: 0.0,
            offsets: vec![Vector3f::zeros(); vertex_count],
        }
    }

    /// Create a basis key with the default name
    pub fn basis(vertex_count: usize) -> Self {
        Self::zeroed(DEFAULT_BASIS_NAME, vertex_count)
    }

    /// Set the blend value, clamped to [0, 1]
    pub fn set_value(&mut self, value: f32) {
        self.value = value.clamp(0.0, 1.0);
    }

    /// Check whether every offset is exactly zero
    pub fn is_zero(&self) -> bool {
        self.offsets.iter().all(|o| *o == Vector3f::zeros())
    }
}
