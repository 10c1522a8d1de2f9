//! Attribute layers owned by a mesh
//!
//! Layers come in two kinds. Continuous layers (UV coordinates, vertex-group
//! weights, custom normals) are linearly interpolable. Discrete layers
//! (material index, smoothing flag) are chosen, never blended. Corner layers
//! are stored flat in face order: corner `i` of triangle `f` is `f * 3 + i`.

use crate::point::*;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A named UV layer with one coordinate per face corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvLayer {
    pub name: String,
    pub uvs: Vec<Vector2f>,
}

impl UvLayer {
    pub fn new(name: impl Into<String>, uvs: Vec<Vector2f>) -> Self {
        Self { name: name.into(), uvs }
    }
}

/// A named vertex group with one weight per vertex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexGroup {
    pub name: String,
    pub weights: Vec<f32>,
}

impl VertexGroup {
    pub fn new(name: impl Into<String>, weights: Vec<f32>) -> Self {
        Self { name: name.into(), weights }
    }
}

/// Every attribute layer owned by a mesh
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeSet {
    /// Per-corner UV layers
    pub uv_layers: Vec<UvLayer>,
    /// Per-vertex weight layers
    pub vertex_groups: Vec<VertexGroup>,
    /// Per-face material slot index
    pub material_indices: Option<Vec<u32>>,
    /// Per-face smooth-shading flag
    pub smooth_flags: Option<Vec<bool>>,
    /// Per-corner custom normals, unit length
    pub custom_normals: Option<Vec<Vector3f>>,
}

impl AttributeSet {
    /// Create an empty attribute set
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether no layer is present
    pub fn is_empty(&self) -> bool {
        self.uv_layers.is_empty()
            && self.vertex_groups.is_empty()
            && self.material_indices.is_none()
            && self.smooth_flags.is_none()
            && self.custom_normals.is_none()
    }

    /// Check every layer length against the topology it is indexed by
    pub fn validate(&self, vertex_count: usize, face_count: usize, corner_count: usize) -> Result<()> {
        for layer in &self.uv_layers {
            if layer.uvs.len() != corner_count {
                return Err(Error::InvalidData(format!(
                    "UV layer '{}' has {} corners, mesh has {}",
                    layer.name,
                    layer.uvs.len(),
                    corner_count
                )));
            }
        }
        for group in &self.vertex_groups {
            if group.weights.len() != vertex_count {
                return Err(Error::InvalidData(format!(
                    "vertex group '{}' has {} weights, mesh has {} vertices",
                    group.name,
                    group.weights.len(),
                    vertex_count
                )));
            }
        }
        if let Some(materials) = &self.material_indices {
            if materials.len() != face_count {
                return Err(Error::InvalidData(format!(
                    "material layer has {} entries, mesh has {} faces",
                    materials.len(),
                    face_count
                )));
            }
        }
        if let Some(flags) = &self.smooth_flags {
            if flags.len() != face_count {
                return Err(Error::InvalidData(format!(
                    "smooth-flag layer has {} entries, mesh has {} faces",
                    flags.len(),
                    face_count
                )));
            }
        }
        if let Some(normals) = &self.custom_normals {
            if normals.len() != corner_count {
                return Err(Error::InvalidData(format!(
                    "custom-normal layer has {} corners, mesh has {}",
                    normals.len(),
                    corner_count
                )));
            }
        }
        Ok(())
    }
}
