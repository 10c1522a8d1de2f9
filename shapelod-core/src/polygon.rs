//! Polygonal ingest and fan triangulation
//!
//! Source assets may carry faces with any number of corners. The engine is
//! triangle-native, so polygon input passes through [`PolygonMesh::triangulate`]
//! exactly once; every downstream stage then sees the same triangles, which
//! keeps corner-layer continuity consistent between simplification and
//! nearest-surface indexing.

use crate::attributes::{AttributeSet, UvLayer};
use crate::mesh::TriangleMesh;
use crate::point::*;
use crate::shape_key::ShapeKey;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A mesh whose faces may have three or more corners. Corner layers are
/// stored flat in face order, so the corners of face `f` start at the sum
/// of the arities of faces `0..f`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<Vec<usize>>,
    pub attributes: AttributeSet,
    pub shape_keys: Vec<ShapeKey>,
}

impl PolygonMesh {
    /// Create a polygon mesh from vertices and faces, with no attribute layers
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<Vec<usize>>) -> Self {
        Self {
            vertices,
            faces,
            attributes: AttributeSet::new(),
            shape_keys: Vec::new(),
        }
    }

    /// Get the number of face corners across all faces
    pub fn corner_count(&self) -> usize {
        self.faces.iter().map(|f| f.len()).sum()
    }

    /// Fan-triangulate into a [`TriangleMesh`], remapping every layer.
    ///
    /// A face with corners `c0..cn` becomes the triangles `(c0, ck, ck+1)`.
    /// Per-face layers copy the face's value onto each fan triangle;
    /// per-corner layers follow the corners; per-vertex data is untouched.
    pub fn triangulate(&self) -> Result<TriangleMesh> {
        let vertex_count = self.vertices.len();
        for (i, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(Error::InvalidData(format!(
                    "face {} has {} corners, need at least 3",
                    i,
                    face.len()
                )));
            }
            if face.iter().any(|&v| v >= vertex_count) {
                return Err(Error::InvalidData(format!(
                    "face {} references a vertex outside 0..{}",
                    i, vertex_count
                )));
            }
        }
        self.attributes
            .validate(vertex_count, self.faces.len(), self.corner_count())?;

        let triangle_count: usize = self.faces.iter().map(|f| f.len() - 2).sum();

        let mut faces = Vec::with_capacity(triangle_count);
        // Source corner indices for each emitted triangle corner
        let mut corner_map = Vec::with_capacity(triangle_count * 3);
        // Source face index for each emitted triangle
        let mut face_map = Vec::with_capacity(triangle_count);

        let mut corner_start = 0;
        for (face_idx, face) in self.faces.iter().enumerate() {
            for k in 1..face.len() - 1 {
                faces.push([face[0], face[k], face[k + 1]]);
                corner_map.push(corner_start);
                corner_map.push(corner_start + k);
                corner_map.push(corner_start + k + 1);
                face_map.push(face_idx);
            }
            corner_start += face.len();
        }

        let attributes = AttributeSet {
            uv_layers: self
                .attributes
                .uv_layers
                .iter()
                .map(|layer| UvLayer {
                    name: layer.name.clone(),
                    uvs: corner_map.iter().map(|&c| layer.uvs[c]).collect(),
                })
                .collect(),
            vertex_groups: self.attributes.vertex_groups.clone(),
            material_indices: self
                .attributes
                .material_indices
                .as_ref()
                .map(|materials| face_map.iter().map(|&f| materials[f]).collect()),
            smooth_flags: self
                .attributes
                .smooth_flags
                .as_ref()
                .map(|flags| face_map.iter().map(|&f| flags[f]).collect()),
            custom_normals: self
                .attributes
                .custom_normals
                .as_ref()
                .map(|normals| corner_map.iter().map(|&c| normals[c]).collect()),
        };

        let mesh = TriangleMesh {
            vertices: self.vertices.clone(),
            faces,
            attributes,
            shape_keys: self.shape_keys.clone(),
        };
        mesh.validate()?;
        Ok(mesh)
    }
}
