//! Mesh data structures and functionality

use crate::attributes::AttributeSet;
use crate::point::*;
use crate::shape_key::ShapeKey;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A triangle mesh with owned attribute layers and shape keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub attributes: AttributeSet,
    pub shape_keys: Vec<ShapeKey>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            attributes: AttributeSet::new(),
            shape_keys: Vec::new(),
        }
    }

    /// Create a mesh from vertices and faces, with no attribute layers
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            attributes: AttributeSet::new(),
            shape_keys: Vec::new(),
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of face corners
    pub fn corner_count(&self) -> usize {
        self.faces.len() * 3
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Unit normal of one face, or None when the face is degenerate
    pub fn face_normal(&self, face: usize) -> Option<Vector3f> {
        let [a, b, c] = self.faces[face];
        let edge1 = self.vertices[b] - self.vertices[a];
        let edge2 = self.vertices[c] - self.vertices[a];
        edge1.cross(&edge2).try_normalize(1e-12)
    }

    /// Area of one face, zero when the face is degenerate
    pub fn face_area(&self, face: usize) -> f32 {
        let [a, b, c] = self.faces[face];
        let edge1 = self.vertices[b] - self.vertices[a];
        let edge2 = self.vertices[c] - self.vertices[a];
        edge1.cross(&edge2).norm() * 0.5
    }

    /// Centroid of one face
    pub fn face_centroid(&self, face: usize) -> Point3f {
        let [a, b, c] = self.faces[face];
        Point3f::from(
            (self.vertices[a].coords + self.vertices[b].coords + self.vertices[c].coords) / 3.0,
        )
    }

    /// Axis-aligned bounding box as (min, max)
    pub fn bounding_box(&self) -> (Point3f, Point3f) {
        if self.vertices.is_empty() {
            return (Point3f::origin(), Point3f::origin());
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for vertex in &self.vertices {
            min.x = min.x.min(vertex.x);
            min.y = min.y.min(vertex.y);
            min.z = min.z.min(vertex.z);

            max.x = max.x.max(vertex.x);
            max.y = max.y.max(vertex.y);
            max.z = max.z.max(vertex.z);
        }

        (min, max)
    }

    /// Check structural invariants: face indices in range, attribute layers
    /// sized to their domain, shape keys sized to the vertex count with an
    /// all-zero basis first.
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertex_count();
        for (i, face) in self.faces.iter().enumerate() {
            if face.iter().any(|&v| v >= vertex_count) {
                return Err(Error::InvalidData(format!(
                    "face {} references a vertex outside 0..{}",
                    i, vertex_count
                )));
            }
        }

        self.attributes
            .validate(vertex_count, self.face_count(), self.corner_count())?;

        for (i, key) in self.shape_keys.iter().enumerate() {
            if key.offsets.len() != vertex_count {
                return Err(Error::InvalidData(format!(
                    "shape key '{}' has {} offsets, mesh has {} vertices",
                    key.name,
                    key.offsets.len(),
                    vertex_count
                )));
            }
            if i == 0 && !key.is_zero() {
                return Err(Error::InvalidData(format!(
                    "basis key '{}' has nonzero offsets",
                    key.name
                )));
            }
        }

        Ok(())
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}
