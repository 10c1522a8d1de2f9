//! Spatial index over a triangle mesh surface
//!
//! Wraps an R*-tree of indexed triangles so nearest-surface queries run in
//! logarithmic time instead of scanning every face. The index is immutable
//! once built and safe to share across query threads.

use crate::triangle::closest_point_on_triangle;
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use shapelod_core::{Point3f, TriangleMesh};

/// A triangle with its face index for spatial data structures
#[derive(Debug, Clone, PartialEq)]
struct IndexedTriangle {
    face: usize,
    a: Point3f,
    b: Point3f,
    c: Point3f,
}

impl RTreeObject for IndexedTriangle {
    type Envelope = AABB<[f32; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [
                self.a.x.min(self.b.x).min(self.c.x),
                self.a.y.min(self.b.y).min(self.c.y),
                self.a.z.min(self.b.z).min(self.c.z),
            ],
            [
                self.a.x.max(self.b.x).max(self.c.x),
                self.a.y.max(self.b.y).max(self.c.y),
                self.a.z.max(self.b.z).max(self.c.z),
            ],
        )
    }
}

impl PointDistance for IndexedTriangle {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let query = Point3f::new(point[0], point[1], point[2]);
        let (closest, _) = closest_point_on_triangle(&query, &self.a, &self.b, &self.c);
        (query - closest).norm_squared()
    }
}

/// Result of a nearest-surface query: the matched face, the barycentric
/// coordinates of the closest point on it, and the distance to that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub face: usize,
    pub weights: [f32; 3],
    pub distance: f32,
}

/// Read-only nearest-point index over the faces of a mesh.
pub struct SurfaceIndex {
    tree: RTree<IndexedTriangle>,
}

impl SurfaceIndex {
    /// Build the index from every face of the mesh.
    pub fn build(mesh: &TriangleMesh) -> Self {
        let triangles: Vec<IndexedTriangle> = mesh
            .faces
            .iter()
            .enumerate()
            .map(|(fi, face)| IndexedTriangle {
                face: fi,
                a: mesh.vertices[face[0]],
                b: mesh.vertices[face[1]],
                c: mesh.vertices[face[2]],
            })
            .collect();

        Self {
            tree: RTree::bulk_load(triangles),
        }
    }

    /// Number of indexed faces.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Find the exact closest surface point to `query` across all indexed
    /// faces. Returns `None` only when the index is empty.
    pub fn nearest_point(&self, query: &Point3f) -> Option<SurfaceHit> {
        let tri = self.tree.nearest_neighbor(&[query.x, query.y, query.z])?;
        let (closest, weights) = closest_point_on_triangle(query, &tri.a, &tri.b, &tri.c);
        Some(SurfaceHit {
            face: tri.face,
            weights,
            distance: (query - closest).norm(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_two_triangles() -> TriangleMesh {
        // Two coplanar triangles forming a unit quad at z = 0
        TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(1.0, 1.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn test_empty_index() {
        let index = SurfaceIndex::build(&TriangleMesh::new());
        assert!(index.is_empty());
        assert!(index.nearest_point(&Point3f::origin()).is_none());
    }

    #[test]
    fn test_query_above_face_interior() {
        let index = SurfaceIndex::build(&make_two_triangles());
        assert_eq!(index.len(), 2);

        let hit = index.nearest_point(&Point3f::new(0.75, 0.25, 2.0)).unwrap();
        assert_eq!(hit.face, 0);
        assert_relative_eq!(hit.distance, 2.0, epsilon = 1e-6);
        let sum: f32 = hit.weights.iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_query_at_vertex() {
        let mesh = make_two_triangles();
        let index = SurfaceIndex::build(&mesh);

        let hit = index.nearest_point(&Point3f::new(0.0, 1.0, 0.0)).unwrap();
        assert_relative_eq!(hit.distance, 0.0, epsilon = 1e-6);
        // The hit reconstructs the query exactly
        let face = mesh.faces[hit.face];
        let rebuilt = mesh.vertices[face[0]].coords * hit.weights[0]
            + mesh.vertices[face[1]].coords * hit.weights[1]
            + mesh.vertices[face[2]].coords * hit.weights[2];
        assert_relative_eq!(Point3f::from(rebuilt), Point3f::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_far_query_snaps_to_nearest_corner() {
        let index = SurfaceIndex::build(&make_two_triangles());
        let hit = index.nearest_point(&Point3f::new(10.0, 10.0, 0.0)).unwrap();
        // Nearest surface point is the corner (1, 1, 0)
        assert_relative_eq!(hit.distance, (81.0f32 + 81.0).sqrt(), epsilon = 1e-4);
    }
}
