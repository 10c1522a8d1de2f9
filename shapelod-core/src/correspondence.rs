//! Vertex-to-surface correspondences

use serde::{Deserialize, Serialize};

/// One simplified-mesh vertex tied to a point on the original surface: a
/// face index plus barycentric weights over that face's three corners.
/// Weights are non-negative and sum to 1; together with the face they
/// uniquely determine a point on the original mesh, and every attribute
/// resampled for the vertex reads through this single point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correspondence {
    pub face: usize,
    pub weights: [f32; 3],
}

impl Correspondence {
    pub fn new(face: usize, weights: [f32; 3]) -> Self {
        Self { face, weights }
    }

    /// Check the weight invariant: each weight ≥ -eps, sum within eps of 1
    pub fn is_normalized(&self, eps: f32) -> bool {
        let sum: f32 = self.weights.iter().sum();
        (sum - 1.0).abs() <= eps && self.weights.iter().all(|w| *w >= -eps)
    }

    /// The largest of the three weights. A value near 1 means the
    /// correspondence point sits on a corner of its face.
    pub fn max_weight(&self) -> f32 {
        self.weights[0].max(self.weights[1]).max(self.weights[2])
    }
}
