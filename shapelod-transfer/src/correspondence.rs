//! Vertex correspondence mapping
//!
//! For every vertex of a simplified mesh, locates the nearest point on the
//! original surface and records it as a face index plus barycentric
//! weights. Every attribute layer and every shape key is later resampled
//! through this one mapping, so all attributes of an output vertex are
//! derived from the same source point.

use crate::spatial::SurfaceIndex;
use rayon::prelude::*;
use shapelod_core::{Correspondence, Error, Point3f, Result};
use tracing::debug;

/// Clamp tiny negative weights to zero and rescale the triple to sum to 1.
/// The closest-point routine produces weights that satisfy this up to
/// rounding already.
fn normalize_weights(mut weights: [f32; 3]) -> [f32; 3] {
    for w in &mut weights {
        if !w.is_finite() || *w < 0.0 {
            *w = 0.0;
        }
    }
    let sum: f32 = weights.iter().sum();
    if sum > 0.0 {
        for w in &mut weights {
            *w /= sum;
        }
        weights
    } else {
        [1.0, 0.0, 0.0]
    }
}

/// Map every simplified vertex to its nearest point on the indexed
/// original surface.
///
/// Fails with [`Error::CorrespondenceFailure`] naming the first vertex for
/// which no surface point could be located (an empty index). Queries run
/// in parallel; the result order matches the vertex order.
pub fn map_correspondences(
    simplified_vertices: &[Point3f],
    original_surface: &SurfaceIndex,
) -> Result<Vec<Correspondence>> {
    let correspondences: Result<Vec<Correspondence>> = simplified_vertices
        .par_iter()
        .enumerate()
        .map(|(vertex, position)| {
            let hit = original_surface
                .nearest_point(position)
                .ok_or(Error::CorrespondenceFailure { vertex })?;
            Ok(Correspondence::new(hit.face, normalize_weights(hit.weights)))
        })
        .collect();

    let correspondences = correspondences?;
    debug!(
        vertices = correspondences.len(),
        "Mapped vertex correspondences"
    );
    Ok(correspondences)
}
