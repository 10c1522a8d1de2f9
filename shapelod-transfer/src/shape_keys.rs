//! Shape key reconstruction
//!
//! Rebuilds every shape key of the original mesh on the simplified
//! topology. A vertex's deformed position under a key is the barycentric
//! blend of the key-deformed positions of its corresponding original face;
//! the stored offset is that position minus the vertex's undeformed
//! simplified position. As the keep ratio approaches 1 the reconstructed
//! offsets converge to the original offsets at matching vertices.

use rayon::prelude::*;
use shapelod_core::{Correspondence, Point3f, ShapeKey, TriangleMesh, Vector3f, DEFAULT_BASIS_NAME};
use tracing::debug;

/// Reconstruct the original mesh's shape keys for the simplified topology.
///
/// The result always starts with an all-zero basis key, followed by one
/// reconstructed key per non-basis input key in input order, each carrying
/// its source name and blend value. An input without shape keys yields the
/// basis key alone. Keys are processed in parallel.
pub fn reconstruct_shape_keys(
    original: &TriangleMesh,
    simplified_vertices: &[Point3f],
    correspondences: &[Correspondence],
) -> Vec<ShapeKey> {
    let basis_name = original
        .shape_keys
        .first()
        .map(|key| key.name.clone())
        .unwrap_or_else(|| DEFAULT_BASIS_NAME.to_string());

    // The basis carries its source name but stays at value zero
    let basis = ShapeKey::zeroed(basis_name, simplified_vertices.len());

    let mut keys = Vec::with_capacity(original.shape_keys.len().max(1));
    keys.push(basis);

    let reconstructed: Vec<ShapeKey> = original
        .shape_keys
        .par_iter()
        .skip(1)
        .map(|key| {
            let offsets: Vec<Vector3f> = simplified_vertices
                .iter()
                .enumerate()
                .map(|(v, base)| {
                    let c = &correspondences[v];
                    let face = original.faces[c.face];
                    let mut deformed = Vector3f::zeros();
                    for (i, &vi) in face.iter().enumerate() {
                        deformed +=
                            (original.vertices[vi].coords + key.offsets[vi]) * c.weights[i];
                    }
                    deformed - base.coords
                })
                .collect();

            ShapeKey {
                name: key.name.clone(),
                value: key.value,
                offsets,
            }
        })
        .collect();
    keys.extend(reconstructed);

    debug!(keys = keys.len(), "Reconstructed shape keys");
    keys
}
