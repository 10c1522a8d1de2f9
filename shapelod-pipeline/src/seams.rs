//! UV seam detection
//!
//! A seam is an interior edge whose two adjacent faces assign different UV
//! coordinates to the shared vertices, which is how UV islands border each
//! other. Collapsing such an edge smears texture across islands, so the
//! pipeline freezes seam edges before simplification.

use itertools::Itertools;
use shapelod_core::{TriangleMesh, UvLayer, Vector2f};
use std::collections::HashSet;

/// UV coordinates closer than this count as agreeing across an edge.
pub const DEFAULT_SEAM_EPSILON: f32 = 1e-5;

/// Find every interior edge where any UV layer disagrees between the two
/// adjacent faces. Edges are returned with endpoints ordered low to high.
pub fn detect_uv_seams(mesh: &TriangleMesh, epsilon: f32) -> HashSet<(usize, usize)> {
    let mut seams = HashSet::new();
    for layer in &mesh.attributes.uv_layers {
        collect_layer_seams(mesh, layer, epsilon, &mut seams);
    }
    seams
}

fn collect_layer_seams(
    mesh: &TriangleMesh,
    layer: &UvLayer,
    epsilon: f32,
    seams: &mut HashSet<(usize, usize)>,
) {
    // Each face contributes its own UV pair for every edge it borders,
    // keyed by the undirected edge with UVs in endpoint order
    let edge_sides: std::collections::HashMap<(usize, usize), Vec<(Vector2f, Vector2f)>> = mesh
        .faces
        .iter()
        .enumerate()
        .flat_map(|(fi, face)| {
            (0..3).map(move |k| {
                let a = face[k];
                let b = face[(k + 1) % 3];
                let uv_a = layer.uvs[fi * 3 + k];
                let uv_b = layer.uvs[fi * 3 + (k + 1) % 3];
                if a <= b {
                    ((a, b), (uv_a, uv_b))
                } else {
                    ((b, a), (uv_b, uv_a))
                }
            })
        })
        .into_group_map();

    for (edge, sides) in edge_sides {
        if sides.len() < 2 {
            continue;
        }
        let (first_a, first_b) = sides[0];
        let disagrees = sides[1..].iter().any(|&(uv_a, uv_b)| {
            (uv_a - first_a).norm() > epsilon || (uv_b - first_b).norm() > epsilon
        });
        if disagrees {
            seams.insert(edge);
        }
    }
}
