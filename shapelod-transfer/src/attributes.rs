//! Attribute layer resampling
//!
//! Continuous layers are barycentrically blended through vertex
//! correspondences. Discrete layers are resolved per face by majority vote
//! among the three corner correspondences, with a deterministic tie-break.

use rayon::prelude::*;
use shapelod_core::{
    AttributeSet, Correspondence, TriangleMesh, UvLayer, Vector2f, Vector3f, VertexGroup,
};
use tracing::debug;

/// Resample every attribute layer of `original` onto the simplified
/// topology. The output set carries the same layer kinds and names, sized
/// to the simplified mesh.
pub fn transfer_attributes(
    original: &TriangleMesh,
    simplified: &TriangleMesh,
    correspondences: &[Correspondence],
) -> AttributeSet {
    let mut attributes = AttributeSet::new();

    attributes.uv_layers = transfer_uv_layers(original, simplified, correspondences);
    attributes.vertex_groups = transfer_vertex_groups(original, correspondences);
    attributes.material_indices = original
        .attributes
        .material_indices
        .as_deref()
        .map(|values| resolve_discrete_layer(values, &simplified.faces, correspondences));
    attributes.smooth_flags = original
        .attributes
        .smooth_flags
        .as_deref()
        .map(|values| resolve_discrete_layer(values, &simplified.faces, correspondences));
    attributes.custom_normals = transfer_custom_normals(original, simplified, correspondences);

    debug!(
        uv_layers = attributes.uv_layers.len(),
        vertex_groups = attributes.vertex_groups.len(),
        "Transferred attribute layers"
    );
    attributes
}

/// Blend per-corner UVs: each simplified corner takes the barycentric mix
/// of its vertex's matched original face corners.
pub fn transfer_uv_layers(
    original: &TriangleMesh,
    simplified: &TriangleMesh,
    correspondences: &[Correspondence],
) -> Vec<UvLayer> {
    original
        .attributes
        .uv_layers
        .iter()
        .map(|layer| {
            let per_face: Vec<[Vector2f; 3]> = simplified
                .faces
                .par_iter()
                .map(|face| {
                    let mut corners = [Vector2f::zeros(); 3];
                    for (k, &v) in face.iter().enumerate() {
                        let c = &correspondences[v];
                        let base = c.face * 3;
                        corners[k] = layer.uvs[base] * c.weights[0]
                            + layer.uvs[base + 1] * c.weights[1]
                            + layer.uvs[base + 2] * c.weights[2];
                    }
                    corners
                })
                .collect();

            UvLayer {
                name: layer.name.clone(),
                uvs: per_face.into_iter().flatten().collect(),
            }
        })
        .collect()
}

/// Blend per-vertex group weights through the correspondences. The blend is
/// linear, so whatever normalization convention the source groups follow
/// (summing to 1 across groups or not) carries over unchanged.
pub fn transfer_vertex_groups(
    original: &TriangleMesh,
    correspondences: &[Correspondence],
) -> Vec<VertexGroup> {
    original
        .attributes
        .vertex_groups
        .iter()
        .map(|group| {
            let weights: Vec<f32> = correspondences
                .par_iter()
                .map(|c| {
                    let face = original.faces[c.face];
                    group.weights[face[0]] * c.weights[0]
                        + group.weights[face[1]] * c.weights[1]
                        + group.weights[face[2]] * c.weights[2]
                })
                .collect();

            VertexGroup {
                name: group.name.clone(),
                weights,
            }
        })
        .collect()
}

/// Blend per-corner custom normals, then renormalize to unit length. A
/// blend that cancels to zero falls back to the geometric normal of the
/// simplified face.
pub fn transfer_custom_normals(
    original: &TriangleMesh,
    simplified: &TriangleMesh,
    correspondences: &[Correspondence],
) -> Option<Vec<Vector3f>> {
    let source = original.attributes.custom_normals.as_deref()?;

    let per_face: Vec<[Vector3f; 3]> = simplified
        .faces
        .par_iter()
        .enumerate()
        .map(|(fi, face)| {
            let fallback = simplified.face_normal(fi).unwrap_or_else(Vector3f::z);
            let mut corners = [Vector3f::zeros(); 3];
            for (k, &v) in face.iter().enumerate() {
                let c = &correspondences[v];
                let base = c.face * 3;
                let blended = source[base] * c.weights[0]
                    + source[base + 1] * c.weights[1]
                    + source[base + 2] * c.weights[2];
                corners[k] = blended.try_normalize(1e-6).unwrap_or(fallback);
            }
            corners
        })
        .collect();

    Some(per_face.into_iter().flatten().collect())
}

/// Assign a discrete per-face value (material index, smoothing flag) to
/// every simplified face by majority vote among the values of the three
/// original faces its corners correspond to.
pub fn resolve_discrete_layer<T: Copy + PartialEq + Send + Sync>(
    values: &[T],
    simplified_faces: &[[usize; 3]],
    correspondences: &[Correspondence],
) -> Vec<T> {
    simplified_faces
        .par_iter()
        .map(|face| majority_value(values, *face, correspondences))
        .collect()
}

fn majority_value<T: Copy + PartialEq>(
    values: &[T],
    face: [usize; 3],
    correspondences: &[Correspondence],
) -> T {
    let picks = [
        values[correspondences[face[0]].face],
        values[correspondences[face[1]].face],
        values[correspondences[face[2]].face],
    ];
    if picks[0] == picks[1] || picks[0] == picks[2] {
        return picks[0];
    }
    if picks[1] == picks[2] {
        return picks[1];
    }

    // Three distinct values: the corner whose correspondence lies nearest
    // an original vertex decides, scanning corners in index order
    let mut best = 0;
    let mut best_distance = f32::INFINITY;
    for (k, &v) in face.iter().enumerate() {
        let distance = 1.0 - correspondences[v].max_weight();
        if distance < best_distance {
            best_distance = distance;
            best = k;
        }
    }
    picks[best]
}
