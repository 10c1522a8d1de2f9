//! Integration tests for shapelod-pipeline
//!
//! These tests drive the full decimation run end to end: simplification,
//! correspondence mapping, attribute resampling, and shape key
//! reconstruction, through the public `decimate` entry point.

use approx::assert_relative_eq;
use shapelod_core::{
    Error, Point3f, ShapeKey, TriangleMesh, UvLayer, Vector2f, Vector3f, VertexGroup,
};
use shapelod_pipeline::{decimate, DecimationRequest};
use shapelod_transfer::SurfaceIndex;

/// A unit cube: 8 vertices, 12 consistently wound triangles, one shape
/// key raising the (1, 1, 1) corner by (0, 0, 1)
fn create_unit_cube() -> TriangleMesh {
    let mut mesh = TriangleMesh::from_vertices_and_faces(
        vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(1.0, 1.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
            Point3f::new(0.0, 0.0, 1.0),
            Point3f::new(1.0, 0.0, 1.0),
            Point3f::new(1.0, 1.0, 1.0),
            Point3f::new(0.0, 1.0, 1.0),
        ],
        vec![
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [2, 3, 7],
            [2, 7, 6],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ],
    );
    mesh.shape_keys.push(ShapeKey::basis(8));
    let mut bulge = ShapeKey::zeroed("Bulge".to_string(), 8);
    bulge.offsets[6] = Vector3f::new(0.0, 0.0, 1.0);
    bulge.value = 0.5;
    mesh.shape_keys.push(bulge);
    mesh
}

/// Flat grid of size x size vertices in the z = 0 plane
fn create_grid(size: usize) -> TriangleMesh {
    let mut vertices = Vec::new();
    for y in 0..size {
        for x in 0..size {
            vertices.push(Point3f::new(x as f32, y as f32, 0.0));
        }
    }
    let mut faces = Vec::new();
    for y in 0..(size - 1) {
        for x in 0..(size - 1) {
            let tl = y * size + x;
            let tr = tl + 1;
            let bl = (y + 1) * size + x;
            let br = bl + 1;
            faces.push([tl, bl, tr]);
            faces.push([tr, bl, br]);
        }
    }
    TriangleMesh::from_vertices_and_faces(vertices, faces)
}

/// Grid of size x size vertices deformed by a sine bump
fn create_curved_grid(size: usize) -> TriangleMesh {
    let mut mesh = create_grid(size);
    for v in &mut mesh.vertices {
        let fx = v.x / (size - 1) as f32 * std::f32::consts::PI;
        let fy = v.y / (size - 1) as f32 * std::f32::consts::PI;
        v.z = (fx.sin() * fy.sin()) * 2.0;
    }
    mesh
}

/// Continuous per-corner UVs derived from vertex positions, normalized
/// into [0, 1]
fn attach_position_uvs(mesh: &mut TriangleMesh, extent: f32) {
    let mut uvs = Vec::with_capacity(mesh.corner_count());
    for face in &mesh.faces {
        for &v in face {
            let p = mesh.vertices[v];
            uvs.push(Vector2f::new(p.x / extent, p.y / extent));
        }
    }
    mesh.attributes.uv_layers.push(UvLayer {
        name: "UVMap".to_string(),
        uvs,
    });
}

/// Per-corner normals equal to each face's geometric normal
fn attach_face_normals_as_custom(mesh: &mut TriangleMesh) {
    let mut normals = Vec::with_capacity(mesh.corner_count());
    for fi in 0..mesh.face_count() {
        let n = mesh.face_normal(fi).unwrap_or_else(Vector3f::z);
        normals.extend([n, n, n]);
    }
    mesh.attributes.custom_normals = Some(normals);
}

#[test]
fn test_identity_ratio_returns_exact_copy() {
    let cube = create_unit_cube();
    let outcome = decimate(&cube, &DecimationRequest::with_ratio(1.0)).unwrap();

    assert_eq!(outcome.mesh.vertices, cube.vertices);
    assert_eq!(outcome.mesh.faces, cube.faces);
    assert_eq!(outcome.mesh.shape_keys, cube.shape_keys);

    // The shape key still moves exactly one vertex by (0, 0, 1)
    let bulge = &outcome.mesh.shape_keys[1];
    let nonzero: Vec<_> = bulge
        .offsets
        .iter()
        .enumerate()
        .filter(|(_, o)| **o != Vector3f::zeros())
        .collect();
    assert_eq!(nonzero.len(), 1);
    assert_eq!(nonzero[0].0, 6);
    assert_eq!(*nonzero[0].1, Vector3f::new(0.0, 0.0, 1.0));

    assert!(!outcome.summary.was_decimated());
    assert_eq!(outcome.summary.final_faces, 12);
    assert_eq!(outcome.summary.final_vertices, 8);
    assert_eq!(outcome.summary.target_faces, 12);
}

#[test]
fn test_identity_without_shape_keys_gains_basis() {
    let grid = create_grid(4);
    let outcome = decimate(&grid, &DecimationRequest::with_ratio(1.0)).unwrap();

    assert_eq!(outcome.mesh.faces, grid.faces);
    assert_eq!(outcome.mesh.shape_keys.len(), 1);
    assert_eq!(outcome.mesh.shape_keys[0].name, "Basis");
    assert!(outcome.mesh.shape_keys[0].is_zero());
}

#[test]
fn test_zero_shape_keys_processes_without_error() {
    let grid = create_grid(8);
    let outcome = decimate(&grid, &DecimationRequest::with_ratio(0.5)).unwrap();

    assert_eq!(outcome.mesh.face_count(), 49);
    assert_eq!(outcome.mesh.shape_keys.len(), 1);
    assert!(outcome.mesh.shape_keys[0].is_zero());
}

#[test]
fn test_face_count_matches_rounded_target() {
    let cases = [
        (create_grid(10), 0.5, 81),
        (create_curved_grid(8), 0.3, 29),
        (create_grid(6), 0.6, 30),
    ];
    for (mesh, ratio, expected) in cases {
        let outcome = decimate(&mesh, &DecimationRequest::with_ratio(ratio)).unwrap();
        assert_eq!(
            outcome.mesh.face_count(),
            expected,
            "ratio {} of {} faces",
            ratio,
            mesh.face_count()
        );
        assert_eq!(outcome.summary.final_faces, expected);
    }
}

#[test]
fn test_two_material_grid_majority() {
    let mut grid = create_grid(10);
    // Left half material 0, right half material 1, split by face centroid
    let materials: Vec<u32> = (0..grid.face_count())
        .map(|f| u32::from(grid.face_centroid(f).x > 4.5))
        .collect();
    grid.attributes.material_indices = Some(materials);

    let outcome = decimate(&grid, &DecimationRequest::with_ratio(0.5)).unwrap();
    let result = &outcome.mesh;
    let materials = result
        .attributes
        .material_indices
        .as_ref()
        .expect("materials must survive");
    assert_eq!(materials.len(), result.face_count());

    let mut seen = [false; 2];
    for (fi, &material) in materials.iter().enumerate() {
        // No face may get a material absent from both halves
        assert!(material <= 1);
        seen[material as usize] = true;

        // Faces deep inside either half must keep that half's material
        let cx = result.face_centroid(fi).x;
        if cx < 3.5 {
            assert_eq!(material, 0, "left-region face {} at x {}", fi, cx);
        } else if cx > 5.5 {
            assert_eq!(material, 1, "right-region face {} at x {}", fi, cx);
        }
    }
    assert!(seen[0] && seen[1], "both materials must survive");
}

#[test]
fn test_invalid_ratios_produce_no_mesh() {
    let grid = create_grid(4);
    for bad in [0.0f32, -0.25, 1.5, f32::NAN] {
        let result = decimate(&grid, &DecimationRequest::with_ratio(bad));
        assert!(
            matches!(result, Err(Error::InvalidRatio(_))),
            "ratio {} must be rejected",
            bad
        );
    }
}

#[test]
fn test_empty_mesh_fails_before_mapping() {
    let result = decimate(&TriangleMesh::new(), &DecimationRequest::default());
    assert!(matches!(result, Err(Error::EmptyResult { .. })));
}

#[test]
fn test_non_manifold_input_fails_atomically() {
    // Two faces traverse the edge (0, 1) in the same direction
    let mesh = TriangleMesh::from_vertices_and_faces(
        vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(0.5, 1.0, 0.0),
            Point3f::new(0.5, -1.0, 0.0),
        ],
        vec![[0, 1, 2], [0, 1, 3]],
    );
    let result = decimate(&mesh, &DecimationRequest::with_ratio(0.5));
    assert!(matches!(result, Err(Error::NonManifoldInput { .. })));
}

#[test]
fn test_idempotent_runs_are_bit_identical() -> anyhow::Result<()> {
    let mut mesh = create_curved_grid(8);
    attach_position_uvs(&mut mesh, 7.0);
    attach_face_normals_as_custom(&mut mesh);
    mesh.attributes.vertex_groups.push(VertexGroup {
        name: "Gradient".to_string(),
        weights: mesh.vertices.iter().map(|p| p.x / 7.0).collect(),
    });
    mesh.attributes.smooth_flags = Some(vec![true; mesh.face_count()]);
    mesh.shape_keys.push(ShapeKey::basis(mesh.vertex_count()));
    let mut wave = ShapeKey::zeroed("Wave".to_string(), mesh.vertex_count());
    for (v, offset) in wave.offsets.iter_mut().enumerate() {
        *offset = Vector3f::new(0.0, 0.0, (v % 5) as f32 * 0.1);
    }
    wave.value = 0.6;
    mesh.shape_keys.push(wave);

    let request = DecimationRequest::with_ratio(0.4);
    let first = decimate(&mesh, &request)?;
    let second = decimate(&mesh, &request)?;

    assert_eq!(first.mesh, second.mesh);
    assert_eq!(first.summary, second.summary);
    Ok(())
}

#[test]
fn test_uvs_stay_within_source_range() {
    let mut mesh = create_curved_grid(10);
    attach_position_uvs(&mut mesh, 9.0);

    let outcome = decimate(&mesh, &DecimationRequest::with_ratio(0.5)).unwrap();
    let layer = &outcome.mesh.attributes.uv_layers[0];
    assert_eq!(layer.uvs.len(), outcome.mesh.corner_count());

    // Barycentric blends are convex: no output UV may leave the source range
    for uv in &layer.uvs {
        assert!(uv.x >= -1e-5 && uv.x <= 1.0 + 1e-5, "uv.x {} out of range", uv.x);
        assert!(uv.y >= -1e-5 && uv.y <= 1.0 + 1e-5, "uv.y {} out of range", uv.y);
    }
}

#[test]
fn test_vertex_group_tracks_linear_field() {
    let mut mesh = create_grid(8);
    mesh.attributes.vertex_groups.push(VertexGroup {
        name: "Gradient".to_string(),
        weights: mesh.vertices.iter().map(|p| p.x / 7.0).collect(),
    });

    let outcome = decimate(&mesh, &DecimationRequest::with_ratio(0.5)).unwrap();
    let group = &outcome.mesh.attributes.vertex_groups[0];
    assert_eq!(group.name, "Gradient");
    assert_eq!(group.weights.len(), outcome.mesh.vertex_count());

    // The grid is flat, so every output vertex lies on the source surface
    // and the blended linear field must reproduce x / 7 exactly
    for (v, &weight) in group.weights.iter().enumerate() {
        let expected = outcome.mesh.vertices[v].x / 7.0;
        assert_relative_eq!(weight, expected, epsilon = 1e-4);
    }
}

#[test]
fn test_custom_normals_have_unit_length() {
    let mut mesh = create_curved_grid(8);
    attach_face_normals_as_custom(&mut mesh);

    let outcome = decimate(&mesh, &DecimationRequest::with_ratio(0.5)).unwrap();
    let normals = outcome
        .mesh
        .attributes
        .custom_normals
        .as_ref()
        .expect("custom normals must survive");
    assert_eq!(normals.len(), outcome.mesh.corner_count());
    for n in normals {
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-4);
    }
}

#[test]
fn test_uv_seam_column_survives() {
    let size = 6;
    let mut mesh = create_grid(size);
    // Two UV islands split at the x = 2 column: right-island corners are
    // shifted by 0.5 in u, so the column edges disagree across faces
    let mut uvs = Vec::with_capacity(mesh.corner_count());
    for face in &mesh.faces {
        let cx = face.iter().map(|&v| mesh.vertices[v].x).sum::<f32>() / 3.0;
        let island_shift = if cx > 2.0 { 0.5 } else { 0.0 };
        for &v in face {
            let p = mesh.vertices[v];
            uvs.push(Vector2f::new(p.x * 0.1 + island_shift, p.y * 0.1));
        }
    }
    mesh.attributes.uv_layers.push(UvLayer {
        name: "UVMap".to_string(),
        uvs,
    });

    let outcome = decimate(&mesh, &DecimationRequest::with_ratio(0.7)).unwrap();
    assert_eq!(outcome.summary.protected_edges, size - 1);

    // Every vertex along the seam column survives in place
    for y in 0..size {
        let expected = Point3f::new(2.0, y as f32, 0.0);
        assert!(
            outcome.mesh.vertices.contains(&expected),
            "seam vertex {:?} was moved or removed",
            expected
        );
    }
}

#[test]
fn test_shape_key_names_values_and_order_survive() {
    let mut mesh = create_curved_grid(6);
    mesh.shape_keys.push(ShapeKey::basis(mesh.vertex_count()));
    let mut first = ShapeKey::zeroed("Smile".to_string(), mesh.vertex_count());
    first.offsets[10] = Vector3f::new(0.0, 0.3, 0.0);
    first.value = 0.3;
    mesh.shape_keys.push(first);
    let mut second = ShapeKey::zeroed("Frown".to_string(), mesh.vertex_count());
    second.offsets[20] = Vector3f::new(0.0, -0.3, 0.0);
    second.value = 0.9;
    mesh.shape_keys.push(second);

    let outcome = decimate(&mesh, &DecimationRequest::with_ratio(0.5)).unwrap();
    let keys = &outcome.mesh.shape_keys;

    assert_eq!(keys.len(), 3);
    assert_eq!(keys[0].name, "Basis");
    assert!(keys[0].is_zero());
    assert_eq!(keys[1].name, "Smile");
    assert_relative_eq!(keys[1].value, 0.3);
    assert_eq!(keys[2].name, "Frown");
    assert_relative_eq!(keys[2].value, 0.9);
    for key in keys {
        assert_eq!(key.offsets.len(), outcome.mesh.vertex_count());
    }
}

#[test]
fn test_reconstruction_error_grows_as_ratio_shrinks() {
    let mesh = create_curved_grid(12);
    let original_surface = SurfaceIndex::build(&mesh);

    let mean_error = |ratio: f32| -> f64 {
        let outcome = decimate(&mesh, &DecimationRequest::with_ratio(ratio)).unwrap();
        let total: f64 = outcome
            .mesh
            .vertices
            .iter()
            .map(|v| {
                f64::from(
                    original_surface
                        .nearest_point(v)
                        .map(|hit| hit.distance)
                        .unwrap_or(0.0),
                )
            })
            .sum();
        total / outcome.mesh.vertex_count() as f64
    };

    let gentle = mean_error(0.8);
    let medium = mean_error(0.5);
    let coarse = mean_error(0.3);

    assert!(
        medium + 1e-6 >= gentle,
        "error at r=0.5 ({}) dropped below r=0.8 ({})",
        medium,
        gentle
    );
    assert!(
        coarse + 1e-6 >= medium,
        "error at r=0.3 ({}) dropped below r=0.5 ({})",
        coarse,
        medium
    );
}

#[test]
fn test_summary_reports_the_run() -> anyhow::Result<()> {
    let grid = create_grid(10);
    let outcome = decimate(&grid, &DecimationRequest::with_ratio(0.5))?;

    let summary = &outcome.summary;
    assert_eq!(summary.original_faces, 162);
    assert_eq!(summary.final_faces, 81);
    assert_eq!(summary.target_faces, 81);
    assert_eq!(summary.original_vertices, 100);
    // Each collapse merges one vertex away; dropped islands only shrink it
    assert!(summary.final_vertices <= 100 - summary.collapses_performed);
    assert!(summary.was_decimated());
    assert!(summary.collapses_performed >= 40);
    assert_eq!(summary.protected_edges, 0);
    assert_eq!(summary.shape_keys, 1);

    let text = summary.to_string();
    assert!(text.contains("162 -> 81 faces"));
    assert!(text.contains("50.0% reduction"));
    Ok(())
}
