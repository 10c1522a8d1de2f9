//! Basic decimation walkthrough
//!
//! Builds a curved grid mesh carrying UVs, materials, and smooth flags, then
//! decimates it to several target ratios and prints what each run did.

use shapelod_core::{Point3f, TriangleMesh, UvLayer, Vector2f};
use shapelod_pipeline::{decimate, DecimationRequest};
use shapelod_simplification::EdgeCollapseSimplifier;
use std::time::Instant;

const GRID_SIZE: usize = 33;

fn main() -> anyhow::Result<()> {
    println!("=== shapelod basic decimation ===\n");

    // 1. Build a test surface
    println!("1. Building a curved {}x{} grid:", GRID_SIZE, GRID_SIZE);
    let mesh = build_curved_grid(GRID_SIZE);
    let (min, max) = mesh.bounding_box();
    println!(
        "   {} vertices, {} faces",
        mesh.vertex_count(),
        mesh.face_count()
    );
    println!(
        "   bounds ({:.1}, {:.1}, {:.1}) to ({:.1}, {:.1}, {:.1})",
        min.x, min.y, min.z, max.x, max.y, max.z
    );

    // 2. Decimate at several ratios
    println!("\n2. Decimating:");
    for ratio in [0.75_f32, 0.5, 0.25, 0.1] {
        let request = DecimationRequest::with_ratio(ratio);
        let start = Instant::now();
        let outcome = decimate(&mesh, &request)?;
        println!(
            "   ratio {:.2}: {} in {:.2?}",
            ratio,
            outcome.summary,
            start.elapsed()
        );
    }

    // 3. Inspect attribute survival on one run
    println!("\n3. Attributes after the 50% run:");
    let outcome = decimate(&mesh, &DecimationRequest::with_ratio(0.5))?;
    let result = &outcome.mesh;
    for layer in &result.attributes.uv_layers {
        println!("   UV layer '{}': {} corners", layer.name, layer.uvs.len());
    }
    if let Some(materials) = &result.attributes.material_indices {
        let used: std::collections::HashSet<_> = materials.iter().collect();
        println!(
            "   materials: {} faces across {} slots",
            materials.len(),
            used.len()
        );
    }
    if let Some(flags) = &result.attributes.smooth_flags {
        let smooth = flags.iter().filter(|&&f| f).count();
        println!("   smooth flags: {}/{} faces smooth", smooth, flags.len());
    }
    result.validate()?;
    println!("   validate(): ok");

    // 4. Drive the collapse stage directly, without attribute transfer
    println!("\n4. Geometry-only collapse with hard boundary preservation:");
    let simplifier = EdgeCollapseSimplifier::with_params(None, true, 0.0);
    let (bare, stats) = simplifier.simplify_with_stats(&mesh, 0.25)?;
    println!(
        "   {} faces left, {} collapses performed, {} rejected",
        bare.face_count(),
        stats.performed,
        stats.rejected
    );

    println!("\n=== done ===");
    Ok(())
}

/// A size x size vertex grid over a gentle sine bump, with position-derived
/// UVs, a two-slot material split down the middle, and all faces smooth.
fn build_curved_grid(size: usize) -> TriangleMesh {
    let mut mesh = TriangleMesh::new();
    for y in 0..size {
        for x in 0..size {
            let (fx, fy) = (x as f32, y as f32);
            let z = (fx * 0.6).sin() * (fy * 0.6).cos();
            mesh.add_vertex(Point3f::new(fx, fy, z));
        }
    }
    for y in 0..size - 1 {
        for x in 0..size - 1 {
            let i = y * size + x;
            mesh.add_face([i, i + 1, i + size]);
            mesh.add_face([i + 1, i + size + 1, i + size]);
        }
    }

    let extent = (size - 1) as f32;
    let mut uvs = Vec::with_capacity(mesh.corner_count());
    for face in &mesh.faces {
        for &v in face {
            let p = mesh.vertices[v];
            uvs.push(Vector2f::new(p.x / extent, p.y / extent));
        }
    }
    mesh.attributes.uv_layers.push(UvLayer::new("UVMap", uvs));

    let half = extent * 0.5;
    let materials = (0..mesh.face_count())
        .map(|f| u32::from(mesh.face_centroid(f).x >= half))
        .collect();
    mesh.attributes.material_indices = Some(materials);
    mesh.attributes.smooth_flags = Some(vec![true; mesh.face_count()]);

    mesh
}
