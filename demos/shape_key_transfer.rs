//! Shape key reconstruction walkthrough
//!
//! Builds a grid mesh with two blend shapes and a painted vertex group,
//! decimates it, and compares each key's deformation range before and after.

use nalgebra::Vector3;
use shapelod_core::{Point3f, ShapeKey, TriangleMesh, Vector3f, VertexGroup};
use shapelod_pipeline::{decimate, DecimationRequest};
use shapelod_transfer::SurfaceIndex;

const GRID_SIZE: usize = 17;

fn main() -> anyhow::Result<()> {
    println!("=== shapelod shape key transfer ===\n");

    println!("1. Building a {}x{} grid with two shape keys:", GRID_SIZE, GRID_SIZE);
    let mesh = build_keyed_grid(GRID_SIZE);
    for key in &mesh.shape_keys {
        println!(
            "   key '{}' (value {:.2}): peak offset {:.3}",
            key.name,
            key.value,
            peak_offset(&key.offsets)
        );
    }

    println!("\n2. Decimating to 40% of the faces:");
    let outcome = decimate(&mesh, &DecimationRequest::with_ratio(0.4))?;
    println!("   {}", outcome.summary);

    println!("\n3. Reconstructed keys:");
    for key in &outcome.mesh.shape_keys {
        println!(
            "   key '{}' (value {:.2}): peak offset {:.3}",
            key.name,
            key.value,
            peak_offset(&key.offsets)
        );
    }

    println!("\n4. Vertex group after transfer:");
    for group in &outcome.mesh.attributes.vertex_groups {
        let (lo, hi) = weight_range(&group.weights);
        println!(
            "   group '{}': {} weights in [{:.3}, {:.3}]",
            group.name,
            group.weights.len(),
            lo,
            hi
        );
    }

    println!("\n5. Deviation from the source surface:");
    let index = SurfaceIndex::build(&mesh);
    let total: f32 = outcome
        .mesh
        .vertices
        .iter()
        .filter_map(|v| index.nearest_point(v))
        .map(|hit| hit.distance)
        .sum();
    println!(
        "   mean vertex deviation: {:.6}",
        total / outcome.mesh.vertex_count() as f32
    );

    outcome.mesh.validate()?;
    println!("\n=== done ===");
    Ok(())
}

/// A flat grid with a dome-shaped "Raise" key, a sideways "Shear" key, and a
/// vertex group ramping left to right.
fn build_keyed_grid(size: usize) -> TriangleMesh {
    let mut mesh = TriangleMesh::new();
    for y in 0..size {
        for x in 0..size {
            mesh.add_vertex(Point3f::new(x as f32, y as f32, 0.0));
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
    let center = extent * 0.5;

    let mut raise = ShapeKey::zeroed("Raise", mesh.vertex_count());
    raise.set_value(0.8);
    let mut shear = ShapeKey::zeroed("Shear", mesh.vertex_count());
    shear.set_value(0.3);
    for (i, p) in mesh.vertices.iter().enumerate() {
        let r2 = (p.x - center).powi(2) + (p.y - center).powi(2);
        let dome = (-r2 / (extent * 2.0)).exp() * 2.0;
        raise.offsets[i] = Vector3::new(0.0, 0.0, dome);
        shear.offsets[i] = Vector3::new(p.y / extent, 0.0, 0.0);
    }
    mesh.shape_keys = vec![ShapeKey::basis(mesh.vertex_count()), raise, shear];

    let weights = mesh.vertices.iter().map(|p| p.x / extent).collect();
    mesh.attributes
        .vertex_groups
        .push(VertexGroup::new("Ramp", weights));

    mesh
}

fn peak_offset(offsets: &[Vector3f]) -> f32 {
    offsets.iter().map(|o| o.norm()).fold(0.0, f32::max)
}

fn weight_range(weights: &[f32]) -> (f32, f32) {
    weights
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &w| {
            (lo.min(w), hi.max(w))
        })
}
