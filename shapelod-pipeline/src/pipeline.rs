//! Decimation run orchestration
//!
//! Stages: validate, detect UV seams, simplify topology, map vertex
//! correspondences back to the original surface, resample attribute
//! layers, reconstruct shape keys. A keep ratio of 1.0 short-circuits to a
//! deep copy. Any stage failure aborts the whole run; no partial mesh is
//! ever returned.

use crate::request::DecimationRequest;
use crate::seams::{detect_uv_seams, DEFAULT_SEAM_EPSILON};
use serde::{Deserialize, Serialize};
use shapelod_core::{Error, Result, ShapeKey, TriangleMesh};
use shapelod_simplification::EdgeCollapseSimplifier;
use shapelod_transfer::{
    map_correspondences, reconstruct_shape_keys, transfer_attributes, SurfaceIndex,
};
use std::collections::HashSet;
use tracing::info;

/// Counters describing one completed decimation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Faces in the source mesh
    pub original_faces: usize,
    /// Faces in the output mesh
    pub final_faces: usize,
    /// Vertices in the source mesh
    pub original_vertices: usize,
    /// Vertices in the output mesh
    pub final_vertices: usize,
    /// Face count the simplifier aimed for, after rounding and clamping
    pub target_faces: usize,
    /// Edge collapses executed
    pub collapses_performed: usize,
    /// Collapse candidates rejected (stale, link condition, geometry
    /// checks, face target)
    pub collapses_rejected: usize,
    /// UV seam edges frozen during simplification
    pub protected_edges: usize,
    /// Shape keys on the output mesh, basis included
    pub shape_keys: usize,
}

impl RunSummary {
    /// Fraction of faces kept (final / original).
    pub fn keep_ratio(&self) -> f64 {
        if self.original_faces == 0 {
            1.0
        } else {
            self.final_faces as f64 / self.original_faces as f64
        }
    }

    /// Percentage of faces removed.
    pub fn reduction_percent(&self) -> f64 {
        (1.0 - self.keep_ratio()) * 100.0
    }

    /// Whether any collapse actually happened.
    pub const fn was_decimated(&self) -> bool {
        self.collapses_performed > 0
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Decimation: {} -> {} faces ({:.1}% reduction, {} collapses, {} shape keys)",
            self.original_faces,
            self.final_faces,
            self.reduction_percent(),
            self.collapses_performed,
            self.shape_keys
        )
    }
}

/// A decimated mesh together with its run summary.
#[derive(Debug, Clone)]
pub struct DecimationOutcome {
    pub mesh: TriangleMesh,
    pub summary: RunSummary,
}

/// Decimate `mesh` according to `request`, preserving every attribute
/// layer and shape key on the simplified topology.
///
/// The input is read-only; the returned mesh shares no storage with it.
/// Fails with [`Error::InvalidRatio`] for ratios outside (0, 1],
/// [`Error::EmptyResult`] for a faceless source, [`Error::NonManifoldInput`]
/// when an edge borders more than two faces, and
/// [`Error::CorrespondenceFailure`] when a simplified vertex cannot be
/// matched to the original surface.
pub fn decimate(mesh: &TriangleMesh, request: &DecimationRequest) -> Result<DecimationOutcome> {
    request.validate()?;
    mesh.validate()?;

    if mesh.face_count() == 0 {
        return Err(Error::EmptyResult {
            target: 0,
            source_faces: 0,
        });
    }

    info!(
        faces = mesh.face_count(),
        vertices = mesh.vertex_count(),
        ratio = request.ratio,
        "Starting mesh decimation"
    );

    if request.ratio == 1.0 {
        return Ok(identity_copy(mesh));
    }

    let protected = if request.protect_uv_seams {
        detect_uv_seams(mesh, DEFAULT_SEAM_EPSILON)
    } else {
        HashSet::new()
    };

    let simplifier = EdgeCollapseSimplifier::with_params(
        request.error_threshold,
        request.preserve_boundary,
        request.boundary_weight,
    )
    .with_protected_edges(protected.iter().copied());
    let (simplified, stats) = simplifier.simplify_with_stats(mesh, request.ratio)?;

    if simplified.face_count() == 0 {
        return Err(Error::EmptyResult {
            target: 0,
            source_faces: mesh.face_count(),
        });
    }

    let original_surface = SurfaceIndex::build(mesh);
    let correspondences = map_correspondences(&simplified.vertices, &original_surface)?;

    let attributes = transfer_attributes(mesh, &simplified, &correspondences);
    let shape_keys = reconstruct_shape_keys(mesh, &simplified.vertices, &correspondences);

    let mut result = simplified;
    result.attributes = attributes;
    result.shape_keys = shape_keys;

    let summary = RunSummary {
        original_faces: mesh.face_count(),
        final_faces: result.face_count(),
        original_vertices: mesh.vertex_count(),
        final_vertices: result.vertex_count(),
        target_faces: stats.target_faces,
        collapses_performed: stats.performed,
        collapses_rejected: stats.rejected,
        protected_edges: protected.len(),
        shape_keys: result.shape_keys.len(),
    };
    info!(
        faces = summary.final_faces,
        vertices = summary.final_vertices,
        target = summary.target_faces,
        collapses = summary.collapses_performed,
        rejected = summary.collapses_rejected,
        seam_edges = summary.protected_edges,
        shape_keys = summary.shape_keys,
        "Decimation complete"
    );

    Ok(DecimationOutcome {
        mesh: result,
        summary,
    })
}

/// Full-fidelity copy for a keep ratio of 1.0. Layers and keys are cloned
/// bit for bit; a mesh without shape keys still gains its basis key.
fn identity_copy(mesh: &TriangleMesh) -> DecimationOutcome {
    let mut copy = mesh.clone();
    if copy.shape_keys.is_empty() {
        copy.shape_keys.push(ShapeKey::basis(copy.vertex_count()));
    }

    let summary = RunSummary {
        original_faces: mesh.face_count(),
        final_faces: copy.face_count(),
        original_vertices: mesh.vertex_count(),
        final_vertices: copy.vertex_count(),
        target_faces: mesh.face_count(),
        collapses_performed: 0,
        collapses_rejected: 0,
        protected_edges: 0,
        shape_keys: copy.shape_keys.len(),
    };

    DecimationOutcome {
        mesh: copy,
        summary,
    }
}
