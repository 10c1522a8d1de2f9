//! Edge collapse simplification
//!
//! Implements iterative edge collapse on a half-edge structure, ordered by
//! quadric error metrics (QEM). The simplifier reads positions and faces
//! only and lands on an exact face target where the topology admits one:
//! a candidate collapse is skipped when executing it would drop the face
//! count below the target, so the loop can finish with a one-face boundary
//! collapse instead of overshooting past the target. Candidates that would
//! crush a surviving face to zero area or fold it over are skipped too, so
//! the output never contains degenerate faces.

use crate::MeshSimplifier;
use nalgebra::{Matrix4, Vector4};
use priority_queue::PriorityQueue;
use rayon::prelude::*;
use shapelod_core::{Error, Point3f, Result, TriangleMesh};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

const INVALID: usize = usize::MAX;

/// Minimum face count a target is clamped to; a closed mesh needs at least
/// four triangles to stay manifold.
pub const MIN_FACES: usize = 4;

// ============================================================
// Half-Edge Data Structure
// ============================================================

#[derive(Debug, Clone)]
struct HalfEdge {
    target: usize,
    twin: usize,
    next: usize,
    prev: usize,
    face: usize,
}

/// Half-edge mesh for topology-aware edge collapse operations.
struct HalfEdgeMesh {
    half_edges: Vec<HalfEdge>,
    /// One outgoing half-edge per vertex (INVALID if removed)
    vertex_edge: Vec<usize>,
    /// One half-edge per face (INVALID if removed)
    face_edge: Vec<usize>,
    active_face_count: usize,
    positions: Vec<Point3f>,
    quadrics: Vec<Matrix4<f64>>,
    vertex_removed: Vec<bool>,
}

impl HalfEdgeMesh {
    /// Build the half-edge structure, rejecting non-manifold input: a
    /// directed edge that appears twice means an undirected edge borders
    /// more than two faces (or the winding is inconsistent).
    fn from_triangle_mesh(mesh: &TriangleMesh) -> Result<Self> {
        let nv = mesh.vertices.len();
        let nf = mesh.faces.len();

        let mut half_edges = Vec::with_capacity(nf * 3);
        let mut vertex_edge = vec![INVALID; nv];
        let mut face_edge = Vec::with_capacity(nf);

        for (fi, face) in mesh.faces.iter().enumerate() {
            let base = fi * 3;
            for j in 0..3usize {
                half_edges.push(HalfEdge {
                    target: face[(j + 1) % 3],
                    twin: INVALID,
                    next: base + (j + 1) % 3,
                    prev: base + (j + 2) % 3,
                    face: fi,
                });
                if vertex_edge[face[j]] == INVALID {
                    vertex_edge[face[j]] = base + j;
                }
            }
            face_edge.push(base);
        }

        // Build twin pointers
        let mut edge_map: HashMap<(usize, usize), usize> = HashMap::with_capacity(nf * 3);
        for (he_idx, he) in half_edges.iter().enumerate() {
            let src = half_edges[he.prev].target;
            if edge_map.insert((src, he.target), he_idx).is_some() {
                return Err(Error::NonManifoldInput {
                    edge: (src, he.target),
                });
            }
        }
        for he_idx in 0..half_edges.len() {
            if half_edges[he_idx].twin != INVALID {
                continue;
            }
            let src = half_edges[half_edges[he_idx].prev].target;
            let tgt = half_edges[he_idx].target;
            if let Some(&twin_idx) = edge_map.get(&(tgt, src)) {
                half_edges[he_idx].twin = twin_idx;
                half_edges[twin_idx].twin = he_idx;
            }
        }

        let mut hem = HalfEdgeMesh {
            half_edges,
            vertex_edge,
            face_edge,
            active_face_count: nf,
            positions: mesh.vertices.clone(),
            quadrics: vec![Matrix4::zeros(); nv],
            vertex_removed: vec![false; nv],
        };
        hem.initialize_quadrics();
        Ok(hem)
    }

    #[inline]
    fn source(&self, he: usize) -> usize {
        self.half_edges[self.half_edges[he].prev].target
    }

    fn compute_plane(v0: &Point3f, v1: &Point3f, v2: &Point3f) -> Vector4<f64> {
        let e1 = v1 - v0;
        let e2 = v2 - v0;
        let n = e1.cross(&e2).normalize();
        if !n.iter().all(|x| x.is_finite()) {
            return Vector4::new(0.0, 0.0, 1.0, 0.0);
        }
        let d = -n.dot(&v0.coords);
        Vector4::new(n.x as f64, n.y as f64, n.z as f64, d as f64)
    }

    fn plane_to_quadric(p: &Vector4<f64>) -> Matrix4<f64> {
        let (a, b, c, d) = (p[0], p[1], p[2], p[3]);
        Matrix4::new(
            a * a, a * b, a * c, a * d,
            a * b, b * b, b * c, b * d,
            a * c, b * c, c * c, c * d,
            a * d, b * d, c * d, d * d,
        )
    }

    fn initialize_quadrics(&mut self) {
        let face_vertices: Vec<[usize; 3]> = (0..self.face_edge.len())
            .filter_map(|fi| {
                let he0 = self.face_edge[fi];
                if he0 == INVALID {
                    return None;
                }
                let he1 = self.half_edges[he0].next;
                Some([
                    self.source(he0),
                    self.half_edges[he0].target,
                    self.half_edges[he1].target,
                ])
            })
            .collect();

        let face_quadrics: Vec<([usize; 3], Matrix4<f64>)> = face_vertices
            .par_iter()
            .map(|&[v0, v1, v2]| {
                let plane = Self::compute_plane(
                    &self.positions[v0],
                    &self.positions[v1],
                    &self.positions[v2],
                );
                ([v0, v1, v2], Self::plane_to_quadric(&plane))
            })
            .collect();

        for (verts, q) in face_quadrics {
            for v in verts {
                self.quadrics[v] += q;
            }
        }
    }

    /// Get all outgoing half-edges from a vertex (handles boundary vertices).
    fn outgoing_half_edges(&self, v: usize) -> Vec<usize> {
        let start = self.vertex_edge[v];
        if start == INVALID {
            return vec![];
        }

        let mut result = Vec::new();
        let mut current = start;

        // Rotate counterclockwise: current.prev.twin
        loop {
            result.push(current);
            let prev = self.half_edges[current].prev;
            let twin = self.half_edges[prev].twin;
            if twin == INVALID {
                break;
            }
            current = twin;
            if current == start {
                return result;
            }
        }

        // Boundary: also rotate clockwise from start via twin.next
        let twin_of_start = self.half_edges[start].twin;
        if twin_of_start != INVALID {
            let mut current = self.half_edges[twin_of_start].next;
            loop {
                if current == start {
                    break;
                }
                result.push(current);
                let twin = self.half_edges[current].twin;
                if twin == INVALID {
                    break;
                }
                current = self.half_edges[twin].next;
            }
        }

        result
    }

    fn neighbors(&self, v: usize) -> HashSet<usize> {
        self.outgoing_half_edges(v)
            .iter()
            .map(|&he| self.half_edges[he].target)
            .collect()
    }

    fn is_boundary_vertex(&self, v: usize) -> bool {
        for &he in &self.outgoing_half_edges(v) {
            if self.half_edges[he].twin == INVALID {
                return true;
            }
        }
        false
    }

    /// Check the link condition: common neighbors must equal exactly the
    /// face apices opposite the edge (2 for interior, 1 for boundary).
    fn check_link_condition(&self, v1: usize, v2: usize) -> bool {
        let n1 = self.neighbors(v1);
        let n2 = self.neighbors(v2);
        let common_count = n1.intersection(&n2).count();

        let h = match self.find_half_edge(v1, v2) {
            Some(h) => h,
            None => return false,
        };
        let is_boundary = self.half_edges[h].twin == INVALID;
        let expected = if is_boundary { 1 } else { 2 };
        common_count == expected
    }

    fn find_half_edge(&self, from: usize, to: usize) -> Option<usize> {
        for &he in &self.outgoing_half_edges(from) {
            if self.half_edges[he].target == to {
                return Some(he);
            }
        }
        None
    }

    /// Check whether merging (v1, v2) at new_pos would crush a surviving
    /// adjacent face to zero area or fold it against its current normal.
    fn collapse_would_degenerate(&self, v1: usize, v2: usize, new_pos: Point3f) -> bool {
        for &v in &[v1, v2] {
            for &he in &self.outgoing_half_edges(v) {
                if self.half_edges[he].face == INVALID {
                    continue;
                }
                let next = self.half_edges[he].next;
                let a = self.source(he);
                let b = self.half_edges[he].target;
                let c = self.half_edges[next].target;

                // Faces spanning the collapsing edge vanish with it
                if (a == v1 || b == v1 || c == v1) && (a == v2 || b == v2 || c == v2) {
                    continue;
                }

                let moved = |idx: usize| {
                    if idx == v1 || idx == v2 {
                        new_pos
                    } else {
                        self.positions[idx]
                    }
                };
                let after = (moved(b) - moved(a)).cross(&(moved(c) - moved(a)));
                let after_n = match after.try_normalize(1e-12) {
                    Some(n) => n,
                    None => return true,
                };

                let before = (self.positions[b] - self.positions[a])
                    .cross(&(self.positions[c] - self.positions[a]));
                if let Some(before_n) = before.try_normalize(1e-12) {
                    if before_n.dot(&after_n) <= 0.0 {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn compute_collapse_cost(&self, v1: usize, v2: usize) -> (Point3f, f64) {
        let q = self.quadrics[v1] + self.quadrics[v2];
        let q3 = q.fixed_view::<3, 3>(0, 0);
        let q1 = q.fixed_view::<3, 1>(0, 3);

        let optimal = if let Some(inv) = q3.try_inverse() {
            let p = -inv * q1;
            Point3f::new(p[0] as f32, p[1] as f32, p[2] as f32)
        } else {
            Point3f::from((self.positions[v1].coords + self.positions[v2].coords) * 0.5)
        };

        let vh = Vector4::new(optimal.x as f64, optimal.y as f64, optimal.z as f64, 1.0);
        let cost = (vh.transpose() * q * vh)[0].max(0.0);
        (optimal, cost)
    }

    /// Find any valid outgoing half-edge from a vertex (linear scan fallback).
    fn find_valid_outgoing(&self, v: usize) -> usize {
        for (i, he) in self.half_edges.iter().enumerate() {
            if he.face != INVALID && self.source(i) == v {
                return i;
            }
        }
        INVALID
    }

    /// Collapse edge (v1, v2), merging v2 into v1 at new_pos.
    /// Returns true on success.
    fn collapse_edge(&mut self, v1: usize, v2: usize, new_pos: Point3f) -> bool {
        let h = match self.find_half_edge(v1, v2) {
            Some(h) => h,
            None => return false,
        };

        let h_twin = self.half_edges[h].twin;
        let h_next = self.half_edges[h].next;
        let h_prev = self.half_edges[h].prev;
        let face_a = self.half_edges[h].face;
        let h_next_twin = self.half_edges[h_next].twin;
        let h_prev_twin = self.half_edges[h_prev].twin;
        let c = self.half_edges[h_next].target;

        let (face_b, ht_next, ht_prev, ht_next_twin, ht_prev_twin, d) = if h_twin != INVALID {
            let hn = self.half_edges[h_twin].next;
            let hp = self.half_edges[h_twin].prev;
            (
                self.half_edges[h_twin].face,
                hn,
                hp,
                self.half_edges[hn].twin,
                self.half_edges[hp].twin,
                self.half_edges[hn].target,
            )
        } else {
            (INVALID, INVALID, INVALID, INVALID, INVALID, INVALID)
        };

        // Collect v2 outgoing edges BEFORE any modifications
        let v2_outgoing = self.outgoing_half_edges(v2);

        // Re-pair twins for face A border edges
        if h_next_twin != INVALID {
            self.half_edges[h_next_twin].twin = h_prev_twin;
        }
        if h_prev_twin != INVALID {
            self.half_edges[h_prev_twin].twin = h_next_twin;
        }

        // Mark face A as removed
        self.half_edges[h].face = INVALID;
        self.half_edges[h_next].face = INVALID;
        self.half_edges[h_prev].face = INVALID;
        self.face_edge[face_a] = INVALID;
        self.active_face_count -= 1;

        // Handle face B
        if face_b != INVALID {
            if ht_next_twin != INVALID {
                self.half_edges[ht_next_twin].twin = ht_prev_twin;
            }
            if ht_prev_twin != INVALID {
                self.half_edges[ht_prev_twin].twin = ht_next_twin;
            }
            self.half_edges[h_twin].face = INVALID;
            self.half_edges[ht_next].face = INVALID;
            self.half_edges[ht_prev].face = INVALID;
            self.face_edge[face_b] = INVALID;
            self.active_face_count -= 1;
        }

        // Redirect all v2 references to v1
        for &he in &v2_outgoing {
            let prev = self.half_edges[he].prev;
            self.half_edges[prev].target = v1;

            let twin = self.half_edges[he].twin;
            if twin != INVALID && self.half_edges[twin].face != INVALID {
                self.half_edges[twin].target = v1;
            }
        }

        // Fix vertex_edge pointers for v1
        if self.half_edges[self.vertex_edge[v1]].face == INVALID {
            if h_prev_twin != INVALID && self.half_edges[h_prev_twin].face != INVALID {
                self.vertex_edge[v1] = h_prev_twin;
            } else {
                self.vertex_edge[v1] = self.find_valid_outgoing(v1);
            }
        }

        // Fix vertex_edge for c
        if c != INVALID
            && self.vertex_edge[c] != INVALID
            && self.half_edges[self.vertex_edge[c]].face == INVALID
        {
            if h_next_twin != INVALID && self.half_edges[h_next_twin].face != INVALID {
                self.vertex_edge[c] = h_next_twin;
            } else {
                self.vertex_edge[c] = self.find_valid_outgoing(c);
            }
        }

        // Fix vertex_edge for d
        if d != INVALID
            && d != c
            && self.vertex_edge[d] != INVALID
            && self.half_edges[self.vertex_edge[d]].face == INVALID
        {
            if ht_next_twin != INVALID && self.half_edges[ht_next_twin].face != INVALID {
                self.vertex_edge[d] = ht_next_twin;
            } else {
                self.vertex_edge[d] = self.find_valid_outgoing(d);
            }
        }

        // Mark v2 as removed
        self.vertex_edge[v2] = INVALID;
        self.vertex_removed[v2] = true;

        // Update position and quadric for v1
        let v2_quadric = self.quadrics[v2];
        self.positions[v1] = new_pos;
        self.quadrics[v1] += v2_quadric;

        true
    }

    fn to_triangle_mesh(&self) -> TriangleMesh {
        let mut old_to_new: HashMap<usize, usize> = HashMap::new();
        let mut new_positions = Vec::new();

        for (i, &removed) in self.vertex_removed.iter().enumerate() {
            if !removed && self.vertex_edge[i] != INVALID {
                old_to_new.insert(i, new_positions.len());
                new_positions.push(self.positions[i]);
            }
        }

        let mut new_faces = Vec::new();
        for fi in 0..self.face_edge.len() {
            let he0 = self.face_edge[fi];
            if he0 == INVALID {
                continue;
            }
            let he1 = self.half_edges[he0].next;
            let v0 = self.source(he0);
            let v1 = self.half_edges[he0].target;
            let v2 = self.half_edges[he1].target;

            if let (Some(&nv0), Some(&nv1), Some(&nv2)) =
                (old_to_new.get(&v0), old_to_new.get(&v1), old_to_new.get(&v2))
            {
                if nv0 != nv1 && nv1 != nv2 && nv2 != nv0 {
                    new_faces.push([nv0, nv1, nv2]);
                }
            }
        }

        TriangleMesh::from_vertices_and_faces(new_positions, new_faces)
    }
}

// ============================================================
// Edge Cost for Priority Queue
// ============================================================

#[derive(Debug, Clone)]
struct EdgeCost {
    v1: usize,
    v2: usize,
    cost: f64,
}

impl PartialEq for EdgeCost {
    fn eq(&self, other: &Self) -> bool {
        self.cost.total_cmp(&other.cost) == Ordering::Equal
            && self.v1 == other.v1
            && self.v2 == other.v2
    }
}
impl Eq for EdgeCost {}

impl PartialOrd for EdgeCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EdgeCost {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: smallest cost first, vertex indices as a total
        // tie-break so pop order never depends on hash order
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.v1.cmp(&self.v1))
            .then_with(|| other.v2.cmp(&self.v2))
    }
}

// ============================================================
// Collapse Statistics
// ============================================================

/// Face target and collapse counters for one simplification run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollapseStats {
    /// Face count the run aimed for, after rounding and clamping
    pub target_faces: usize,
    /// Edge collapses executed
    pub performed: usize,
    /// Candidates popped but skipped (stale, link condition, fold or
    /// degeneracy check, target guard)
    pub rejected: usize,
}

// ============================================================
// Edge Collapse Simplifier
// ============================================================

/// Edge collapse mesh simplifier using a half-edge structure and QEM.
///
/// This simplifier builds a half-edge mesh for local topology queries
/// (neighbor iteration, boundary detection, link condition checks) and uses
/// quadric error metrics to prioritize edge collapses. Collapse order is a
/// deterministic function of the input, so equal inputs produce equal
/// outputs and a larger keep ratio performs a prefix of the collapses a
/// smaller one performs.
pub struct EdgeCollapseSimplifier {
    /// Stop when the minimum collapse cost exceeds this threshold
    pub error_threshold: Option<f64>,
    /// Never collapse edges touching the mesh boundary
    pub preserve_boundary: bool,
    /// Extra penalty added to boundary edge costs when not hard-preserving;
    /// keeps the boundary intact while interior candidates remain
    pub boundary_weight: f64,
    /// Undirected edges whose endpoints must survive unchanged (UV seams)
    pub protected_edges: HashSet<(usize, usize)>,
}

impl Default for EdgeCollapseSimplifier {
    fn default() -> Self {
        Self {
            error_threshold: None,
            preserve_boundary: false,
            boundary_weight: 100.0,
            protected_edges: HashSet::new(),
        }
    }
}

impl EdgeCollapseSimplifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(
        error_threshold: Option<f64>,
        preserve_boundary: bool,
        boundary_weight: f64,
    ) -> Self {
        Self {
            error_threshold,
            preserve_boundary,
            boundary_weight,
            protected_edges: HashSet::new(),
        }
    }

    /// Protect a set of undirected edges from collapse. Endpoint order
    /// within each pair does not matter.
    pub fn with_protected_edges(mut self, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        self.protected_edges = edges
            .into_iter()
            .map(|(a, b)| (a.min(b), a.max(b)))
            .collect();
        self
    }

    /// Per-vertex freeze mask derived from the protected edge set. Any
    /// collapse touching a frozen vertex is skipped, which keeps protected
    /// edges and their endpoints bit-for-bit intact.
    fn protected_vertices(&self, vertex_count: usize) -> Vec<bool> {
        let mut frozen = vec![false; vertex_count];
        for &(a, b) in &self.protected_edges {
            if a < vertex_count {
                frozen[a] = true;
            }
            if b < vertex_count {
                frozen[b] = true;
            }
        }
        frozen
    }

    /// Build the priority queue of collapse candidates over live edges.
    fn build_queue(&self, hem: &HalfEdgeMesh, frozen: &[bool]) -> PriorityQueue<usize, EdgeCost> {
        let mut queue = PriorityQueue::new();
        let mut seen_edges: HashSet<(usize, usize)> = HashSet::new();
        let mut edge_id = 0usize;

        for vi in 0..hem.positions.len() {
            if hem.vertex_removed[vi] || hem.vertex_edge[vi] == INVALID {
                continue;
            }
            for &he in &hem.outgoing_half_edges(vi) {
                if hem.half_edges[he].face == INVALID {
                    continue;
                }
                let target = hem.half_edges[he].target;
                let key = (vi.min(target), vi.max(target));
                if !seen_edges.insert(key) {
                    continue;
                }

                if frozen[vi] || frozen[target] {
                    continue;
                }

                // Skip boundary edges entirely in hard-preserve mode
                if self.preserve_boundary
                    && (hem.is_boundary_vertex(vi) || hem.is_boundary_vertex(target))
                {
                    continue;
                }

                let (_, mut cost) = hem.compute_collapse_cost(vi, target);

                if !self.preserve_boundary
                    && (hem.is_boundary_vertex(vi) || hem.is_boundary_vertex(target))
                {
                    cost += self.boundary_weight;
                }

                queue.push(
                    edge_id,
                    EdgeCost {
                        v1: vi,
                        v2: target,
                        cost,
                    },
                );
                edge_id += 1;
            }
        }

        queue
    }

    /// Simplify and report collapse counters alongside the mesh.
    pub fn simplify_with_stats(
        &self,
        mesh: &TriangleMesh,
        keep_ratio: f32,
    ) -> Result<(TriangleMesh, CollapseStats)> {
        if !keep_ratio.is_finite() || keep_ratio <= 0.0 || keep_ratio > 1.0 {
            return Err(Error::InvalidRatio(keep_ratio));
        }
        if mesh.is_empty() {
            return Err(Error::EmptyResult {
                target: 0,
                source_faces: mesh.face_count(),
            });
        }
        if keep_ratio == 1.0 {
            let copy =
                TriangleMesh::from_vertices_and_faces(mesh.vertices.clone(), mesh.faces.clone());
            let stats = CollapseStats {
                target_faces: mesh.face_count(),
                ..CollapseStats::default()
            };
            return Ok((copy, stats));
        }

        let source_faces = mesh.face_count();
        let target_faces = ((source_faces as f64) * (keep_ratio as f64)).round() as usize;
        let target_faces = target_faces.max(MIN_FACES).min(source_faces);

        info!(
            faces = source_faces,
            target = target_faces,
            "Starting edge collapse"
        );

        let mut hem = HalfEdgeMesh::from_triangle_mesh(mesh)?;
        let frozen = self.protected_vertices(hem.positions.len());
        let mut queue = self.build_queue(&hem, &frozen);
        let mut stats = CollapseStats {
            target_faces,
            ..CollapseStats::default()
        };
        let mut stalled = false;

        while hem.active_face_count > target_faces {
            let (_, edge_cost) = match queue.pop() {
                Some(item) => item,
                None => {
                    // One rebuild per stall: repopulates candidates the
                    // target guard discarded, then gives up if nothing
                    // collapsible remains
                    if stalled {
                        break;
                    }
                    stalled = true;
                    queue = self.build_queue(&hem, &frozen);
                    if queue.is_empty() {
                        break;
                    }
                    continue;
                }
            };

            // Check error threshold
            if let Some(threshold) = self.error_threshold {
                if edge_cost.cost > threshold {
                    break;
                }
            }

            let v1 = edge_cost.v1;
            let v2 = edge_cost.v2;

            // Validate: both vertices still alive and still neighbors
            if hem.vertex_removed[v1]
                || hem.vertex_removed[v2]
                || hem.vertex_edge[v1] == INVALID
                || hem.vertex_edge[v2] == INVALID
            {
                stats.rejected += 1;
                continue;
            }

            let h = match hem.find_half_edge(v1, v2) {
                Some(h) => h,
                None => {
                    stats.rejected += 1;
                    continue;
                }
            };

            // Never land below the target: an interior collapse removes two
            // faces, a boundary collapse one
            let removes = if hem.half_edges[h].twin == INVALID { 1 } else { 2 };
            if hem.active_face_count < target_faces + removes {
                stats.rejected += 1;
                continue;
            }

            // Check link condition to avoid non-manifold topology
            if !hem.check_link_condition(v1, v2) {
                stats.rejected += 1;
                continue;
            }

            // Recompute position (quadrics may have changed since queuing)
            let (pos, _cost) = hem.compute_collapse_cost(v1, v2);

            // Reject placements that crush or fold a surviving face
            if hem.collapse_would_degenerate(v1, v2, pos) {
                stats.rejected += 1;
                continue;
            }

            if hem.collapse_edge(v1, v2, pos) {
                stats.performed += 1;
                stalled = false;

                // Periodically rebuild queue for accuracy
                if stats.performed % 100 == 0 {
                    queue = self.build_queue(&hem, &frozen);
                }
            } else {
                stats.rejected += 1;
            }
        }

        debug!(
            faces = hem.active_face_count,
            collapses = stats.performed,
            rejected = stats.rejected,
            "Collapse loop finished"
        );

        Ok((hem.to_triangle_mesh(), stats))
    }
}

impl MeshSimplifier for EdgeCollapseSimplifier {
    fn simplify(&self, mesh: &TriangleMesh, keep_ratio: f32) -> Result<TriangleMesh> {
        self.simplify_with_stats(mesh, keep_ratio)
            .map(|(mesh, _)| mesh)
    }
}
