//! Euler characteristic of the void/solid interface

use std::collections::HashSet;

use crate::io::error::{AnalysisError, Result};
use crate::spatial::isosurface::{TriangleMesh, extract_phase_boundary};
use crate::spatial::volume::BinaryVolume;

/// Vertex, edge and face counts of a triangle mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshCounts {
    /// Distinct vertices
    pub vertices: usize,
    /// Distinct undirected edges
    pub edges: usize,
    /// Triangles
    pub faces: usize,
}

impl MeshCounts {
    /// Count the cells of a mesh
    ///
    /// Each triangle contributes its three edges as `(min, max)` index pairs
    /// to a hash set, so shared edges are counted once; `O(F)` amortized.
    pub fn of(mesh: &TriangleMesh) -> Self {
        let mut edges: HashSet<(u32, u32)> = HashSet::with_capacity(mesh.triangle_count() * 3 / 2);
        for &[a, b, c] in &mesh.triangles {
            for (start, end) in [(a, b), (b, c), (c, a)] {
                edges.insert((start.min(end), start.max(end)));
            }
        }
        Self {
            vertices: mesh.vertex_count(),
            edges: edges.len(),
            faces: mesh.triangle_count(),
        }
    }

    /// Euler-Poincaré characteristic `V - E + F`
    pub const fn euler_characteristic(&self) -> i64 {
        self.vertices as i64 - self.edges as i64 + self.faces as i64
    }
}

/// Euler characteristic of the phase boundary surface
///
/// 2 for a closed sphere-like surface, lower for surfaces with handles, and
/// higher for surfaces split into several components.
///
/// # Errors
///
/// Returns an error if the extracted surface has no triangles
pub fn euler_characteristic(volume: &BinaryVolume) -> Result<i64> {
    let mesh = extract_phase_boundary(volume.phases());
    if mesh.is_empty() {
        return Err(AnalysisError::TopologyExtractionFailure {
            reason: "phase boundary surface is empty".to_string(),
        });
    }
    Ok(MeshCounts::of(&mesh).euler_characteristic())
}
