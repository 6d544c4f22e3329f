//! Phase-boundary surface extraction by marching tetrahedra
//!
//! Grid points sit at voxel centres and carry 1 for void, 0 for solid. Every
//! cell between eight neighbouring centres is split into six tetrahedra that
//! share the cell's main diagonal; the split is identical in every cell, so
//! neighbouring cells agree on their shared faces and the extracted surface is
//! a closed 2-manifold wherever it does not reach the grid faces. Surface
//! vertices lie at the midpoints of tetrahedron edges whose ends differ in
//! phase and are shared between all tetrahedra using that edge.

use ndarray::ArrayView3;
use std::collections::HashMap;

/// Cell corner offsets, bit 0 = x, bit 1 = y, bit 2 = z
const CORNER_OFFSETS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [0, 1, 0],
    [1, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [0, 1, 1],
    [1, 1, 1],
];

/// Six tetrahedra around the diagonal from corner 0 to corner 7
const CELL_TETRAHEDRA: [[usize; 4]; 6] = [
    [0, 1, 3, 7],
    [0, 1, 5, 7],
    [0, 2, 3, 7],
    [0, 2, 6, 7],
    [0, 4, 5, 7],
    [0, 4, 6, 7],
];

/// Triangulated phase boundary
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions in voxel units
    pub vertices: Vec<[f64; 3]>,
    /// Vertex index triples
    pub triangles: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the mesh has no triangles
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Lattice corner of a tetrahedron: flat grid index and phase
#[derive(Clone, Copy)]
struct Corner {
    id: usize,
    position: [usize; 3],
    void: bool,
}

/// Incremental mesh builder sharing vertices by lattice edge
struct MeshBuilder {
    mesh: TriangleMesh,
    edge_vertices: HashMap<(usize, usize), u32>,
}

impl MeshBuilder {
    fn new() -> Self {
        Self {
            mesh: TriangleMesh::default(),
            edge_vertices: HashMap::new(),
        }
    }

    fn vertex_on(&mut self, a: Corner, b: Corner) -> u32 {
        let key = (a.id.min(b.id), a.id.max(b.id));
        let vertices = &mut self.mesh.vertices;
        *self.edge_vertices.entry(key).or_insert_with(|| {
            let index = vertices.len() as u32;
            vertices.push([
                (a.position[0] + b.position[0]) as f64 * 0.5,
                (a.position[1] + b.position[1]) as f64 * 0.5,
                (a.position[2] + b.position[2]) as f64 * 0.5,
            ]);
            index
        })
    }

    fn add_tetrahedron(&mut self, corners: [Corner; 4]) {
        let (void, solid): (Vec<Corner>, Vec<Corner>) =
            corners.into_iter().partition(|corner| corner.void);
        match (void.as_slice(), solid.as_slice()) {
            ([lone], [a, b, c]) | ([a, b, c], [lone]) => {
                let triangle = [
                    self.vertex_on(*lone, *a),
                    self.vertex_on(*lone, *b),
                    self.vertex_on(*lone, *c),
                ];
                self.mesh.triangles.push(triangle);
            }
            ([a, b], [c, d]) => {
                let ac = self.vertex_on(*a, *c);
                let ad = self.vertex_on(*a, *d);
                let bd = self.vertex_on(*b, *d);
                let bc = self.vertex_on(*b, *c);
                self.mesh.triangles.push([ac, ad, bd]);
                self.mesh.triangles.push([ac, bd, bc]);
            }
            _ => {}
        }
    }
}

/// Extract the void/solid boundary of a phase grid at the 0.5 level
// Tetrahedron corner ids are all below 8
#[allow(clippy::indexing_slicing)]
pub fn extract_phase_boundary(phases: ArrayView3<'_, bool>) -> TriangleMesh {
    let (nx, ny, nz) = phases.dim();
    let mut builder = MeshBuilder::new();
    if nx < 2 || ny < 2 || nz < 2 {
        return builder.mesh;
    }
    let flat = |p: [usize; 3]| (p[0] * ny + p[1]) * nz + p[2];

    for x in 0..nx - 1 {
        for y in 0..ny - 1 {
            for z in 0..nz - 1 {
                let corners = CORNER_OFFSETS.map(|offset| {
                    let position = [x + offset[0], y + offset[1], z + offset[2]];
                    Corner {
                        id: flat(position),
                        position,
                        void: phases.get(position).copied().unwrap_or(false),
                    }
                });
                // Uniform cells cannot contain the boundary
                let void_corners = corners.iter().filter(|corner| corner.void).count();
                if void_corners == 0 || void_corners == 8 {
                    continue;
                }
                for tetrahedron in CELL_TETRAHEDRA {
                    builder.add_tetrahedron(tetrahedron.map(|corner| corners[corner]));
                }
            }
        }
    }
    builder.mesh
}
