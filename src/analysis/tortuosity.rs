//! Per-axis tortuosity from a steady diffusion solve through the void phase
//!
//! Void voxels form a resistor network with unit conductance between face
//! neighbours. The faces normal to the axis are held at concentration 1
//! (inlet) and 0 (outlet); every other face is sealed. The steady inlet flux
//! gives an effective diffusivity, and tortuosity follows from comparing it
//! with the flux an unobstructed medium of the same porosity would carry.

use tracing::debug;

use crate::algorithm::solver::{JacobiPcg, LinearOperator, SolverConfig};
use crate::io::error::{AnalysisError, Result, invalid_parameter};
use crate::spatial::labeling::{face_neighbours, spanning_axis};
use crate::spatial::mask::VoxelMask;
use crate::spatial::volume::BinaryVolume;

/// Voxels per rank checkpoint of the unknown numbering
const RANK_BLOCK: usize = 512;

/// Transport result along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TortuosityResult {
    /// Axis of the imposed gradient
    pub axis: usize,
    /// `porosity / effective diffusivity`; 1 for straight channels
    pub tortuosity: f64,
    /// Void fraction of the percolating void phase
    pub effective_porosity: f64,
    /// Inlet flux scaled by length over cross-section
    pub effective_diffusivity: f64,
    /// Reciprocal of the effective diffusivity
    pub formation_factor: f64,
    /// Solver iterations
    pub iterations: usize,
}

/// Resistor network over the spanning void, matrix-free
///
/// Unknowns are the interior voxels (off both Dirichlet faces) numbered in
/// flat order. Links and degrees are read from the masks on every product;
/// only the interior mask and one rank checkpoint per `RANK_BLOCK` voxels
/// are stored alongside the spanning mask.
struct VoxelNetwork<'a> {
    spanning: &'a VoxelMask,
    interior: VoxelMask,
    /// Interior voxels before each block
    checkpoints: Vec<usize>,
    axis: usize,
    extent: usize,
}

/// Concentration boundary role of a conducting voxel
#[derive(Clone, Copy, PartialEq, Eq)]
enum Role {
    Inlet,
    Outlet,
    Unknown(usize),
}

impl<'a> VoxelNetwork<'a> {
    fn new(spanning: &'a VoxelMask, axis: usize, extent: usize) -> Self {
        let mut interior = VoxelMask::new(spanning.shape());
        for linear in spanning.iter_linear() {
            let position = spanning.voxel_index(linear).get(axis).copied().unwrap_or(0);
            if position > 0 && position + 1 < extent {
                interior.insert_linear(linear);
            }
        }
        let total: usize = spanning.shape().iter().product();
        let mut checkpoints = Vec::with_capacity(total.div_ceil(RANK_BLOCK));
        let mut before = 0;
        for block_start in (0..total).step_by(RANK_BLOCK) {
            checkpoints.push(before);
            before += interior.count_range(block_start..block_start + RANK_BLOCK);
        }
        Self {
            spanning,
            interior,
            checkpoints,
            axis,
            extent,
        }
    }

    /// Unknown number of an interior voxel
    fn rank(&self, linear: usize) -> Option<usize> {
        if !self.interior.contains_linear(linear) {
            return None;
        }
        let block = linear / RANK_BLOCK;
        let before = self.checkpoints.get(block).copied()?;
        Some(before + self.interior.count_range(block * RANK_BLOCK..linear))
    }

    fn role(&self, index: [usize; 3], linear: usize) -> Option<Role> {
        let position = index.get(self.axis).copied().unwrap_or(0);
        if position == 0 {
            Some(Role::Inlet)
        } else if position + 1 == self.extent {
            Some(Role::Outlet)
        } else {
            self.rank(linear).map(Role::Unknown)
        }
    }

    /// Roles of the conducting face neighbours of a voxel
    fn links(&self, linear: usize) -> impl Iterator<Item = Role> + '_ {
        let shape = self.spanning.shape();
        face_neighbours(self.spanning.voxel_index(linear), shape)
            .into_iter()
            .flatten()
            .filter_map(move |neighbour| {
                let neighbour_linear = self.spanning.linear_index(neighbour)?;
                if self.spanning.contains_linear(neighbour_linear) {
                    self.role(neighbour, neighbour_linear)
                } else {
                    None
                }
            })
    }
}

impl LinearOperator for VoxelNetwork<'_> {
    fn dimension(&self) -> usize {
        self.interior.count()
    }

    fn apply(&self, x: &[f64], y: &mut [f64]) {
        for ((out, &own), linear) in y.iter_mut().zip(x).zip(self.interior.iter_linear()) {
            let mut degree = 0.0;
            let mut coupled = 0.0;
            for link in self.links(linear) {
                degree += 1.0;
                if let Role::Unknown(unknown) = link {
                    coupled += x.get(unknown).copied().unwrap_or(0.0);
                }
            }
            *out = f64::mul_add(degree, own, -coupled);
        }
    }

    fn diagonal(&self) -> Vec<f64> {
        self.interior
            .iter_linear()
            .map(|linear| self.links(linear).count() as f64)
            .collect()
    }
}

/// Tortuosity along one axis
///
/// # Errors
///
/// Returns an error if:
/// - `axis` exceeds 2
/// - The axis has fewer than two voxel layers or no void path joins its faces
///   (non-percolating axis)
/// - The solver stops before reaching tolerance (solve non-convergence)
pub fn tortuosity(
    volume: &BinaryVolume,
    axis: usize,
    solver: SolverConfig,
) -> Result<TortuosityResult> {
    if axis > 2 {
        return Err(invalid_parameter("axis", &axis, &"must be 0, 1 or 2"));
    }
    let shape = volume.shape();
    let extent = shape.get(axis).copied().unwrap_or(0);
    if extent < 2 {
        return Err(AnalysisError::NonPercolatingAxis { axis });
    }

    let spanning = spanning_axis(&VoxelMask::from_grid(volume.phases()), axis);
    if spanning.is_empty() {
        return Err(AnalysisError::NonPercolatingAxis { axis });
    }

    let network = VoxelNetwork::new(&spanning, axis, extent);
    let unknowns = network.dimension();
    let mut rhs = Vec::with_capacity(unknowns);
    let mut guess = Vec::with_capacity(unknowns);
    for linear in network.interior.iter_linear() {
        let sources = network
            .links(linear)
            .filter(|&link| link == Role::Inlet)
            .count();
        rhs.push(sources as f64);
        let position = spanning.voxel_index(linear).get(axis).copied().unwrap_or(0);
        guess.push(1.0 - position as f64 / (extent - 1) as f64);
    }

    let mut iterations = 0;
    if unknowns > 0 {
        let report = JacobiPcg::new(solver).solve(&network, &rhs, &mut guess);
        debug!(
            axis,
            unknowns,
            iterations = report.iterations,
            relative_residual = report.relative_residual,
            "transport solve finished"
        );
        if !report.is_converged() {
            return Err(AnalysisError::SolveNonConvergence {
                axis,
                iterations: report.iterations,
                relative_residual: report.relative_residual,
            });
        }
        iterations = report.iterations;
    }

    // Flux leaving the inlet face into the rest of the network
    let mut rate = 0.0;
    for linear in spanning.iter_linear() {
        if spanning.voxel_index(linear).get(axis).copied() != Some(0) {
            continue;
        }
        for link in network.links(linear) {
            rate += match link {
                Role::Inlet => 0.0,
                Role::Outlet => 1.0,
                Role::Unknown(unknown) => 1.0 - guess.get(unknown).copied().unwrap_or(1.0),
            };
        }
    }

    let cross_section = (volume.len() / extent) as f64;
    let effective_diffusivity = rate * (extent - 1) as f64 / cross_section;
    if !(effective_diffusivity.is_finite() && effective_diffusivity > 0.0) {
        return Err(AnalysisError::SolveNonConvergence {
            axis,
            iterations,
            relative_residual: f64::NAN,
        });
    }
    let effective_porosity = spanning.count() as f64 / volume.len() as f64;

    Ok(TortuosityResult {
        axis,
        tortuosity: effective_porosity / effective_diffusivity,
        effective_porosity,
        effective_diffusivity,
        formation_factor: effective_diffusivity.recip(),
        iterations,
    })
}
