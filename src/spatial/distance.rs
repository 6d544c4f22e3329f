//! Exact Euclidean and axis-aligned distance transforms
//!
//! The Euclidean transform uses the separable lower-envelope-of-parabolas
//! method: a 1-D squared distance pass along each axis in turn yields exact
//! squared distances in `O(n)` per lane. Voxels outside the grid are never
//! feature points, so distances near a face are not clipped by the face.

use ndarray::{Array3, ArrayView3, Axis, Zip};

use crate::spatial::volume::BinaryVolume;

/// Per-voxel distance in voxel units, same shape as its source grid
pub type DistanceField = Array3<f64>;

/// Direction of a linear distance scan
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinearMode {
    /// Run length counted from the start of the lane
    Forward,
    /// Run length counted from the end of the lane
    Backward,
    /// Minimum of forward and backward run lengths
    Both,
}

/// Squared Euclidean distance from every `true` voxel to the nearest `false` voxel
///
/// `false` voxels get 0. When the grid holds no `false` voxel every value is
/// infinite.
pub fn squared_euclidean_distance(grid: ArrayView3<'_, bool>) -> DistanceField {
    let mut field = grid.map(|&inside| if inside { f64::INFINITY } else { 0.0 });
    let longest = grid.shape().iter().copied().max().unwrap_or(0);
    let mut workspace = EnvelopeWorkspace::new(longest);

    for axis in 0..3 {
        for mut lane in field.lanes_mut(Axis(axis)) {
            workspace.load(lane.iter().copied());
            workspace.transform();
            for (value, &distance) in lane.iter_mut().zip(workspace.output.iter()) {
                *value = distance;
            }
        }
    }
    field
}

/// Euclidean distance from every `true` voxel to the nearest `false` voxel
pub fn euclidean_distance(grid: ArrayView3<'_, bool>) -> DistanceField {
    let mut field = squared_euclidean_distance(grid);
    field.mapv_inplace(f64::sqrt);
    field
}

/// Distance from each void voxel to the nearest solid voxel
pub fn void_distance(volume: &BinaryVolume) -> DistanceField {
    euclidean_distance(volume.phases())
}

/// Distance from each solid voxel to the nearest void voxel
pub fn solid_distance(volume: &BinaryVolume) -> DistanceField {
    let solid = volume.phases().map(|&void| !void);
    euclidean_distance(solid.view())
}

/// Length of the `true` run containing each voxel, measured along `axis`
///
/// A `true` voxel gets the number of consecutive `true` voxels from the
/// nearest `false` voxel or grid face up to and including itself. `false`
/// voxels get 0.
pub fn linear_distance(grid: ArrayView3<'_, bool>, axis: usize, mode: LinearMode) -> DistanceField {
    let mut field = Array3::<f64>::zeros(grid.raw_dim());
    let mut forward = Vec::new();

    for (source, mut target) in grid
        .lanes(Axis(axis))
        .into_iter()
        .zip(field.lanes_mut(Axis(axis)))
    {
        forward.clear();
        let mut run = 0.0;
        for &inside in source {
            run = if inside { run + 1.0 } else { 0.0 };
            forward.push(run);
        }

        let mut backward_run = 0.0;
        for (position, (&inside, value)) in source.iter().zip(target.iter_mut()).enumerate().rev()
        {
            backward_run = if inside { backward_run + 1.0 } else { 0.0 };
            let forward_run = forward.get(position).copied().unwrap_or(0.0);
            *value = match mode {
                LinearMode::Forward => forward_run,
                LinearMode::Backward => backward_run,
                LinearMode::Both => forward_run.min(backward_run),
            };
        }
    }
    field
}

/// Distance from each voxel to the nearest grid face, in voxel units
///
/// A voxel at index `i` along an axis of length `n` lies `min(i + 1, n - i)`
/// voxels from the faces normal to that axis; the field holds the minimum over
/// the three axes.
pub fn boundary_distance(shape: [usize; 3]) -> DistanceField {
    let edge = |i: usize, n: usize| (i + 1).min(n - i) as f64;
    Array3::from_shape_fn((shape[0], shape[1], shape[2]), |(x, y, z)| {
        edge(x, shape[0])
            .min(edge(y, shape[1]))
            .min(edge(z, shape[2]))
    })
}

/// Zero every distance exceeding the distance to the grid faces
///
/// Returns the number of voxels masked.
pub fn mask_boundary_artifacts(field: &mut DistanceField) -> usize {
    let (nx, ny, nz) = field.dim();
    let limits = boundary_distance([nx, ny, nz]);
    let mut masked = 0;
    Zip::from(field).and(&limits).for_each(|value, &limit| {
        if *value > limit {
            *value = 0.0;
            masked += 1;
        }
    });
    masked
}

/// Scratch buffers for the 1-D squared distance pass
struct EnvelopeWorkspace {
    input: Vec<f64>,
    output: Vec<f64>,
    /// Parabola apex positions in the lower envelope
    apexes: Vec<usize>,
    /// Boundaries between consecutive envelope parabolas
    boundaries: Vec<f64>,
}

impl EnvelopeWorkspace {
    fn new(capacity: usize) -> Self {
        Self {
            input: Vec::with_capacity(capacity),
            output: Vec::with_capacity(capacity),
            apexes: Vec::with_capacity(capacity),
            boundaries: Vec::with_capacity(capacity + 1),
        }
    }

    fn load(&mut self, values: impl Iterator<Item = f64>) {
        self.input.clear();
        self.input.extend(values);
    }

    /// Lower envelope of parabolas rooted at finite input samples
    // Inner loop of the transform; indices are bounded by the lane length
    #[allow(clippy::indexing_slicing)]
    fn transform(&mut self) {
        let n = self.input.len();
        self.output.clear();
        self.apexes.clear();
        self.boundaries.clear();

        for q in 0..n {
            let fq = self.input[q];
            if fq.is_infinite() {
                continue;
            }
            let qf = q as f64;
            let mut intersection = f64::NEG_INFINITY;
            while let Some(&p) = self.apexes.last() {
                let pf = p as f64;
                let s = (qf.mul_add(qf, fq) - pf.mul_add(pf, self.input[p])) / (2.0 * (qf - pf));
                let lower = self.boundaries[self.apexes.len() - 1];
                if s <= lower {
                    self.apexes.pop();
                    self.boundaries.pop();
                } else {
                    intersection = s;
                    break;
                }
            }
            self.apexes.push(q);
            self.boundaries.push(intersection);
        }

        if self.apexes.is_empty() {
            self.output.resize(n, f64::INFINITY);
            return;
        }

        let mut k = 0;
        for q in 0..n {
            let qf = q as f64;
            while k + 1 < self.apexes.len() && self.boundaries[k + 1] < qf {
                k += 1;
            }
            let p = self.apexes[k];
            let offset = qf - p as f64;
            self.output.push(offset.mul_add(offset, self.input[p]));
        }
    }
}
