use bitvec::prelude::*;
use ndarray::ArrayView3;
use std::fmt;
use std::ops::Range;

/// Bit-packed boolean mask over a voxel grid
///
/// Stores one bit per voxel in `x`-major order matching the standard
/// layout of `Array3<bool>`, so full-grid masks cost an eighth of a byte
/// per voxel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelMask {
    bits: BitVec,
    shape: [usize; 3],
}

impl VoxelMask {
    /// Create a mask with no voxels set
    pub fn new(shape: [usize; 3]) -> Self {
        Self {
            bits: bitvec![0; shape[0] * shape[1] * shape[2]],
            shape,
        }
    }

    /// Create a mask with every voxel set
    pub fn all(shape: [usize; 3]) -> Self {
        Self {
            bits: bitvec![1; shape[0] * shape[1] * shape[2]],
            shape,
        }
    }

    /// Copy the set voxels of a boolean grid
    pub fn from_grid(grid: ArrayView3<'_, bool>) -> Self {
        let (nx, ny, nz) = grid.dim();
        let mut mask = Self::new([nx, ny, nz]);
        for ((x, y, z), &value) in grid.indexed_iter() {
            if value {
                mask.insert([x, y, z]);
            }
        }
        mask
    }

    /// Grid shape as `[nx, ny, nz]`
    pub const fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Flat index of a voxel, `None` outside the grid
    pub const fn linear_index(&self, index: [usize; 3]) -> Option<usize> {
        if index[0] < self.shape[0] && index[1] < self.shape[1] && index[2] < self.shape[2] {
            Some((index[0] * self.shape[1] + index[1]) * self.shape[2] + index[2])
        } else {
            None
        }
    }

    /// Voxel index of a flat index
    pub const fn voxel_index(&self, linear: usize) -> [usize; 3] {
        let plane = self.shape[1] * self.shape[2];
        [
            linear / plane,
            (linear % plane) / self.shape[2],
            linear % self.shape[2],
        ]
    }

    /// Set a voxel; indices outside the grid are ignored
    pub fn insert(&mut self, index: [usize; 3]) {
        if let Some(linear) = self.linear_index(index) {
            self.bits.set(linear, true);
        }
    }

    /// Clear a voxel; indices outside the grid are ignored
    pub fn remove(&mut self, index: [usize; 3]) {
        if let Some(linear) = self.linear_index(index) {
            self.bits.set(linear, false);
        }
    }

    /// Test voxel membership
    pub fn contains(&self, index: [usize; 3]) -> bool {
        self.linear_index(index)
            .is_some_and(|linear| self.contains_linear(linear))
    }

    /// Test membership by flat index
    pub fn contains_linear(&self, linear: usize) -> bool {
        self.bits.get(linear).as_deref() == Some(&true)
    }

    /// Set a voxel by flat index
    pub fn insert_linear(&mut self, linear: usize) {
        if linear < self.bits.len() {
            self.bits.set(linear, true);
        }
    }

    /// Intersect this mask with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Create a new mask containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Test if no voxels are set
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count set voxels
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Count set voxels with flat index in `range`, clamped to the grid
    pub fn count_range(&self, range: Range<usize>) -> usize {
        let end = range.end.min(self.bits.len());
        let start = range.start.min(end);
        self.bits.get(start..end).map_or(0, BitSlice::count_ones)
    }

    /// Iterate flat indices of set voxels
    pub fn iter_linear(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Iterate voxel indices of set voxels
    pub fn iter(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.bits.iter_ones().map(|linear| self.voxel_index(linear))
    }
}

impl fmt::Display for VoxelMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VoxelMask({}x{}x{}, {} set)",
            self.shape[0],
            self.shape[1],
            self.shape[2],
            self.count()
        )
    }
}
