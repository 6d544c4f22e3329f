//! Binary two-phase voxel volume with physical pitch
//!
//! `true` marks void (pore) voxels and `false` marks solid voxels. The grid is
//! indexed `[x, y, z]` with shape `(nx, ny, nz)`.

use ndarray::{Array3, ArrayView3, Slice};

use crate::io::configuration::{DEFAULT_LENGTH_UNIT, DEFAULT_PITCH};
use crate::io::error::{Result, invalid_volume};

/// Two-phase voxel grid handed to the characterization engine
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryVolume {
    phases: Array3<bool>,
    pitch: f64,
    unit: String,
    void_count: usize,
}

impl BinaryVolume {
    /// Wrap a phase grid with its voxel pitch and length unit
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any dimension of the grid is zero
    /// - The pitch is not a positive finite number
    pub fn new(phases: Array3<bool>, pitch: f64, unit: impl Into<String>) -> Result<Self> {
        let (nx, ny, nz) = phases.dim();
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(invalid_volume(&format!(
                "grid shape ({nx}, {ny}, {nz}) has an empty dimension"
            )));
        }
        if !(pitch.is_finite() && pitch > 0.0) {
            return Err(invalid_volume(&format!(
                "voxel pitch {pitch} must be a positive finite number"
            )));
        }
        let void_count = phases.iter().filter(|&&void| void).count();
        Ok(Self {
            phases,
            pitch,
            unit: unit.into(),
            void_count,
        })
    }

    /// Wrap a phase grid using unit pitch and the default unit label
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension of the grid is zero
    pub fn from_phases(phases: Array3<bool>) -> Result<Self> {
        Self::new(phases, DEFAULT_PITCH, DEFAULT_LENGTH_UNIT)
    }

    /// Build a volume by evaluating `void_at` on every voxel index
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension is zero or the pitch is invalid
    pub fn from_fn<F>(shape: (usize, usize, usize), pitch: f64, void_at: F) -> Result<Self>
    where
        F: FnMut((usize, usize, usize)) -> bool,
    {
        Self::new(Array3::from_shape_fn(shape, void_at), pitch, DEFAULT_LENGTH_UNIT)
    }

    /// Read-only view of the phase grid
    pub fn phases(&self) -> ArrayView3<'_, bool> {
        self.phases.view()
    }

    /// Physical length of one voxel edge
    pub const fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Physical length unit label
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Grid shape as `[nx, ny, nz]`
    pub fn shape(&self) -> [usize; 3] {
        let (nx, ny, nz) = self.phases.dim();
        [nx, ny, nz]
    }

    /// Total voxel count
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Always false; empty grids are rejected at construction
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Number of void voxels
    pub const fn void_count(&self) -> usize {
        self.void_count
    }

    /// Void-voxel fraction
    pub fn porosity(&self) -> f64 {
        self.void_count as f64 / self.len() as f64
    }

    /// Whether every voxel belongs to the same phase
    pub fn is_single_phase(&self) -> bool {
        self.void_count == 0 || self.void_count == self.len()
    }

    /// Fail with an invalid-volume error when only one phase is present
    ///
    /// # Errors
    ///
    /// Returns an error if the volume is all void or all solid
    pub fn require_two_phases(&self) -> Result<()> {
        if self.void_count == 0 {
            Err(invalid_volume(&"volume contains no void voxels"))
        } else if self.void_count == self.len() {
            Err(invalid_volume(&"volume contains no solid voxels"))
        } else {
            Ok(())
        }
    }

    /// Phase at an index, `None` outside the grid
    pub fn is_void(&self, index: [usize; 3]) -> Option<bool> {
        self.phases.get(index).copied()
    }

    /// Copy of a corner sub-cube with edge `size`, clamped to the grid
    #[must_use]
    pub fn corner_subvolume(&self, size: usize) -> Self {
        let sub = self
            .phases
            .slice_each_axis(|axis| Slice::from(..size.min(axis.len)))
            .to_owned();
        let void_count = sub.iter().filter(|&&void| void).count();
        Self {
            phases: sub,
            pitch: self.pitch,
            unit: self.unit.clone(),
            void_count,
        }
    }
}
