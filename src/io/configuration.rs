//! Characterization constants and runtime configuration defaults

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::distance::LinearMode;

// Histogram settings
/// Number of histogram bins for every distribution
pub const DEFAULT_BINS: usize = 20;

/// Coarse grid resolution the radius sweep is scaled against
pub const DEFAULT_TARGET_RESOLUTION: usize = 100;

/// Radius samples per unit of target resolution
pub const RADIUS_SAMPLES_PER_RESOLUTION: usize = 5;

/// Largest sampled radius per unit of target resolution
pub const RADIUS_SPAN_PER_RESOLUTION: usize = 2;

// Chord extraction
/// Skipped lines between sampled chord lines
pub const DEFAULT_CHORD_SPACING: usize = 1;

/// Axis used for chords, lineal paths and linear distance fields
pub const DEFAULT_ANALYSIS_AXIS: usize = 0;

// Transport solve
/// Relative residual at which the transport solve stops
pub const DEFAULT_SOLVER_TOLERANCE: f64 = 1e-8;

/// Iteration cap for the transport solve
pub const DEFAULT_SOLVER_MAX_ITERATIONS: usize = 10_000;

// Correlation
/// Normalized correlation level defining the correlation length
pub const CORRELATION_THRESHOLD: f64 = 1.0 / std::f64::consts::E;

// Physical units
/// Default physical length of one voxel edge
pub const DEFAULT_PITCH: f64 = 1.0;

/// Default physical length unit label
pub const DEFAULT_LENGTH_UNIT: &str = "cm";

// REV estimation
/// Sub-cube edge increment for the REV porosity profile
pub const DEFAULT_REV_STEP: usize = 10;

// Slice loading
/// Luminance above which a slice pixel is read as void
pub const DEFAULT_VOID_THRESHOLD: u8 = 127;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

/// Distance field used by the radial density analyzer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadialDistance {
    /// Exact Euclidean distance to the nearest solid voxel
    Euclidean,
    /// Linear distance along an axis, both directions
    Linear {
        /// Scan axis
        axis: usize,
    },
}

/// Treatment of distance values biased by the domain boundary
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactMask {
    /// Zero voxels whose distance exceeds their distance to the domain faces
    BoundaryDistance,
    /// Keep the field as computed
    None,
}

/// Immutable parameters for one characterization run
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterizationConfig {
    /// Histogram bins for every distribution
    pub bins: usize,
    /// Resolution the radius sweep is scaled against
    pub target_resolution: usize,
    /// Whether pore sizes are binned on a log10 scale
    pub log_pore_sizes: bool,
    /// Axis for chords and lineal paths
    pub axis: usize,
    /// Skipped lines between sampled chord lines
    pub chord_spacing: usize,
    /// Whether chords touching a domain face are discarded
    pub trim_chord_edges: bool,
    /// Linear distance mode for lineal paths
    pub lineal_mode: LinearMode,
    /// Distance field for the radial density analyzer
    pub radial_distance: RadialDistance,
    /// Boundary artifact policy for the radial density analyzer
    pub artifact_mask: ArtifactMask,
    /// Relative residual target for the transport solve
    pub solver_tolerance: f64,
    /// Iteration cap for the transport solve
    pub solver_max_iterations: usize,
}

impl Default for CharacterizationConfig {
    fn default() -> Self {
        Self {
            bins: DEFAULT_BINS,
            target_resolution: DEFAULT_TARGET_RESOLUTION,
            log_pore_sizes: true,
            axis: DEFAULT_ANALYSIS_AXIS,
            chord_spacing: DEFAULT_CHORD_SPACING,
            trim_chord_edges: true,
            lineal_mode: LinearMode::Both,
            radial_distance: RadialDistance::Euclidean,
            artifact_mask: ArtifactMask::BoundaryDistance,
            solver_tolerance: DEFAULT_SOLVER_TOLERANCE,
            solver_max_iterations: DEFAULT_SOLVER_MAX_ITERATIONS,
        }
    }
}

impl CharacterizationConfig {
    /// Set the histogram bin count
    #[must_use]
    pub const fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    /// Set the resolution the radius sweep is scaled against
    #[must_use]
    pub const fn with_target_resolution(mut self, target_resolution: usize) -> Self {
        self.target_resolution = target_resolution;
        self
    }

    /// Choose log10 or linear pore-size binning
    #[must_use]
    pub const fn with_log_pore_sizes(mut self, log_pore_sizes: bool) -> Self {
        self.log_pore_sizes = log_pore_sizes;
        self
    }

    /// Set the axis for chords and lineal paths
    #[must_use]
    pub const fn with_axis(mut self, axis: usize) -> Self {
        self.axis = axis;
        self
    }

    /// Set the radial density distance field and artifact policy
    #[must_use]
    pub const fn with_radial_policy(
        mut self,
        radial_distance: RadialDistance,
        artifact_mask: ArtifactMask,
    ) -> Self {
        self.radial_distance = radial_distance;
        self.artifact_mask = artifact_mask;
        self
    }

    /// Set the transport solve tolerance and iteration cap
    #[must_use]
    pub const fn with_solver(mut self, tolerance: f64, max_iterations: usize) -> Self {
        self.solver_tolerance = tolerance;
        self.solver_max_iterations = max_iterations;
        self
    }

    /// Radii swept by the granulometry engine, ascending, zero excluded
    ///
    /// Samples `linspace(0, span * resolution, samples * resolution)`.
    pub fn radius_samples(&self) -> Vec<f64> {
        let count = RADIUS_SAMPLES_PER_RESOLUTION * self.target_resolution;
        let end = (RADIUS_SPAN_PER_RESOLUTION * self.target_resolution) as f64;
        if count < 2 {
            return vec![end];
        }
        let step = end / (count - 1) as f64;
        (1..count).map(|i| i as f64 * step).collect()
    }

    /// Check every parameter for usable values
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `bins` is below 2
    /// - `target_resolution` is zero
    /// - An axis exceeds 2
    /// - The solver tolerance is not a positive finite number
    /// - The solver iteration cap is zero
    pub fn validate(&self) -> Result<()> {
        if self.bins < 2 {
            return Err(invalid_parameter(
                "bins",
                &self.bins,
                &"at least two bins are required",
            ));
        }
        if self.target_resolution == 0 {
            return Err(invalid_parameter(
                "target_resolution",
                &self.target_resolution,
                &"must be positive",
            ));
        }
        if self.axis > 2 {
            return Err(invalid_parameter("axis", &self.axis, &"must be 0, 1 or 2"));
        }
        if let RadialDistance::Linear { axis } = self.radial_distance {
            if axis > 2 {
                return Err(invalid_parameter(
                    "radial_distance",
                    &axis,
                    &"axis must be 0, 1 or 2",
                ));
            }
        }
        if !(self.solver_tolerance.is_finite() && self.solver_tolerance > 0.0) {
            return Err(invalid_parameter(
                "solver_tolerance",
                &self.solver_tolerance,
                &"must be a positive finite number",
            ));
        }
        if self.solver_max_iterations == 0 {
            return Err(invalid_parameter(
                "solver_max_iterations",
                &self.solver_max_iterations,
                &"must be positive",
            ));
        }
        Ok(())
    }
}
