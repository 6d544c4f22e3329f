//! Lineal-path distribution of the void phase
//!
//! Where chords record whole runs, the lineal path weights every void voxel by
//! how far an axis-aligned segment anchored at it can extend before leaving
//! the void, so long runs contribute every shorter segment they contain.

use crate::analysis::distribution::{BinScale, Distribution};
use crate::io::configuration::CharacterizationConfig;
use crate::io::error::Result;
use crate::spatial::distance::{DistanceField, LinearMode, linear_distance};
use crate::spatial::volume::BinaryVolume;

/// Linear distance field of the void phase along the configured axis
pub fn lineal_path_field(volume: &BinaryVolume, axis: usize, mode: LinearMode) -> DistanceField {
    linear_distance(volume.phases(), axis, mode)
}

/// Distribution of segment lengths that stay within void, voxel units
///
/// # Errors
///
/// Returns an error if the volume is single-phase or no void voxel remains
pub fn lineal_path_distribution(
    volume: &BinaryVolume,
    config: &CharacterizationConfig,
) -> Result<Distribution> {
    volume.require_two_phases()?;
    let field = lineal_path_field(volume, config.axis, config.lineal_mode);
    let lengths: Vec<f64> = field.iter().copied().filter(|&length| length > 0.0).collect();
    Distribution::from_samples("lineal path", &lengths, config.bins, BinScale::Linear)
}

/// Probability that a segment of `length` voxels starting in void stays in void
///
/// Counts, over all void anchors along `axis`, the fraction whose forward run
/// covers at least `length` voxels. Length 1 gives 1 for any volume with void.
pub fn survival_probability(volume: &BinaryVolume, axis: usize, length: usize) -> f64 {
    let remaining = linear_distance(volume.phases(), axis, LinearMode::Backward);
    let anchors = remaining.iter().filter(|&&run| run > 0.0).count();
    if anchors == 0 {
        return 0.0;
    }
    let surviving = remaining
        .iter()
        .filter(|&&run| run > 0.0 && run >= length as f64)
        .count();
    surviving as f64 / anchors as f64
}
