//! Radial density distribution of a boundary-masked void distance field

use tracing::debug;

use crate::analysis::distribution::{BinScale, Distribution};
use crate::io::configuration::{ArtifactMask, CharacterizationConfig, RadialDistance};
use crate::io::error::Result;
use crate::spatial::distance::{
    DistanceField, LinearMode, linear_distance, mask_boundary_artifacts, void_distance,
};
use crate::spatial::volume::BinaryVolume;

/// Void distance field after the configured artifact policy
///
/// A distance larger than the voxel's distance to the grid faces could only
/// be confirmed by sampling outside the grid, so
/// [`ArtifactMask::BoundaryDistance`] zeroes those voxels.
pub fn masked_distance_field(
    volume: &BinaryVolume,
    distance: RadialDistance,
    mask: ArtifactMask,
) -> DistanceField {
    let mut field = match distance {
        RadialDistance::Euclidean => void_distance(volume),
        RadialDistance::Linear { axis } => linear_distance(volume.phases(), axis, LinearMode::Both),
    };
    if mask == ArtifactMask::BoundaryDistance {
        let masked = mask_boundary_artifacts(&mut field);
        debug!(masked, "masked boundary artifacts");
    }
    field
}

/// Distribution of local radial distances over unmasked void voxels
///
/// # Errors
///
/// Returns an error if the volume is single-phase or every void voxel is masked
pub fn radial_density_distribution(
    volume: &BinaryVolume,
    config: &CharacterizationConfig,
) -> Result<Distribution> {
    volume.require_two_phases()?;
    let field = masked_distance_field(volume, config.radial_distance, config.artifact_mask);
    let radii: Vec<f64> = field
        .iter()
        .copied()
        .filter(|&radius| radius > 0.0 && radius.is_finite())
        .collect();
    Distribution::from_samples("radial density", &radii, config.bins, BinScale::Linear)
}
