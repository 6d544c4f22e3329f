//! Access-limited porosimetry and the pore-size distribution
//!
//! Each void voxel is assigned the diameter of the largest ball that covers
//! it, fits entirely in void, and can be reached from a grid face by moving
//! the ball's centre through void. This models intrusion of a non-wetting
//! fluid from the faces rather than unconstrained local curvature.

use ndarray::{Array3, Zip};
use tracing::debug;

use crate::analysis::distribution::{BinScale, Distribution};
use crate::io::configuration::CharacterizationConfig;
use crate::io::error::{Result, degenerate};
use crate::spatial::distance::{squared_euclidean_distance, void_distance};
use crate::spatial::labeling::{Face, connected_to_faces};
use crate::spatial::mask::VoxelMask;
use crate::spatial::volume::BinaryVolume;

/// Local pore diameter per voxel from a sweep over ball radii
///
/// Radii are visited from largest to smallest. For radius `r`, ball centres
/// are the void voxels at least `r` from any solid voxel that connect to a
/// grid face through other such centres; the opened set is every voxel closer
/// than `r` to a centre. A voxel keeps `2r` for the first (largest) radius
/// whose opened set contains it, and 0 if none does. Solid voxels stay 0.
pub fn local_pore_diameters(volume: &BinaryVolume, radii: &[f64]) -> Array3<f64> {
    let phases = volume.phases();
    let shape = volume.shape();
    let distance = void_distance(volume);
    let mut diameters = Array3::<f64>::zeros(phases.raw_dim());

    let largest = distance
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .fold(0.0, f64::max);
    let mut sweep: Vec<f64> = radii
        .iter()
        .copied()
        .filter(|&r| r > 0.0 && r <= largest)
        .collect();
    sweep.sort_by(|a, b| b.total_cmp(a));
    sweep.dedup();

    for radius in sweep {
        let mut centres = VoxelMask::new(shape);
        for ((x, y, z), &value) in distance.indexed_iter() {
            if value >= radius {
                centres.insert([x, y, z]);
            }
        }
        let centres = connected_to_faces(&centres, &Face::all());
        if centres.is_empty() {
            continue;
        }

        let outside_centres =
            Array3::from_shape_fn(phases.raw_dim(), |(x, y, z)| !centres.contains([x, y, z]));
        let reach = squared_euclidean_distance(outside_centres.view());
        let limit = radius * radius;
        let mut invaded = 0usize;
        Zip::from(&mut diameters)
            .and(&phases)
            .and(&reach)
            .for_each(|diameter, &void, &squared| {
                if void && *diameter == 0.0 && squared < limit {
                    *diameter = 2.0 * radius;
                    invaded += 1;
                }
            });
        debug!(radius, centres = centres.count(), invaded, "porosimetry step");
    }
    diameters
}

/// Distribution of local pore diameters over invaded void voxels
///
/// # Errors
///
/// Returns an error if:
/// - The volume has no void voxels (degenerate distribution)
/// - The volume has no solid voxels (invalid volume)
/// - No void voxel is reachable from the grid faces
pub fn pore_size_distribution(
    volume: &BinaryVolume,
    config: &CharacterizationConfig,
) -> Result<Distribution> {
    if volume.void_count() == 0 {
        return Err(degenerate("pore size", &"volume has zero porosity"));
    }
    volume.require_two_phases()?;

    let diameters = local_pore_diameters(volume, &config.radius_samples());
    let samples: Vec<f64> = diameters.iter().copied().filter(|&d| d > 0.0).collect();
    let scale = if config.log_pore_sizes {
        BinScale::Log10
    } else {
        BinScale::Linear
    };
    Distribution::from_samples("pore size", &samples, config.bins, scale)
}
