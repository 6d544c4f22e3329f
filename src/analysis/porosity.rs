//! Porosity and representative elementary volume estimation

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::volume::BinaryVolume;

/// Void fraction of a volume
pub fn porosity(volume: &BinaryVolume) -> f64 {
    volume.porosity()
}

/// Porosity of growing corner sub-cubes
///
/// Evaluates sub-cubes with edge `step, 2 * step, ...` strictly below the
/// smallest grid dimension and returns `(edge, porosity)` pairs. The edge at
/// which porosity stops drifting estimates the representative elementary
/// volume.
///
/// # Errors
///
/// Returns an error if `step` is zero
pub fn rev_profile(volume: &BinaryVolume, step: usize) -> Result<Vec<(usize, f64)>> {
    if step == 0 {
        return Err(invalid_parameter("step", &step, &"must be positive"));
    }
    let smallest = volume.shape().into_iter().min().unwrap_or(0);
    Ok((step..smallest)
        .step_by(step)
        .map(|edge| (edge, volume.corner_subvolume(edge).porosity()))
        .collect())
}
