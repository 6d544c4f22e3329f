//! Two-point correlation function and derived length scales
//!
//! The probability that two voxels a lag apart are both void is the
//! autocorrelation of the void indicator, computed through a 3-D FFT with
//! periodic wrap-around and averaged over radial shells of lag magnitude.

use ndarray::{Array3, Axis};
use rustfft::FftPlanner;
use rustfft::num_complex::Complex;

use crate::io::configuration::CORRELATION_THRESHOLD;
use crate::io::error::{Result, degenerate, invalid_parameter};
use crate::math::integration::trapezoid;
use crate::spatial::volume::BinaryVolume;

/// Radially averaged two-point probability of the void phase
#[derive(Debug, Clone, PartialEq)]
pub struct TwoPointCorrelation {
    /// Mean lag magnitude of each sample, voxel units, ascending from 0
    pub distance: Vec<f64>,
    /// Probability that both ends of a lag are void
    pub probability: Vec<f64>,
    /// Void fraction of the volume
    pub porosity: f64,
}

/// Length scales of a normalized correlation curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationScales {
    /// Distance at which the normalized correlation crosses `1/e`
    pub length: f64,
    /// Integral of the normalized correlation over distance
    pub integral_scale: f64,
    /// Slope between the first two samples, absent with a single sample
    pub slope_at_origin: Option<f64>,
}

impl CorrelationScales {
    /// Convert voxel-unit scales to physical units
    #[must_use]
    pub fn to_physical(self, pitch: f64) -> Self {
        Self {
            length: self.length * pitch,
            integral_scale: self.integral_scale * pitch,
            slope_at_origin: self.slope_at_origin.map(|slope| slope / pitch),
        }
    }
}

impl TwoPointCorrelation {
    /// Correlation rescaled to run from 1 at the origin towards 0
    ///
    /// Computes `(S2 - phi^2) / (phi - phi^2)`.
    ///
    /// # Errors
    ///
    /// Returns a degenerate-distribution error for a single-phase volume
    pub fn normalized(&self) -> Result<Vec<f64>> {
        let baseline = self.porosity * self.porosity;
        let span = self.porosity - baseline;
        if span <= 0.0 {
            return Err(degenerate(
                "two-point correlation",
                &format!("porosity {} leaves no correlation to normalize", self.porosity),
            ));
        }
        Ok(self
            .probability
            .iter()
            .map(|&probability| (probability - baseline) / span)
            .collect())
    }

    /// Correlation length, integral scale and slope at origin in voxel units
    ///
    /// The correlation length interpolates linearly between the last sample
    /// above `1/e` and the sample after it. It is the largest sampled distance
    /// when the last sample is still above the threshold, and 0 when no
    /// sample is.
    ///
    /// # Errors
    ///
    /// Returns a degenerate-distribution error if the curve cannot be
    /// normalized or has no samples
    pub fn scales(&self) -> Result<CorrelationScales> {
        let correlation = self.normalized()?;
        let distance = &self.distance;
        if correlation.is_empty() {
            return Err(degenerate("two-point correlation", &"no lag samples"));
        }
        let slope_at_origin = match (
            distance.first(),
            distance.get(1),
            correlation.first(),
            correlation.get(1),
        ) {
            (Some(&d0), Some(&d1), Some(&c0), Some(&c1)) => Some((c1 - c0) / (d1 - d0)),
            _ => None,
        };

        let length = match correlation
            .iter()
            .rposition(|&value| value > CORRELATION_THRESHOLD)
        {
            None => 0.0,
            Some(last) => match (
                distance.get(last),
                distance.get(last + 1),
                correlation.get(last),
                correlation.get(last + 1),
            ) {
                (Some(&x0), Some(&x1), Some(&y0), Some(&y1)) => {
                    let slope = (y1 - y0) / (x1 - x0);
                    x0 + (CORRELATION_THRESHOLD - y0) / slope
                }
                _ => distance.last().copied().unwrap_or(0.0),
            },
        };

        Ok(CorrelationScales {
            length,
            integral_scale: trapezoid(&correlation, distance),
            slope_at_origin,
        })
    }
}

/// Two-point probability of the void phase sampled at `bins` radial shells
///
/// Shell 0 holds only the zero lag, so its probability is the porosity.
/// Remaining shells split `(0, r_max]` evenly with `r_max` half the smallest
/// grid dimension; shells that receive no lag are dropped.
///
/// # Errors
///
/// Returns an error if `bins` is below 2
pub fn two_point_correlation(volume: &BinaryVolume, bins: usize) -> Result<TwoPointCorrelation> {
    if bins < 2 {
        return Err(invalid_parameter("bins", &bins, &"at least two bins are required"));
    }
    let autocorrelation = void_autocorrelation(volume);
    let shape = volume.shape();
    let r_max = (shape.iter().copied().min().unwrap_or(0) / 2) as f64;
    let step = r_max / (bins - 1) as f64;

    let mut probability_sums = vec![0.0; bins];
    let mut distance_sums = vec![0.0; bins];
    let mut counts = vec![0usize; bins];
    let wrapped = |i: usize, n: usize| i.min(n - i) as f64;

    for ((x, y, z), &value) in autocorrelation.indexed_iter() {
        let lag = wrapped(x, shape[0])
            .hypot(wrapped(y, shape[1]))
            .hypot(wrapped(z, shape[2]));
        if lag > r_max {
            continue;
        }
        let shell = if lag == 0.0 {
            0
        } else {
            ((lag / step).ceil() as usize).clamp(1, bins - 1)
        };
        if let (Some(probability), Some(distance), Some(count)) = (
            probability_sums.get_mut(shell),
            distance_sums.get_mut(shell),
            counts.get_mut(shell),
        ) {
            *probability += value;
            *distance += lag;
            *count += 1;
        }
    }

    let (distance, probability) = counts
        .iter()
        .zip(distance_sums.iter().zip(&probability_sums))
        .filter(|(count, _)| **count > 0)
        .map(|(&count, (&distance, &probability))| {
            (distance / count as f64, probability / count as f64)
        })
        .unzip();

    Ok(TwoPointCorrelation {
        distance,
        probability,
        porosity: volume.porosity(),
    })
}

/// Fraction of voxels `x` with both `x` and `x + lag` void, for every lag
fn void_autocorrelation(volume: &BinaryVolume) -> Array3<f64> {
    let phases = volume.phases();
    let mut spectrum: Array3<Complex<f64>> =
        phases.map(|&void| Complex::new(if void { 1.0 } else { 0.0 }, 0.0));
    let mut planner = FftPlanner::<f64>::new();

    transform_all_axes(&mut spectrum, &mut planner, false);
    spectrum.mapv_inplace(|value| Complex::new(value.norm_sqr(), 0.0));
    transform_all_axes(&mut spectrum, &mut planner, true);

    // Unnormalized forward and inverse transforms scale by N; averaging over voxels adds another N
    let n = volume.len() as f64;
    spectrum.map(|value| value.re / (n * n))
}

fn transform_all_axes(
    data: &mut Array3<Complex<f64>>,
    planner: &mut FftPlanner<f64>,
    inverse: bool,
) {
    for axis in 0..3 {
        let length = data.len_of(Axis(axis));
        let fft = if inverse {
            planner.plan_fft_inverse(length)
        } else {
            planner.plan_fft_forward(length)
        };
        let mut buffer = vec![Complex::new(0.0, 0.0); length];
        for mut lane in data.lanes_mut(Axis(axis)) {
            for (slot, value) in buffer.iter_mut().zip(lane.iter()) {
                *slot = *value;
            }
            fft.process(&mut buffer);
            for (value, slot) in lane.iter_mut().zip(&buffer) {
                *value = *slot;
            }
        }
    }
}
