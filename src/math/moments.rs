//! Central moments of a sampled density by trapezoidal integration

use crate::io::error::{Result, degenerate};
use crate::math::integration::{trapezoid, weighted_trapezoid};

/// Mean, spread and shape of a density
///
/// Skewness and kurtosis are raw standardized moments: a normal density has
/// skewness 0 and kurtosis 3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentSet {
    /// First raw moment
    pub mean: f64,
    /// Square root of the second central moment
    pub std: f64,
    /// Third central moment over `std^3`
    pub skewness: f64,
    /// Fourth central moment over `std^4`
    pub kurtosis: f64,
}

/// Moments of the density `y` sampled at `x * rescale`
///
/// `y` need not be normalized; it is divided by its trapezoidal integral
/// first. `x` must be ascending.
///
/// # Errors
///
/// Returns a degenerate-distribution error if:
/// - `x` and `y` differ in length
/// - Fewer than two samples carry positive density
/// - The normalization integral is zero or non-finite
/// - The standard deviation is zero or non-finite
pub fn moments_of_distribution(
    distribution: &'static str,
    x: &[f64],
    y: &[f64],
    rescale: f64,
) -> Result<MomentSet> {
    if x.len() != y.len() {
        return Err(degenerate(
            distribution,
            &format!("{} positions for {} densities", x.len(), y.len()),
        ));
    }
    let support = y.iter().filter(|&&density| density > 0.0).count();
    if support < 2 {
        return Err(degenerate(
            distribution,
            &format!("{support} samples carry positive density"),
        ));
    }

    let x: Vec<f64> = x.iter().map(|&position| position * rescale).collect();
    let integral = trapezoid(y, &x);
    if !integral.is_finite() || integral <= 0.0 {
        return Err(degenerate(
            distribution,
            &format!("normalization integral is {integral}"),
        ));
    }
    let y: Vec<f64> = y.iter().map(|&density| density / integral).collect();

    let mean = weighted_trapezoid(&y, &x, |position| position);
    let variance = weighted_trapezoid(&y, &x, |position| (position - mean).powi(2));
    let std = variance.sqrt();
    if !std.is_finite() || std <= f64::EPSILON * mean.abs().max(1.0) {
        return Err(degenerate(
            distribution,
            &format!("standard deviation is {std}"),
        ));
    }

    let skewness = weighted_trapezoid(&y, &x, |position| (position - mean).powi(3)) / std.powi(3);
    let kurtosis = weighted_trapezoid(&y, &x, |position| (position - mean).powi(4)) / std.powi(4);

    Ok(MomentSet {
        mean,
        std,
        skewness,
        kurtosis,
    })
}
