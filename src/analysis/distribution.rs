//! Histogram-backed probability distributions

use crate::io::error::{Result, degenerate};
use crate::math::integration::{cumulative_sum, linspace, trapezoid};
use crate::math::moments::{MomentSet, moments_of_distribution};

/// Axis on which samples are binned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinScale {
    /// Bins evenly spaced in the sample value
    Linear,
    /// Bins evenly spaced in `log10` of the sample value
    Log10,
}

/// Binned density of a sample set
///
/// `pdf` is normalized so that its trapezoidal integral over `bin_centers`
/// is 1. `cdf` is the cumulative relative frequency: non-decreasing, ending at
/// 1. Bin centres are in binning coordinates (`log10` units for
/// [`BinScale::Log10`]); [`Distribution::positions`] maps them back.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    bin_centers: Vec<f64>,
    bin_widths: Vec<f64>,
    pdf: Vec<f64>,
    cdf: Vec<f64>,
    relative_frequency: Vec<f64>,
    scale: BinScale,
    sample_count: usize,
}

impl Distribution {
    /// Bin equally weighted samples
    ///
    /// # Errors
    ///
    /// See [`Distribution::from_weighted_samples`]
    pub fn from_samples(
        name: &'static str,
        values: &[f64],
        bins: usize,
        scale: BinScale,
    ) -> Result<Self> {
        let weighted: Vec<(f64, f64)> = values.iter().map(|&value| (value, 1.0)).collect();
        Self::from_weighted_samples(name, &weighted, bins, scale)
    }

    /// Bin `(value, weight)` samples into `bins` equal-width bins
    ///
    /// The bin range spans the smallest to largest usable value; a single
    /// distinct value gets a unit-wide range around it. Non-finite values,
    /// non-positive weights and, on a log scale, non-positive values are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns a degenerate-distribution error if:
    /// - `bins` is zero
    /// - No usable sample remains
    /// - The binned density has a zero trapezoidal integral
    pub fn from_weighted_samples(
        name: &'static str,
        samples: &[(f64, f64)],
        bins: usize,
        scale: BinScale,
    ) -> Result<Self> {
        if bins == 0 {
            return Err(degenerate(name, &"zero bins requested"));
        }

        let usable: Vec<(f64, f64)> = samples
            .iter()
            .filter(|(value, weight)| value.is_finite() && *weight > 0.0 && weight.is_finite())
            .filter_map(|&(value, weight)| match scale {
                BinScale::Linear => Some((value, weight)),
                BinScale::Log10 => (value > 0.0).then(|| (value.log10(), weight)),
            })
            .collect();
        if usable.is_empty() {
            return Err(degenerate(name, &"no samples to bin"));
        }

        let (mut low, mut high) = usable
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), &(value, _)| {
                (low.min(value), high.max(value))
            });
        if high - low <= f64::EPSILON * low.abs().max(1.0) {
            low -= 0.5;
            high += 0.5;
        }

        let edges = linspace(low, high, bins + 1);
        let width = (high - low) / bins as f64;
        let mut totals = vec![0.0; bins];
        for &(value, weight) in &usable {
            // The upper edge belongs to the last bin
            let bin = (((value - low) / width).floor() as usize).min(bins - 1);
            if let Some(total) = totals.get_mut(bin) {
                *total += weight;
            }
        }

        let total_weight: f64 = totals.iter().sum();
        let relative_frequency: Vec<f64> = totals.iter().map(|&t| t / total_weight).collect();
        let density: Vec<f64> = relative_frequency.iter().map(|&f| f / width).collect();
        let bin_centers: Vec<f64> = edges
            .windows(2)
            .map(|pair| match pair {
                [left, right] => (left + right) * 0.5,
                _ => low,
            })
            .collect();

        let integral = trapezoid(&density, &bin_centers);
        if !integral.is_finite() || integral <= 0.0 {
            return Err(degenerate(
                name,
                &format!("density integrates to {integral} over the bin centres"),
            ));
        }
        let pdf = density.iter().map(|&d| d / integral).collect();

        let mut cdf = cumulative_sum(&relative_frequency);
        // Rounding can leave the final value a hair off 1
        if let Some(last) = cdf.last_mut() {
            *last = 1.0;
        }

        Ok(Self {
            bin_centers,
            bin_widths: vec![width; bins],
            pdf,
            cdf,
            relative_frequency,
            scale,
            sample_count: usable.len(),
        })
    }

    /// Bin centres in binning coordinates, ascending
    pub fn bin_centers(&self) -> &[f64] {
        &self.bin_centers
    }

    /// Bin widths in binning coordinates
    pub fn bin_widths(&self) -> &[f64] {
        &self.bin_widths
    }

    /// Probability density aligned with the bin centres
    pub fn pdf(&self) -> &[f64] {
        &self.pdf
    }

    /// Cumulative relative frequency aligned with the bin centres
    pub fn cdf(&self) -> &[f64] {
        &self.cdf
    }

    /// Fraction of the weight in each bin
    pub fn relative_frequency(&self) -> &[f64] {
        &self.relative_frequency
    }

    /// Fraction of the weight in each bin or any higher bin
    pub fn exceedance(&self) -> Vec<f64> {
        self.cdf
            .iter()
            .zip(&self.relative_frequency)
            .map(|(&cumulative, &frequency)| (1.0 - cumulative + frequency).clamp(0.0, 1.0))
            .collect()
    }

    /// Binning axis
    pub const fn scale(&self) -> BinScale {
        self.scale
    }

    /// Number of samples that entered the histogram
    pub const fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Bin centres in sample units
    pub fn positions(&self) -> Vec<f64> {
        match self.scale {
            BinScale::Linear => self.bin_centers.clone(),
            BinScale::Log10 => self
                .bin_centers
                .iter()
                .map(|&center| 10f64.powf(center))
                .collect(),
        }
    }

    /// Moments of the PDF over [`Distribution::positions`] scaled by `rescale`
    ///
    /// # Errors
    ///
    /// Returns a degenerate-distribution error when the moments are undefined
    pub fn moments(&self, name: &'static str, rescale: f64) -> Result<MomentSet> {
        moments_of_distribution(name, &self.positions(), &self.pdf, rescale)
    }
}
