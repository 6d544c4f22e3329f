//! Numerical utilities for distributions

/// Trapezoidal integration and sampling grids
pub mod integration;
/// Moments of tabulated distributions
pub mod moments;
