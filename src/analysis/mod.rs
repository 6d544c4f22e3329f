//! Analyzers that reduce a binary volume to distributions and scalars

/// Chord extraction and chord length distribution
pub mod chords;
/// Two-point correlation function and length scales
pub mod correlation;
/// Histogram-backed probability distributions
pub mod distribution;
/// Access-limited granulometry and pore-size distribution
pub mod granulometry;
/// Lineal path distribution
pub mod lineal_path;
/// Porosity and representative elementary volume profile
pub mod porosity;
/// Radial density distribution
pub mod radial_density;
/// Euler characteristic of the phase boundary
pub mod topology;
/// Diffusive tortuosity per axis
pub mod tortuosity;
