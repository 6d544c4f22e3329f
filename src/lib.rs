//! Porous-microstructure characterization for two-phase voxel volumes
//!
//! A binary volume (void and solid) is reduced to a fixed record of scalar
//! descriptors: porosity, moments of the pore-size, chord-length, lineal-path
//! and radial-density distributions, two-point correlation length scales, the
//! Euler characteristic of the phase boundary, and per-axis tortuosity.

#![forbid(unsafe_code)]

/// Characterization driver, descriptor record and the transport solver
pub mod algorithm;
/// Distribution-producing analyzers and derived descriptors
pub mod analysis;
/// Configuration, errors, slice-stack loading and the command-line shell
pub mod io;
/// Numerical integration and distribution moments
pub mod math;
/// Voxel volumes, masks, distance fields, labeling and surface extraction
pub mod spatial;

pub use algorithm::executor::Characterizer;
pub use algorithm::record::DescriptorRecord;
pub use io::configuration::CharacterizationConfig;
pub use io::error::{AnalysisError, Result};
pub use spatial::volume::BinaryVolume;
