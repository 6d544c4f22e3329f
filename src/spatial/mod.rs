//! Voxel data structures and geometric transforms
//!
//! This module contains:
//! - The binary volume and bit-packed voxel masks
//! - Exact Euclidean and linear distance transforms
//! - Face-connected labeling and percolation tests
//! - Phase boundary surface extraction
//! - Synthetic volume generators

/// Exact Euclidean, linear and boundary distance fields
pub mod distance;
/// Synthetic volumes with known geometry
pub mod generators;
/// Phase boundary triangulation
pub mod isosurface;
/// Face-connected flood fills and percolation
pub mod labeling;
/// Bit-packed voxel sets
pub mod mask;
/// Binary volume with physical pitch
pub mod volume;

pub use volume::BinaryVolume;
